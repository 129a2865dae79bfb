use crate::analyzer::types::{BalanceEvent, Direction};
use crate::analyzer::utils::to_decimal_units;
use crate::coin::moac::model::{Transaction, DECIMALS};
use crate::respository::Repository;
use crate::types::{ScanData, ScanReceiver};
use log::{error, info};
use std::collections::HashSet;
use std::sync::Arc;

/// Addresses whose balance changes are reported, matched case-insensitively
#[derive(Debug, Clone, Default)]
pub struct WatchList {
  addresses: HashSet<String>,
}

impl WatchList {
  pub fn new<I, S>(addresses: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    Self {
      addresses: addresses
        .into_iter()
        .map(|a| a.as_ref().trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .collect(),
    }
  }

  pub fn contains(&self, address: &str) -> bool {
    self.addresses.contains(&address.to_lowercase())
  }

  pub fn len(&self) -> usize {
    self.addresses.len()
  }

  pub fn is_empty(&self) -> bool {
    self.addresses.is_empty()
  }
}

pub async fn run_analyzer(
  mut receiver: ScanReceiver,
  repository: Arc<dyn Repository>,
  watch_list: Arc<WatchList>,
  chain_name: &'static str,
) -> Vec<BalanceEvent> {
  info!("[Analyzer] Starting loop...");
  let mut all_events = Vec::new();

  while let Some(data) = receiver.recv().await {
    let (height, transactions) = match data {
      ScanData::Block(scanned) => (Some(scanned.block.height), scanned.transactions),
      ScanData::Transaction(tx) => (None, vec![tx]),
    };

    let events = analyze_transactions(&transactions, &watch_list);
    for event in &events {
      info!(
        "[Analyzer] {} {:?} {} | tx: {} | block: {} | amount: {:?} {}",
        event.address, event.direction, event.amount, event.tx_id, event.block_height, event.amount_decimal, chain_name
      );
    }
    all_events.extend(events);

    // rescanned blocks are older than the current progress
    if let Some(height) = height {
      match repository.get_last_processed_block(chain_name).await {
        Ok(last) if last >= height => {}
        Ok(_) => {
          if let Err(e) = repository.update_last_processed_block(chain_name, height).await {
            error!("[Analyzer] Failed to update last processed block for {} block {}: {}", chain_name, height, e);
          }
        }
        Err(e) => error!("[Analyzer] Failed to read last processed block for {}: {}", chain_name, e),
      }
    }
  }

  info!("[Analyzer] Loop finished because the channel was closed.");
  all_events
}

/// Balance events for watched addresses. Coinbase transactions carry no
/// transfer and are skipped.
pub fn analyze_transactions(transactions: &[Transaction], watch_list: &WatchList) -> Vec<BalanceEvent> {
  let mut events = Vec::new();

  for tx in transactions.iter().filter(|tx| !tx.is_coinbase) {
    let mut push = |address: &str, direction: Direction| {
      events.push(BalanceEvent {
        address: address.to_string(),
        direction,
        tx_id: tx.tx_id.clone(),
        block_height: tx.block_height,
        amount: tx.amount,
        fee: tx.fee,
        amount_decimal: to_decimal_units(tx.amount, DECIMALS),
      });
    };

    if watch_list.contains(&tx.from) {
      push(&tx.from, Direction::Outgoing);
    }
    if watch_list.contains(&tx.to) {
      push(&tx.to, Direction::Incoming);
    }
  }

  events
}
