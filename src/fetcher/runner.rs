/**
* filename : runner
* author : HAMA
* date: 2025. 4. 6.
* description:
**/

use crate::coin::moac::unscan::UnscanRecord;
use crate::fetcher::fetcher::BlockFetcher;
use crate::respository::Repository;
use crate::types::{AppError, ScanData, ScanSender};

use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::time::{interval, Duration};

/// Outcome of trying to scan one height.
#[derive(Debug, PartialEq, Eq)]
pub enum BlockOutcome {
  /// Block went to the analyzer (possibly with some unscanned transactions).
  Scanned,
  /// Block could not be decoded; a block-level unscan record was stored.
  Recorded,
}

pub async fn run_fetcher<F: BlockFetcher + 'static>(
  fetcher: Arc<F>,
  repository: Arc<dyn Repository>,
  sender: ScanSender,
  mut current_block_number: u64,
  interval_duration: Duration,
) {
  let mut tick = interval(interval_duration);
  info!(
        "[{} Fetcher] Starting from block {} with interval {:?}",
        fetcher.chain_name(),
        current_block_number,
        interval_duration
    );

  loop {
    tick.tick().await;

    if let Err(e) = rescan_failed_records(fetcher.as_ref(), repository.as_ref(), &sender).await {
      warn!("[{} Fetcher] Rescan of failed records aborted: {}", fetcher.chain_name(), e);
      if matches!(e, AppError::SendError(_)) {
        break;
      }
    }

    let tip = match fetcher.current_height().await {
      Ok(tip) => tip,
      Err(e) => {
        warn!("[{} Fetcher] Failed to get chain height: {}", fetcher.chain_name(), e);
        continue;
      }
    };

    while current_block_number <= tip {
      match scan_block(fetcher.as_ref(), repository.as_ref(), &sender, current_block_number).await {
        Ok(outcome) => {
          debug!("[{} Fetcher] Block #{} {:?}", fetcher.chain_name(), current_block_number, outcome);
          current_block_number += 1;
        }
        Err(AppError::SendError(e)) => {
          error!("[{} Fetcher] Analyzer channel closed: {}", fetcher.chain_name(), e);
          warn!("[{} Fetcher] Loop exited.", fetcher.chain_name());
          return;
        }
        Err(e) => {
          let retry_delay = interval_duration / 2;
          warn!(
            "[{} Fetcher] Block #{} fetch failed: {} | retrying in {:?}",
            fetcher.chain_name(),
            current_block_number,
            e,
            retry_delay
          );
          // keep the height; retry it after half an interval
          tokio::time::sleep(retry_delay).await;
          break;
        }
      }
    }
  }

  warn!("[{} Fetcher] Loop exited.", fetcher.chain_name());
}

/// Fetches one block and forwards it. Transport and node errors are
/// returned so the caller retries the same height; a block that arrives but
/// cannot be decoded is recorded and skipped.
pub async fn scan_block<F: BlockFetcher + ?Sized>(
  fetcher: &F,
  repository: &dyn Repository,
  sender: &ScanSender,
  block_number: u64,
) -> Result<BlockOutcome, AppError> {
  info!("[{} Fetcher] Fetching block #{}", fetcher.chain_name(), block_number);

  let scanned = match fetcher.fetch_block(block_number).await {
    Ok(scanned) => scanned,
    Err(AppError::Decode(reason)) => {
      warn!("[{} Fetcher] Block #{} undecodable: {}", fetcher.chain_name(), block_number, reason);
      let record = UnscanRecord::new(block_number, "", &reason);
      repository.save_unscan_record(fetcher.chain_name(), record).await?;
      return Ok(BlockOutcome::Recorded);
    }
    Err(e) => return Err(e),
  };

  for record in &scanned.unscanned {
    repository.save_unscan_record(fetcher.chain_name(), record.clone()).await?;
  }

  info!(
    "[{} Fetcher] Block #{} fetched: {} transactions, {} unscanned",
    fetcher.chain_name(),
    block_number,
    scanned.transactions.len(),
    scanned.unscanned.len()
  );
  sender.send(ScanData::Block(scanned)).await?;
  Ok(BlockOutcome::Scanned)
}

/// Retries every stored unscan record once. Records that now succeed are
/// deleted and their data forwarded; failures keep the record with the new
/// reason. Returns how many records were recovered.
pub async fn rescan_failed_records<F: BlockFetcher + ?Sized>(
  fetcher: &F,
  repository: &dyn Repository,
  sender: &ScanSender,
) -> Result<usize, AppError> {
  let chain = fetcher.chain_name();
  let records = repository.get_unscan_records(chain).await?;
  let mut recovered = 0;

  for record in records {
    let result = if record.is_block_level() {
      fetcher.fetch_block(record.block_height).await.map(ScanData::Block)
    } else {
      fetcher.fetch_transaction(&record.tx_id).await.map(ScanData::Transaction)
    };

    match result {
      Ok(data) => {
        if let ScanData::Block(scanned) = &data {
          for unscanned in &scanned.unscanned {
            repository.save_unscan_record(chain, unscanned.clone()).await?;
          }
        }
        repository.delete_unscan_record(chain, &record.id).await?;
        sender.send(data).await?;
        recovered += 1;
        info!("[{} Fetcher] Recovered block #{} tx {:?}", chain, record.block_height, record.tx_id);
      }
      Err(e) => {
        debug!("[{} Fetcher] Still failing block #{} tx {:?}: {}", chain, record.block_height, record.tx_id, e);
        let updated = UnscanRecord::new(record.block_height, &record.tx_id, &e.to_string());
        repository.save_unscan_record(chain, updated).await?;
      }
    }
  }

  Ok(recovered)
}
