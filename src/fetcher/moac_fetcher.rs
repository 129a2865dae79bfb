/**
* filename : moac_fetcher
* author : HAMA
* date: 2025. 4. 8.
* description:
**/

use crate::coin::coin_trait::BlockchainClient;
use crate::coin::moac::client::MoacClient;
use crate::coin::moac::model::{Transaction, SYMBOL};
use crate::coin::moac::unscan::UnscanRecord;
use crate::fetcher::fetcher::BlockFetcher;
use crate::types::{AppError, ScannedBlock};

use async_trait::async_trait;
use log::warn;

pub struct MoacFetcher<C: BlockchainClient> {
  pub client: MoacClient<C>,
}

#[async_trait]
impl<C: BlockchainClient + 'static> BlockFetcher for MoacFetcher<C> {
  async fn current_height(&self) -> Result<u64, AppError> {
    self.client.get_block_height().await
  }

  async fn fetch_block(&self, block_number: u64) -> Result<ScannedBlock, AppError> {
    let block = self.client.get_block_by_height(block_number).await?;

    let mut transactions = Vec::with_capacity(block.transactions.len());
    let mut unscanned = Vec::new();

    for tx_id in &block.transactions {
      match self.client.get_transaction(tx_id).await {
        Ok(tx) => transactions.push(tx),
        Err(e) => {
          warn!("[{} Fetcher] tx {} in block #{} not scanned: {}", SYMBOL, tx_id, block.height, e);
          unscanned.push(UnscanRecord::new(block.height, tx_id, &e.to_string()));
        }
      }
    }

    Ok(ScannedBlock { block, transactions, unscanned })
  }

  async fn fetch_transaction(&self, tx_id: &str) -> Result<Transaction, AppError> {
    self.client.get_transaction(tx_id).await
  }

  fn chain_name(&self) -> &'static str {
    SYMBOL
  }
}
