/**
* filename : interface
* author : HAMA
* date: 2025. 4. 6.
* description:
**/

use async_trait::async_trait;
use crate::coin::moac::model::Transaction;
use crate::types::{AppError, ScannedBlock};

#[async_trait]
pub trait BlockFetcher: Send + Sync {
  async fn current_height(&self) -> Result<u64, AppError>;
  /// Block-level failures are errors; per-transaction failures are reported
  /// in `ScannedBlock::unscanned`.
  async fn fetch_block(&self, block_number: u64) -> Result<ScannedBlock, AppError>;
  async fn fetch_transaction(&self, tx_id: &str) -> Result<Transaction, AppError>;
  fn chain_name(&self) -> &'static str;
}
