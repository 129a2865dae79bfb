/**
* filename : unscan
* author : HAMA
* date: 2025. 4. 8.
* description: ledger entries for blocks and transactions that failed to scan
**/

use sha2::{Digest, Sha256};

/// A block or transaction that failed during a scan pass and still has to
/// be retried. `tx_id` is empty for block-level failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnscanRecord {
  pub id: String,
  pub block_height: u64,
  pub tx_id: String,
  pub reason: String,
}

impl UnscanRecord {
  pub fn new(block_height: u64, tx_id: &str, reason: &str) -> Self {
    Self {
      id: unscan_record_id(block_height, tx_id),
      block_height,
      tx_id: tx_id.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn is_block_level(&self) -> bool {
    self.tx_id.is_empty()
  }
}

/// Hex-encoded SHA-256 of `"<height>_<txid>"`.
pub fn unscan_record_id(block_height: u64, tx_id: &str) -> String {
  let digest = Sha256::digest(format!("{}_{}", block_height, tx_id).as_bytes());
  hex::encode(digest)
}
