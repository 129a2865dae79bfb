/**
* filename : coin_trait
* author : HAMA
* date: 2025. 4. 7.
* description: JSON-RPC call seam shared by chain clients
**/

use async_trait::async_trait;
use serde_json::Value;

use crate::types::AppError;

/// A JSON-RPC endpoint. `call` returns the `result` member of a successful
/// response; node errors and malformed envelopes come back as `AppError`.
#[async_trait]
pub trait BlockchainClient: Send + Sync {
  async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, AppError>;
}
