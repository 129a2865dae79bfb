/**
* filename : registry
* author : HAMA
* date: 2025. 4. 9.
* description: explicit registration of chain adapters with the scanning host
**/

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::coin::moac::model::BlockHeader;
use crate::types::AppError;

/// What the host needs from a chain: its symbol, the tip and block headers.
#[async_trait]
pub trait ChainAdapter: Send + Sync {
  fn symbol(&self) -> &'static str;
  async fn current_height(&self) -> Result<u64, AppError>;
  async fn block_header(&self, height: u64) -> Result<BlockHeader, AppError>;
}

#[derive(Default)]
pub struct AssetRegistry {
  adapters: HashMap<String, Arc<dyn ChainAdapter>>,
}

impl AssetRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, adapter: Arc<dyn ChainAdapter>) -> Result<(), AppError> {
    let symbol = adapter.symbol().to_uppercase();
    if self.adapters.contains_key(&symbol) {
      return Err(AppError::Registry(format!("{} is already registered", symbol)));
    }
    info!("[Registry] {} wallet manager loaded", symbol);
    self.adapters.insert(symbol, adapter);
    Ok(())
  }

  pub fn get(&self, symbol: &str) -> Option<Arc<dyn ChainAdapter>> {
    self.adapters.get(&symbol.to_uppercase()).cloned()
  }

  pub fn symbols(&self) -> Vec<String> {
    let mut symbols: Vec<String> = self.adapters.keys().cloned().collect();
    symbols.sort();
    symbols
  }
}
