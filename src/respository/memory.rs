use crate::coin::moac::unscan::UnscanRecord;
use crate::respository::r#trait::Repository;
use crate::types::AppError;
use async_trait::async_trait;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory Repository
#[derive(Clone)]
pub struct MemoryRepository {
    // chain_name -> last_processed_block
    last_processed_blocks: Arc<RwLock<HashMap<String, u64>>>,

    // (chain_name, record id) -> record
    unscan_records: Arc<RwLock<HashMap<(String, String), UnscanRecord>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            last_processed_blocks: Arc::new(RwLock::new(HashMap::new())),
            unscan_records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn get_last_processed_block(&self, chain: &str) -> Result<u64, AppError> {
        let blocks = self.last_processed_blocks.read().await;
        Ok(blocks.get(chain).copied().unwrap_or(0))
    }

    async fn update_last_processed_block(&self, chain: &str, block_number: u64) -> Result<(), AppError> {
        let mut blocks = self.last_processed_blocks.write().await;
        blocks.insert(chain.to_string(), block_number);
        Ok(())
    }

    async fn init_last_processed_block(&self, chain: &str, initial_block: u64) -> Result<(), AppError> {
        let mut blocks = self.last_processed_blocks.write().await;

        if let Some(existing) = blocks.get(chain).copied().filter(|b| *b != 0) {
            info!("{} already has last processed block: {}, skipping initialization", chain, existing);
            return Ok(());
        }

        let init_block = initial_block.saturating_sub(1);
        blocks.insert(chain.to_string(), init_block);
        info!("Initialized {} last processed block to {} (will start from block {})", chain, init_block, initial_block);
        Ok(())
    }

    async fn save_unscan_record(&self, chain: &str, record: UnscanRecord) -> Result<(), AppError> {
        let mut records = self.unscan_records.write().await;
        records.insert((chain.to_string(), record.id.clone()), record);
        Ok(())
    }

    async fn get_unscan_records(&self, chain: &str) -> Result<Vec<UnscanRecord>, AppError> {
        let records = self.unscan_records.read().await;
        let mut list: Vec<UnscanRecord> = records
            .iter()
            .filter(|((c, _), _)| c == chain)
            .map(|(_, r)| r.clone())
            .collect();
        list.sort_by(|a, b| a.block_height.cmp(&b.block_height).then_with(|| a.tx_id.cmp(&b.tx_id)));
        Ok(list)
    }

    async fn delete_unscan_record(&self, chain: &str, id: &str) -> Result<(), AppError> {
        let mut records = self.unscan_records.write().await;
        records.remove(&(chain.to_string(), id.to_string()));
        Ok(())
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}
