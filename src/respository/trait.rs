use crate::coin::moac::unscan::UnscanRecord;
use crate::types::AppError;
use async_trait::async_trait;

/// Repository trait - scan progress and the unscanned-record ledger
#[async_trait]
pub trait Repository: Send + Sync {
    /// Last block fully handed to the analyzer
    async fn get_last_processed_block(&self, chain: &str) -> Result<u64, AppError>;

    async fn update_last_processed_block(&self, chain: &str, block_number: u64) -> Result<(), AppError>;

    /// Sets the starting point unless the chain already has progress recorded
    async fn init_last_processed_block(&self, chain: &str, initial_block: u64) -> Result<(), AppError>;

    /// Upsert keyed by `record.id`; saving the same (height, txid) twice keeps one record
    async fn save_unscan_record(&self, chain: &str, record: UnscanRecord) -> Result<(), AppError>;

    /// Records ordered by block height
    async fn get_unscan_records(&self, chain: &str) -> Result<Vec<UnscanRecord>, AppError>;

    async fn delete_unscan_record(&self, chain: &str, id: &str) -> Result<(), AppError>;
}
