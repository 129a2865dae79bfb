//! MOAC node adapter: JSON-RPC client, block/transaction decoding and the
//! unscanned-record ledger used to resume chain scanning.

pub mod analyzer;
pub mod coin;
pub mod config;
pub mod fetcher;
pub mod registry;
pub mod respository;
pub mod shutdown;
pub mod signer;
pub mod tasks;
pub mod types;
