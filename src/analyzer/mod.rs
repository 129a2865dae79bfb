mod analyzer;
pub mod types;
pub mod utils;

pub use analyzer::{analyze_transactions, run_analyzer, WatchList};
pub use types::{BalanceEvent, Direction};
