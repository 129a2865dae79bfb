use primitive_types::U256;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Watched address received `amount`
    Incoming,
    /// Watched address sent `amount` and paid `fee`
    Outgoing,
}

/// A balance change of a watched address caused by one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceEvent {
    pub address: String,
    pub direction: Direction,
    pub tx_id: String,
    pub block_height: u64,
    pub amount: U256,
    pub fee: U256,
    pub amount_decimal: Option<Decimal>,
}
