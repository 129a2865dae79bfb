/**
* filename : model
* author : HAMA
* date: 2025. 4. 7.
* description: MOAC wire objects and the domain types decoded from them
**/

use primitive_types::U256;
use serde::Deserialize;
use serde_json::Value;

use crate::coin::codec::{hex_to_u256, hex_to_u64};
use crate::types::AppError;

pub const SYMBOL: &str = "MOAC";
pub const DECIMALS: u32 = 18;

/// Sender of node-internal system transactions.
pub const SYSTEM_SENDER: &str = "0x0000000000000000000000000000000000000064";
/// Receiver of node-internal system transactions.
pub const SYSTEM_RECEIVER: &str = "0x0000000000000000000000000000000000000065";

const ZERO_QUANTITY: &str = "0x0";

// ====== Wire objects ======

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
  pub hash: Option<String>,
  pub parent_hash: Option<String>,
  pub transactions_root: Option<String>,
  pub timestamp: Option<String>,
  pub number: Option<String>,
  #[serde(default)]
  pub transactions: Vec<Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
  pub hash: Option<String>,
  pub block_hash: Option<String>,
  pub block_number: Option<String>,
  pub from: Option<String>,
  pub to: Option<String>,
  pub gas_price: Option<String>,
  pub value: Option<String>,
  pub v: Option<String>,
  pub r: Option<String>,
  pub s: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
  pub gas_used: Option<String>,
}

fn required<'a>(field: &'a Option<String>, name: &str, object: &str) -> Result<&'a str, AppError> {
  field
    .as_deref()
    .ok_or_else(|| AppError::Decode(format!("{} is missing field `{}`", object, name)))
}

// ====== Domain objects ======

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
  /// Block signature on MOAC, used the way other chains use a block hash.
  pub hash: String,
  pub prev_block_hash: String,
  pub transaction_merkle_root: String,
  pub timestamp: u64,
  pub height: u64,
  pub transactions: Vec<String>,
}

impl Block {
  /// Decodes a summarized block body (`fullTransactions = false`).
  pub fn from_raw(raw: &RawBlock) -> Result<Self, AppError> {
    let transactions = raw
      .transactions
      .iter()
      .map(|tx| match tx {
        Value::String(id) => Ok(id.clone()),
        Value::Object(obj) => obj
          .get("hash")
          .and_then(Value::as_str)
          .map(str::to_string)
          .ok_or_else(|| AppError::Decode("block transaction object without hash".to_string())),
        other => Err(AppError::Decode(format!("unexpected block transaction entry: {}", other))),
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      hash: required(&raw.hash, "hash", "block")?.to_string(),
      prev_block_hash: raw.parent_hash.clone().unwrap_or_default(),
      transaction_merkle_root: required(&raw.transactions_root, "transactionsRoot", "block")?.to_string(),
      timestamp: hex_to_u64(required(&raw.timestamp, "timestamp", "block")?)?,
      height: hex_to_u64(required(&raw.number, "number", "block")?)?,
      transactions,
    })
  }

  pub fn block_header(&self) -> BlockHeader {
    BlockHeader {
      hash: self.hash.clone(),
      merkle_root: self.transaction_merkle_root.clone(),
      previous_block_hash: self.prev_block_hash.clone(),
      height: self.height,
      time: self.timestamp,
      symbol: SYMBOL.to_string(),
    }
  }
}

/// Chain-agnostic header handed to the scanning host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
  pub hash: String,
  pub merkle_root: String,
  pub previous_block_hash: String,
  pub height: u64,
  pub time: u64,
  pub symbol: String,
}

/// A decoded transaction. When `is_coinbase` is set every other field is
/// left at its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
  pub is_coinbase: bool,
  pub tx_id: String,
  pub fee: U256,
  pub from: String,
  pub to: String,
  pub amount: U256,
  pub block_height: u64,
  pub block_hash: String,
  pub status: String,
}

impl Transaction {
  pub fn coinbase() -> Self {
    Self {
      is_coinbase: true,
      ..Default::default()
    }
  }
}

impl RawTransaction {
  /// System transaction checks, applied in order: reserved sender, reserved
  /// receiver, then an all-zero `(v, r, s)` signature.
  pub fn is_coinbase(&self) -> bool {
    self.from.as_deref() == Some(SYSTEM_SENDER)
      || self.to.as_deref() == Some(SYSTEM_RECEIVER)
      || (self.v.as_deref() == Some(ZERO_QUANTITY)
        && self.r.as_deref() == Some(ZERO_QUANTITY)
        && self.s.as_deref() == Some(ZERO_QUANTITY))
  }

  /// Builds a non-coinbase transaction. `gas_used` comes from the receipt.
  /// A contract creation has no `to` and decodes with an empty one.
  pub fn decode(&self, gas_used: U256) -> Result<Transaction, AppError> {
    let gas_price = hex_to_u256(required(&self.gas_price, "gasPrice", "transaction")?)?;
    let fee = gas_used
      .checked_mul(gas_price)
      .ok_or_else(|| AppError::Decode("fee overflows 256 bits".to_string()))?;

    Ok(Transaction {
      is_coinbase: false,
      tx_id: required(&self.hash, "hash", "transaction")?.to_string(),
      fee,
      from: required(&self.from, "from", "transaction")?.to_string(),
      to: self.to.clone().unwrap_or_default(),
      amount: hex_to_u256(required(&self.value, "value", "transaction")?)?,
      block_height: hex_to_u64(required(&self.block_number, "blockNumber", "transaction")?)?,
      block_hash: required(&self.block_hash, "blockHash", "transaction")?.to_string(),
      status: String::new(),
    })
  }
}

impl RawReceipt {
  pub fn gas_used(&self) -> Result<U256, AppError> {
    hex_to_u256(required(&self.gas_used, "gasUsed", "receipt")?)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddrBalance {
  pub address: String,
  pub balance: U256,
}
