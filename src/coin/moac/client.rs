/**
* filename : client
* author : HAMA
* date: 2025. 4. 8.
* description: MOAC node API (mc_* JSON-RPC methods)
**/

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use primitive_types::U256;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::coin::codec::{height_to_hex_param, hex_to_u256, hex_to_u64, u256_to_hex};
use crate::coin::coin_trait::BlockchainClient;
use crate::coin::moac::model::{AddrBalance, Block, BlockHeader, RawBlock, RawReceipt, RawTransaction, Transaction, SYMBOL};
use crate::registry::ChainAdapter;
use crate::signer::{TransactionSigner, ECC_CURVE_SECP256K1};
use crate::types::AppError;

pub struct MoacClient<C: BlockchainClient> {
  rpc: Arc<C>,
}

impl<C: BlockchainClient> Clone for MoacClient<C> {
  fn clone(&self) -> Self {
    Self { rpc: self.rpc.clone() }
  }
}

fn as_hex_str<'a>(value: &'a Value, method: &str) -> Result<&'a str, AppError> {
  value
    .as_str()
    .ok_or_else(|| AppError::Decode(format!("{} returned non-string result: {}", method, value)))
}

fn decode_object<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, AppError> {
  serde_json::from_value(value).map_err(|e| AppError::Decode(format!("malformed {}: {}", what, e)))
}

impl<C: BlockchainClient> MoacClient<C> {
  pub fn new(rpc: Arc<C>) -> Self {
    Self { rpc }
  }

  pub async fn get_block_height(&self) -> Result<u64, AppError> {
    let result = self.rpc.call("mc_blockNumber", vec![]).await?;
    hex_to_u64(as_hex_str(&result, "mc_blockNumber")?)
  }

  pub async fn get_block_hash(&self, height: u64) -> Result<String, AppError> {
    Ok(self.get_block_by_height(height).await?.hash)
  }

  pub async fn get_nonce(&self, address: &str) -> Result<u64, AppError> {
    let result = self
      .rpc
      .call("mc_getTransactionCount", vec![json!(address), json!("pending")])
      .await?;
    hex_to_u64(as_hex_str(&result, "mc_getTransactionCount")?)
  }

  /// Node estimate minus one. `value` is only sent when an amount is given.
  pub async fn get_gas_estimated(
    &self,
    from: &str,
    to: &str,
    gas_limit: U256,
    gas_price: U256,
    amount: Option<U256>,
  ) -> Result<U256, AppError> {
    let mut call = Map::new();
    call.insert("from".to_string(), json!(from));
    call.insert("to".to_string(), json!(to));
    call.insert("gas".to_string(), json!(u256_to_hex(gas_limit)));
    call.insert("gasPrice".to_string(), json!(u256_to_hex(gas_price)));
    if let Some(amount) = amount {
      call.insert("value".to_string(), json!(u256_to_hex(amount)));
    }

    let result = self.rpc.call("mc_estimateGas", vec![Value::Object(call)]).await?;
    let estimate = hex_to_u256(as_hex_str(&result, "mc_estimateGas")?)?;

    // the node overshoots its estimate by one unit
    estimate
      .checked_sub(U256::one())
      .ok_or_else(|| AppError::Decode("mc_estimateGas returned zero".to_string()))
  }

  pub async fn get_balance(&self, address: &str) -> Result<AddrBalance, AppError> {
    let result = self
      .rpc
      .call("mc_getBalance", vec![json!(address), json!("latest")])
      .await?;
    let balance = hex_to_u256(as_hex_str(&result, "mc_getBalance")?)
      .map_err(|e| AppError::Decode(format!("Failed to get balance of {}: {}", address, e)))?;

    Ok(AddrBalance {
      address: address.to_string(),
      balance,
    })
  }

  pub async fn get_gas_price(&self) -> Result<U256, AppError> {
    let result = self.rpc.call("mc_gasPrice", vec![]).await?;
    hex_to_u256(as_hex_str(&result, "mc_gasPrice")?)
  }

  pub async fn get_block(&self, hash: &str) -> Result<Block, AppError> {
    let result = self
      .rpc
      .call("mc_getBlockByHash", vec![json!(hash), json!(false)])
      .await?;
    if result.is_null() {
      return Err(AppError::NotFound(format!("block {}", hash)));
    }
    Block::from_raw(&decode_object::<RawBlock>(result, "block")?)
  }

  pub async fn get_block_by_height(&self, height: u64) -> Result<Block, AppError> {
    let result = self
      .rpc
      .call("mc_getBlockByNumber", vec![json!(height_to_hex_param(height)), json!(false)])
      .await?;
    if result.is_null() {
      return Err(AppError::NotFound(format!("block at height {}", height)));
    }
    Block::from_raw(&decode_object::<RawBlock>(result, "block")?)
  }

  pub async fn get_transaction(&self, tx_id: &str) -> Result<Transaction, AppError> {
    let result = self.rpc.call("mc_getTransactionByHash", vec![json!(tx_id)]).await?;
    if result.is_null() {
      return Err(AppError::NotFound(format!("transaction {}", tx_id)));
    }
    let raw: RawTransaction = decode_object(result, "transaction")?;
    self.decode_transaction(&raw).await
  }

  /// Coinbase transactions return immediately without a receipt lookup.
  /// Otherwise the receipt must be fetched for the fee; if that fails the
  /// whole transaction fails.
  pub async fn decode_transaction(&self, raw: &RawTransaction) -> Result<Transaction, AppError> {
    if raw.is_coinbase() {
      debug!("[MOAC] system transaction {:?} skipped", raw.hash);
      return Ok(Transaction::coinbase());
    }

    let tx_id = raw
      .hash
      .as_deref()
      .ok_or_else(|| AppError::Decode("transaction is missing field `hash`".to_string()))?;
    let gas_used = self.get_gas_used(tx_id).await?;
    raw.decode(gas_used)
  }

  pub async fn get_gas_used(&self, tx_id: &str) -> Result<U256, AppError> {
    let result = self.rpc.call("mc_getTransactionReceipt", vec![json!(tx_id)]).await?;
    if result.is_null() {
      return Err(AppError::NotFound(format!("receipt of transaction {}", tx_id)));
    }
    decode_object::<RawReceipt>(result, "receipt")?.gas_used()
  }

  /// Submits a `0x`-prefixed signed transaction and returns its id.
  pub async fn send_transaction(&self, raw_tx: &str) -> Result<String, AppError> {
    let result = self.rpc.call("mc_sendRawTransaction", vec![json!(raw_tx)]).await?;
    Ok(as_hex_str(&result, "mc_sendRawTransaction")?.to_string())
  }

  /// Signs `tx_hash`, lets `assemble` build the raw transaction bytes around
  /// the signature, then submits them.
  pub async fn sign_and_send<S, F>(
    &self,
    signer: &S,
    tx_hash: &[u8],
    private_key: &[u8],
    assemble: F,
  ) -> Result<String, AppError>
  where
    S: TransactionSigner + ?Sized,
    F: FnOnce(&[u8]) -> Result<Vec<u8>, AppError>,
  {
    let signature = signer.sign_transaction_hash(tx_hash, private_key, ECC_CURVE_SECP256K1)?;
    let raw = assemble(&signature)?;
    let tx_id = self.send_transaction(&format!("0x{}", hex::encode(raw))).await?;
    info!("[MOAC] submitted transaction {}", tx_id);
    Ok(tx_id)
  }
}

#[async_trait]
impl<C: BlockchainClient + 'static> ChainAdapter for MoacClient<C> {
  fn symbol(&self) -> &'static str {
    SYMBOL
  }

  async fn current_height(&self) -> Result<u64, AppError> {
    self.get_block_height().await
  }

  async fn block_header(&self, height: u64) -> Result<BlockHeader, AppError> {
    Ok(self.get_block_by_height(height).await?.block_header())
  }
}
