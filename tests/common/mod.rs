#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use moacchain_adapter::coin::coin_trait::BlockchainClient;
use moacchain_adapter::coin::rpc::classify_response;
use moacchain_adapter::types::AppError;
use serde_json::{json, Value};

pub const ALICE: &str = "0x25ff183be76c9583db211e66dbd481a923f40635";
pub const BOB: &str = "0x39aa046cf77c2877cc5f42e0224c27969b3ad8d9";

/// Canned node: replies are full JSON-RPC envelopes keyed by method and the
/// first parameter, so error classification runs exactly as over HTTP.
#[derive(Default)]
pub struct MockNode {
  responses: Mutex<HashMap<(String, String), Value>>,
  calls: Mutex<Vec<(String, Vec<Value>)>>,
}

fn key_of(method: &str, first: Option<&Value>) -> (String, String) {
  let first = match first {
    Some(Value::String(s)) => s.clone(),
    Some(other) => other.to_string(),
    None => String::new(),
  };
  (method.to_string(), first)
}

impl MockNode {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn reply(&self, method: &str, first_param: Option<Value>, envelope: Value) {
    self
      .responses
      .lock()
      .unwrap()
      .insert(key_of(method, first_param.as_ref()), envelope);
  }

  pub fn result(&self, method: &str, first_param: Option<Value>, result: Value) {
    self.reply(method, first_param, json!({ "jsonrpc": "2.0", "id": "1", "result": result }));
  }

  pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
    self.calls.lock().unwrap().clone()
  }

  pub fn calls_to(&self, method: &str) -> usize {
    self.calls().iter().filter(|(m, _)| m == method).count()
  }
}

#[async_trait]
impl BlockchainClient for MockNode {
  async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, AppError> {
    self.calls.lock().unwrap().push((method.to_string(), params.clone()));
    let envelope = self
      .responses
      .lock()
      .unwrap()
      .get(&key_of(method, params.first()))
      .cloned()
      .ok_or_else(|| AppError::Transport(format!("connection refused ({})", method)))?;
    classify_response(envelope)
  }
}

pub fn raw_transfer(hash: &str, from: &str, to: &str) -> Value {
  json!({
    "hash": hash,
    "blockHash": "0x7d1e1bd1d7a0b9b5c3d6e3a1f4c2b8e9d0a1b2c3d4e5f60718293a4b5c6d7e8f",
    "blockNumber": "0x2a1e5b",
    "from": from,
    "to": to,
    "gas": "0x2710",
    "gasPrice": "0x4a817c800",
    "value": "0x1bc16d674ec80000",
    "nonce": "0x3",
    "input": "0x",
    "v": "0xea",
    "r": "0x8f1b1bd1d7a0b9b5c3d6e3a1f4c2b8e9d0a1b2c3d4e5f60718293a4b5c6d7e8f",
    "s": "0x2c1e1bd1d7a0b9b5c3d6e3a1f4c2b8e9d0a1b2c3d4e5f60718293a4b5c6d7e8f"
  })
}

pub fn raw_block(number: &str, transactions: &[&str]) -> Value {
  json!({
    "hash": "0x7d1e1bd1d7a0b9b5c3d6e3a1f4c2b8e9d0a1b2c3d4e5f60718293a4b5c6d7e8f",
    "parentHash": "0x5a0b1bd1d7a0b9b5c3d6e3a1f4c2b8e9d0a1b2c3d4e5f60718293a4b5c6d7e8f",
    "transactionsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
    "timestamp": "0x5c4a3b21",
    "number": number,
    "transactions": transactions
  })
}

pub fn receipt(gas_used: &str) -> Value {
  json!({ "transactionHash": "0x0", "gasUsed": gas_used, "status": "0x1" })
}
