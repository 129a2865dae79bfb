/**
* filename : rpc
* author : HAMA
* date: 2025. 4. 7.
* description: JSON-RPC 2.0 over HTTP POST
**/

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::coin::coin_trait::BlockchainClient;
use crate::types::AppError;

#[derive(Serialize, Debug)]
pub struct RpcRequest<'a> {
  pub jsonrpc: &'static str,
  pub id: String,
  pub method: &'a str,
  pub params: Vec<Value>,
}

pub struct JsonRpcClient {
  client: Client,
  api_url: String,
  access_token: Option<String>,
  debug: bool,
  next_id: AtomicU64,
}

impl JsonRpcClient {
  pub fn new(api_url: String, access_token: Option<String>, debug: bool) -> Self {
    Self::with_client(Client::new(), api_url, access_token, debug)
  }

  /// Uses a pre-built reqwest client, e.g. one configured with timeouts.
  pub fn with_client(client: Client, api_url: String, access_token: Option<String>, debug: bool) -> Self {
    Self {
      client,
      api_url,
      access_token,
      debug,
      next_id: AtomicU64::new(1),
    }
  }
}

#[async_trait]
impl BlockchainClient for JsonRpcClient {
  async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, AppError> {
    let request = RpcRequest {
      jsonrpc: "2.0",
      id: self.next_id.fetch_add(1, Ordering::Relaxed).to_string(),
      method,
      params,
    };

    if self.debug {
      info!("[RPC] Start request {} (id {})", method, request.id);
    }

    let mut builder = self
      .client
      .post(&self.api_url)
      .header("Accept", "application/json")
      .json(&request);

    if let Some(token) = &self.access_token {
      builder = builder.header("Authorization", format!("Basic {}", token));
    }

    let response = builder.send().await?;
    let bytes = response.bytes().await?;

    if self.debug {
      info!("[RPC] Request {} completed", method);
      debug!("[RPC] {}", String::from_utf8_lossy(&bytes));
    }

    let body: Value = serde_json::from_slice(&bytes)
      .map_err(|e| AppError::Transport(format!("unparseable response body: {}", e)))?;

    classify_response(body)
  }
}

/// Splits a JSON-RPC envelope into its result or the matching error.
///
/// An `error` object wins over everything else. A body without an `error`
/// object must carry a `result` key (which may be `null`); otherwise the
/// response is treated as empty.
pub fn classify_response(mut body: Value) -> Result<Value, AppError> {
  if let Some(error) = body.get("error").filter(|e| e.is_object()) {
    let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
    let message = error
      .get("message")
      .and_then(Value::as_str)
      .unwrap_or_default()
      .to_string();
    return Err(AppError::Node { code, message });
  }

  match body.get_mut("result") {
    Some(result) => Ok(result.take()),
    None => Err(AppError::EmptyResponse),
  }
}

/// Base64 of `username:password` for the `Authorization: Basic` header (RFC 2617).
pub fn basic_auth(username: &str, password: &str) -> String {
  base64::encode(format!("{}:{}", username, password))
}
