mod common;

use std::sync::Arc;

use common::{raw_block, raw_transfer, receipt, MockNode, ALICE, BOB};
use moacchain_adapter::coin::moac::client::MoacClient;
use moacchain_adapter::coin::moac::model::{SYSTEM_RECEIVER, SYSTEM_SENDER};
use moacchain_adapter::registry::{AssetRegistry, ChainAdapter};
use moacchain_adapter::signer::Secp256k1Signer;
use moacchain_adapter::types::AppError;
use primitive_types::U256;
use serde_json::json;

const TXID: &str = "0x448c135168ed2b2c387ecde805fe3beef8b4a906fd727152dbf6f01d91dd1760";

fn client(node: &Arc<MockNode>) -> MoacClient<MockNode> {
  MoacClient::new(node.clone())
}

#[tokio::test]
pub async fn transaction_fee_is_gas_used_times_gas_price() -> eyre::Result<()> {
  let node = Arc::new(MockNode::new());
  node.result("mc_getTransactionByHash", Some(json!(TXID)), raw_transfer(TXID, ALICE, BOB));
  node.result("mc_getTransactionReceipt", Some(json!(TXID)), receipt("0x5208"));

  let tx = client(&node).get_transaction(TXID).await?;

  assert!(!tx.is_coinbase);
  assert_eq!(tx.tx_id, TXID);
  assert_eq!(tx.fee, U256::from(21_000u64) * U256::from(20_000_000_000u64));
  assert_eq!(tx.amount, U256::from(2_000_000_000_000_000_000u64));
  assert_eq!(tx.from, ALICE);
  assert_eq!(tx.to, BOB);
  assert_eq!(tx.block_height, 2760283);
  assert_eq!(tx.status, "");
  Ok(())
}

#[tokio::test]
pub async fn system_sender_is_coinbase_without_receipt_lookup() -> eyre::Result<()> {
  let node = Arc::new(MockNode::new());
  node.result("mc_getTransactionByHash", Some(json!(TXID)), raw_transfer(TXID, SYSTEM_SENDER, BOB));

  let tx = client(&node).get_transaction(TXID).await?;

  assert!(tx.is_coinbase);
  assert_eq!(tx.tx_id, "");
  assert_eq!(tx.fee, U256::zero());
  assert_eq!(tx.amount, U256::zero());
  assert_eq!(tx.from, "");
  assert_eq!(node.calls_to("mc_getTransactionReceipt"), 0);
  Ok(())
}

#[tokio::test]
pub async fn system_receiver_and_zero_signature_are_coinbase() -> eyre::Result<()> {
  let node = Arc::new(MockNode::new());
  node.result("mc_getTransactionByHash", Some(json!("0x1")), raw_transfer("0x1", ALICE, SYSTEM_RECEIVER));

  let mut unsigned = raw_transfer("0x2", ALICE, BOB);
  unsigned["v"] = json!("0x0");
  unsigned["r"] = json!("0x0");
  unsigned["s"] = json!("0x0");
  node.result("mc_getTransactionByHash", Some(json!("0x2")), unsigned);

  let moac = client(&node);
  assert!(moac.get_transaction("0x1").await?.is_coinbase);
  assert!(moac.get_transaction("0x2").await?.is_coinbase);
  assert_eq!(node.calls_to("mc_getTransactionReceipt"), 0);
  Ok(())
}

#[tokio::test]
pub async fn missing_receipt_fails_whole_transaction() {
  let node = Arc::new(MockNode::new());
  node.result("mc_getTransactionByHash", Some(json!(TXID)), raw_transfer(TXID, ALICE, BOB));
  node.result("mc_getTransactionReceipt", Some(json!(TXID)), json!(null));

  let result = client(&node).get_transaction(TXID).await;
  assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
pub async fn receipt_transport_failure_fails_whole_transaction() {
  let node = Arc::new(MockNode::new());
  node.result("mc_getTransactionByHash", Some(json!(TXID)), raw_transfer(TXID, ALICE, BOB));

  let result = client(&node).get_transaction(TXID).await;
  assert!(matches!(result, Err(AppError::Transport(_))));
}

#[tokio::test]
pub async fn unknown_transaction_is_not_found() {
  let node = Arc::new(MockNode::new());
  node.result("mc_getTransactionByHash", Some(json!(TXID)), json!(null));

  assert!(matches!(client(&node).get_transaction(TXID).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
pub async fn block_by_height_uses_hex_param_and_keeps_order() -> eyre::Result<()> {
  let node = Arc::new(MockNode::new());
  node.result(
    "mc_getBlockByNumber",
    Some(json!("0x2a1e5b")),
    raw_block("0x2a1e5b", &["0x03", "0x01", "0x02"]),
  );

  let moac = client(&node);
  let block = moac.get_block_by_height(2760283).await?;

  assert_eq!(block.height, 2760283);
  assert_eq!(block.timestamp, 0x5c4a3b21);
  assert_eq!(block.transactions, vec!["0x03", "0x01", "0x02"]);

  let (method, params) = &node.calls()[0];
  assert_eq!(method, "mc_getBlockByNumber");
  assert_eq!(params, &vec![json!("0x2a1e5b"), json!(false)]);

  assert_eq!(moac.get_block_hash(2760283).await?, block.hash);
  Ok(())
}

#[tokio::test]
pub async fn block_by_hash_and_node_errors() -> eyre::Result<()> {
  let node = Arc::new(MockNode::new());
  node.result("mc_getBlockByHash", Some(json!("0xb10c")), raw_block("0x10", &[]));
  node.reply(
    "mc_getBlockByNumber",
    Some(json!("0xffffff")),
    json!({ "result": null, "error": { "code": -8, "message": "Block height out of range" }, "id": "101" }),
  );
  node.reply("mc_getBlockByNumber", Some(json!("0xfffffe")), json!({}));

  let moac = client(&node);
  assert_eq!(moac.get_block("0xb10c").await?.height, 16);

  let err = moac.get_block_by_height(0xffffff).await.unwrap_err();
  assert_eq!(err.to_string(), "[-8]Block height out of range");

  assert!(matches!(moac.get_block_by_height(0xfffffe).await, Err(AppError::EmptyResponse)));
  Ok(())
}

#[tokio::test]
pub async fn gas_estimate_is_reduced_by_one() -> eyre::Result<()> {
  let node = Arc::new(MockNode::new());
  node.result("mc_estimateGas", Some(json!({
    "from": ALICE, "to": BOB, "gas": "0x2710", "gasPrice": "0xb5e620f48000"
  })), json!("0x5209"));
  node.result("mc_estimateGas", Some(json!({
    "from": ALICE, "to": BOB, "gas": "0x2710", "gasPrice": "0xb5e620f48000", "value": "0x1bc16d674ec80000"
  })), json!("0x5209"));

  let moac = client(&node);
  let gas_limit = U256::from(10_000u64);
  let gas_price = U256::from(200_000_000_000_000u64);

  let without_value = moac.get_gas_estimated(ALICE, BOB, gas_limit, gas_price, None).await?;
  let with_value = moac
    .get_gas_estimated(ALICE, BOB, gas_limit, gas_price, Some(U256::from(2_000_000_000_000_000_000u64)))
    .await?;

  assert_eq!(without_value, U256::from(21000u64));
  assert_eq!(with_value, U256::from(21000u64));

  let calls = node.calls();
  assert!(calls[0].1[0].get("value").is_none());
  assert_eq!(calls[1].1[0]["value"], json!("0x1bc16d674ec80000"));
  Ok(())
}

#[tokio::test]
pub async fn account_queries() -> eyre::Result<()> {
  let node = Arc::new(MockNode::new());
  node.result("mc_blockNumber", None, json!("0x2a1e5b"));
  node.result("mc_getBalance", Some(json!(ALICE)), json!("0xde0b6b3a7640000"));
  node.result("mc_getTransactionCount", Some(json!(ALICE)), json!("0x1f"));
  node.result("mc_gasPrice", None, json!("0x4a817c800"));
  node.result("mc_getBalance", Some(json!(BOB)), json!("not-hex"));

  let moac = client(&node);
  assert_eq!(moac.get_block_height().await?, 2760283);
  assert_eq!(moac.get_nonce(ALICE).await?, 31);
  assert_eq!(moac.get_gas_price().await?, U256::from(20_000_000_000u64));

  let balance = moac.get_balance(ALICE).await?;
  assert_eq!(balance.address, ALICE);
  assert_eq!(balance.balance, U256::from(1_000_000_000_000_000_000u64));

  assert!(matches!(moac.get_balance(BOB).await, Err(AppError::Decode(_))));

  let calls = node.calls();
  let balance_call = calls.iter().find(|(m, _)| m == "mc_getBalance").unwrap();
  assert_eq!(balance_call.1[1], json!("latest"));
  let nonce_call = calls.iter().find(|(m, _)| m == "mc_getTransactionCount").unwrap();
  assert_eq!(nonce_call.1[1], json!("pending"));
  Ok(())
}

#[tokio::test]
pub async fn sign_and_send_submits_hex_encoded_raw_bytes() -> eyre::Result<()> {
  let node = Arc::new(MockNode::new());
  node.result("mc_sendRawTransaction", Some(json!("0xf86b0102")), json!(TXID));

  let signer = Secp256k1Signer::new();
  let tx_id = client(&node)
    .sign_and_send(&signer, &[7u8; 32], &[0x11; 32], |signature| {
      assert_eq!(signature.len(), 65);
      Ok(vec![0xf8, 0x6b, 0x01, 0x02])
    })
    .await?;

  assert_eq!(tx_id, TXID);
  Ok(())
}

#[tokio::test]
pub async fn registry_projects_block_headers() -> eyre::Result<()> {
  let node = Arc::new(MockNode::new());
  node.result("mc_blockNumber", None, json!("0x2a1e5b"));
  node.result("mc_getBlockByNumber", Some(json!("0x2a1e5b")), raw_block("0x2a1e5b", &[]));

  let mut registry = AssetRegistry::new();
  registry.register(Arc::new(client(&node)))?;
  assert!(matches!(registry.register(Arc::new(client(&node))), Err(AppError::Registry(_))));
  assert_eq!(registry.symbols(), vec!["MOAC"]);

  let adapter = registry.get("moac").unwrap();
  let tip = adapter.current_height().await?;
  let header = adapter.block_header(tip).await?;
  assert_eq!(header.height, 2760283);
  assert_eq!(header.symbol, "MOAC");
  assert_eq!(header.time, 0x5c4a3b21);
  Ok(())
}
