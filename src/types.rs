use crate::coin::moac::model::{Block, Transaction};
use crate::coin::moac::unscan::UnscanRecord;
use tokio::sync::mpsc::{Sender, Receiver};

// ====== Scanned block (decoded block + its transactions) ======
#[derive(Debug, Clone)]
pub struct ScannedBlock {
  pub block: Block,
  pub transactions: Vec<Transaction>,
  /// Transactions of this block that failed to decode.
  pub unscanned: Vec<UnscanRecord>,
}

// ====== ScanData (new block or a recovered transaction) ======
#[derive(Debug)]
pub enum ScanData {
  Block(ScannedBlock),
  Transaction(Transaction),
}

// ====== Channel aliases ======
pub type ScanSender = Sender<ScanData>;
pub type ScanReceiver = Receiver<ScanData>;

// ====== Unified Error Type ======
#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("Transport error: {0}")]
  Transport(String),

  #[error("[{code}]{message}")]
  Node { code: i64, message: String },

  #[error("Response is empty!")]
  EmptyResponse,

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Decode error: {0}")]
  Decode(String),

  #[error("Channel send error: {0}")]
  SendError(String),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Initialization error: {0}")]
  Initialization(String),

  #[error("Signer error: {0}")]
  Signer(String),

  #[error("Registry error: {0}")]
  Registry(String),
}

// ====== Error Conversions (From impls) ======

impl From<reqwest::Error> for AppError {
  fn from(err: reqwest::Error) -> Self {
    AppError::Transport(format!("Reqwest error: {}", err))
  }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for AppError {
  fn from(err: tokio::sync::mpsc::error::SendError<T>) -> Self {
    AppError::SendError(format!("Channel send failed: {}", err))
  }
}

impl From<std::io::Error> for AppError {
  fn from(err: std::io::Error) -> Self {
    AppError::Initialization(format!("IO error: {}", err))
  }
}

impl From<serde_json::Error> for AppError {
  fn from(err: serde_json::Error) -> Self {
    AppError::Decode(format!("JSON decode error: {}", err))
  }
}

impl From<config::ConfigError> for AppError {
  fn from(err: config::ConfigError) -> Self {
    AppError::Config(err.to_string())
  }
}
