use serde::Deserialize;

use crate::coin::rpc::basic_auth;
use crate::types::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
  pub moac: ChainConfig,
  #[serde(default)]
  pub repository: RepositorySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChainConfig {
  pub api: String,
  #[serde(default)]
  pub start_block: u64,
  #[serde(default = "default_interval_secs")]
  pub interval_secs: u64,
  #[serde(default)]
  pub username: Option<String>,
  #[serde(default)]
  pub password: Option<String>,
  /// Logs every RPC request/response
  #[serde(default)]
  pub debug: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RepositorySettings {
  #[serde(default = "default_memory_db")]
  pub memory_db: bool,
  /// One address per line
  #[serde(default)]
  pub watch_address_file: Option<String>,
}

impl Default for RepositorySettings {
  fn default() -> Self {
    Self {
      memory_db: default_memory_db(),
      watch_address_file: None,
    }
  }
}

fn default_interval_secs() -> u64 {
  10
}

fn default_memory_db() -> bool {
  true
}

impl ChainConfig {
  /// Basic auth token, present only when a username is configured.
  pub fn access_token(&self) -> Option<String> {
    self
      .username
      .as_deref()
      .map(|user| basic_auth(user, self.password.as_deref().unwrap_or_default()))
  }
}

impl Settings {
  pub fn new() -> Result<Self, AppError> {
    Self::from_file("./config.toml")
  }

  pub fn from_file(path: &str) -> Result<Self, AppError> {
    let env_prefix = "APP"; // Environment variable prefix (e.g., APP_MOAC__API=...)

    let builder = config::Config::builder()
      .add_source(config::File::with_name(path).required(true))
      // E.g., `APP_MOAC__API=http://...` would override config file value
      .add_source(config::Environment::with_prefix(env_prefix).separator("__"));

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
  }

  pub fn validate(&self) -> Result<(), AppError> {
    if self.moac.interval_secs == 0 {
      return Err(AppError::Config("moac.interval_secs must be greater than 0".to_string()));
    }
    Ok(())
  }
}
