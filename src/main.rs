// src/main.rs
/**
* author : HAMA
* date: 2025. 4. 6.
* description: Entry point for the MOAC chain scanner.
**/

use moacchain_adapter::analyzer::{self, WatchList};
use moacchain_adapter::coin::moac::client::MoacClient;
use moacchain_adapter::coin::moac::model::SYMBOL;
use moacchain_adapter::coin::rpc::JsonRpcClient;
use moacchain_adapter::config::Settings;
use moacchain_adapter::fetcher::moac_fetcher::MoacFetcher;
use moacchain_adapter::registry::AssetRegistry;
use moacchain_adapter::respository::{MemoryRepository, Repository};
use moacchain_adapter::shutdown::shutdown_signal;
use moacchain_adapter::tasks::spawn_fetcher;
use moacchain_adapter::types::{AppError, ScanData};

use log::{info, warn};
use std::sync::Arc;
use std::{fs::File, io::{BufRead, BufReader}};
use tokio::sync::mpsc;

fn load_watch_list(path: Option<&str>) -> Result<WatchList, AppError> {
  let Some(path) = path else {
    return Ok(WatchList::default());
  };

  let reader = BufReader::new(File::open(path)?);
  let mut addresses = Vec::new();
  for line in reader.lines() {
    addresses.push(line?);
  }
  Ok(WatchList::new(addresses))
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
  // 1. Initialize logging
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
  info!("Application starting...");

  // 2. Load configuration
  let settings = Settings::new()?;
  info!("Configuration loaded.");

  // 3. Repository
  if !settings.repository.memory_db {
    warn!("Only the in-memory repository is available; using it.");
  }
  let repository: Arc<dyn Repository> = Arc::new(MemoryRepository::new());

  // 4. Watched addresses
  let watch_list = Arc::new(load_watch_list(settings.repository.watch_address_file.as_deref())?);
  info!("Loaded {} watched addresses", watch_list.len());

  // 5. Create API client and register it with the host
  let chain = &settings.moac;
  let rpc = Arc::new(JsonRpcClient::new(chain.api.clone(), chain.access_token(), chain.debug));
  let moac_client = MoacClient::new(rpc);

  let mut registry = AssetRegistry::new();
  registry.register(Arc::new(moac_client.clone()))?;
  info!("Registered assets: {:?}", registry.symbols());

  // 6. Create channel for scanned data
  let (sender, receiver) = mpsc::channel::<ScanData>(128);

  // 7. Resume point
  let fetcher = Arc::new(MoacFetcher { client: moac_client });
  let chain_name = SYMBOL;
  repository.init_last_processed_block(chain_name, chain.start_block).await?;
  let start_block = repository.get_last_processed_block(chain_name).await? + 1;

  // 8. Spawn fetcher and analyzer
  let fetcher_handle = spawn_fetcher(
    fetcher,
    repository.clone(),
    sender,
    start_block,
    chain.interval_secs,
  );
  let analyzer_handle = tokio::spawn(analyzer::run_analyzer(
    receiver,
    repository.clone(),
    watch_list,
    chain_name,
  ));

  // 9. Wait for shutdown signal
  shutdown_signal().await;
  info!("Shutdown signal received. Stopping tasks...");

  // 10. Stop fetcher; analyzer drains the channel and exits
  fetcher_handle.abort();
  let _ = fetcher_handle.await;
  let _ = analyzer_handle.await;

  let pending = repository.get_unscan_records(chain_name).await?;
  if !pending.is_empty() {
    warn!("{} unscanned records left for retry", pending.len());
  }

  info!("Application exited cleanly.");
  Ok(())
}
