/**
* filename : tasks
* author : HAMA
* date: 2025. 4. 6.
* description: 
**/
use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;

use crate::fetcher::fetcher::BlockFetcher;
use crate::fetcher::runner::run_fetcher;
use crate::respository::Repository;
use crate::types::ScanSender;

pub fn spawn_fetcher<F: BlockFetcher + Send + Sync + 'static>(
  fetcher: Arc<F>,
  repository: Arc<dyn Repository>,
  sender: ScanSender,
  start_block: u64,
  interval_secs: u64,
) -> JoinHandle<()> {
  tokio::spawn(run_fetcher(
    fetcher,
    repository,
    sender,
    start_block,
    Duration::from_secs(interval_secs),
  ))
}
