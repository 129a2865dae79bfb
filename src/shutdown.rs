/**
* filename : shutdown
* author : HAMA
* date: 2025. 4. 6.
* description: 
**/

use log::{error, info};
use tokio::signal;

pub async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      error!("Failed to install Ctrl+C handler: {}", e);
      std::future::pending::<()>().await;
    }
  };
  
  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(e) => {
        error!("Failed to install SIGTERM handler: {}", e);
        std::future::pending::<()>().await;
      }
    }
  };
  
  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();
  
  tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
  
  info!("Shutdown signal received.");
}
