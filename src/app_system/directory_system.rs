use std::sync::Arc;

use tracing::{error, info};

use crate::api::UserApi;
use crate::clients::DirectoryClient;
use crate::directory::DirectoryService;

/// Starts the directory service and hands out its client.
///
/// Responsible for spawning the service task and for waiting on it at shutdown.
pub struct DirectorySystem {
    pub client: DirectoryClient,
    handle: tokio::task::JoinHandle<()>,
}

impl DirectorySystem {
    pub fn start(api: Arc<dyn UserApi>, buffer_size: usize) -> Self {
        info!(buffer_size, "Starting directory system");
        let (service, client) = DirectoryService::new(buffer_size, api);
        let handle = tokio::spawn(service.run());
        Self { client, handle }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Already stopped is fine; the handle tells us how it ended.
        if let Err(e) = self.client.shutdown().await {
            info!(error = %e, "Directory service already stopped");
        }
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Directory service task failed: {:?}", e);
            return Err(format!("Directory service task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
