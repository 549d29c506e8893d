use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::directory::{DirectoryError, DirectoryState};
use crate::domain::{User, UserField, UserId};
use crate::messages::DirectoryRequest;

/// Client for the directory service. Cheap to clone; every clone talks to the
/// same service.
#[derive(Clone)]
pub struct DirectoryClient {
    sender: mpsc::Sender<DirectoryRequest>,
}

impl DirectoryClient {
    pub fn new(sender: mpsc::Sender<DirectoryRequest>) -> Self {
        Self { sender }
    }

    /// Asks the service to stop. No answer is sent back.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), DirectoryError> {
        debug!("Sending shutdown request");
        self.sender
            .send(DirectoryRequest::Shutdown)
            .await
            .map_err(|e| DirectoryError::ServiceUnavailable(e.to_string()))
    }
}

client_method!(DirectoryClient => fn load() -> usize as DirectoryRequest::Load);
client_method!(DirectoryClient => fn begin_edit(id: UserId) -> User as DirectoryRequest::BeginEdit);
client_method!(DirectoryClient => fn set_field(field: UserField, value: String) -> User as DirectoryRequest::SetField);
client_method!(DirectoryClient => fn save() -> User as DirectoryRequest::Save);
client_method!(DirectoryClient => fn cancel() -> Option<UserId> as DirectoryRequest::Cancel);
client_method!(DirectoryClient => fn delete(id: UserId) -> () as DirectoryRequest::Delete);
client_method!(DirectoryClient => fn snapshot() -> DirectoryState as DirectoryRequest::Snapshot);
