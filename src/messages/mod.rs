use tokio::sync::oneshot;

use crate::api::ApiError;
use crate::directory::{DirectoryError, DirectoryState};
use crate::domain::{User, UserField, UserId};

/// Generic type aliases for service communication
pub type ServiceResult<T> = std::result::Result<T, DirectoryError>;
pub type ServiceResponse<T> = oneshot::Sender<ServiceResult<T>>;

/// Messages accepted by the directory service. Each variant carries its
/// parameters and a oneshot channel for the answer.
#[derive(Debug)]
pub enum DirectoryRequest {
    Load {
        respond_to: ServiceResponse<usize>,
    },
    BeginEdit {
        id: UserId,
        respond_to: ServiceResponse<User>,
    },
    SetField {
        field: UserField,
        value: String,
        respond_to: ServiceResponse<User>,
    },
    Save {
        respond_to: ServiceResponse<User>,
    },
    Cancel {
        respond_to: ServiceResponse<Option<UserId>>,
    },
    Delete {
        id: UserId,
        respond_to: ServiceResponse<()>,
    },
    Snapshot {
        respond_to: ServiceResponse<DirectoryState>,
    },
    Shutdown,

    // Posted back by the service's own background calls.
    LoadCompleted {
        result: Result<Vec<User>, ApiError>,
        respond_to: ServiceResponse<usize>,
    },
    SaveCompleted {
        id: UserId,
        result: Result<User, ApiError>,
        respond_to: ServiceResponse<User>,
    },
    DeleteCompleted {
        id: UserId,
        result: Result<(), ApiError>,
        respond_to: ServiceResponse<()>,
    },
}
