use thiserror::Error;

use crate::api::ApiError;
use crate::domain::UserId;

/// Errors returned by directory operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("No user is being edited")]
    NotEditing,
    #[error("User not found: {0}")]
    UnknownUser(UserId),
    #[error("Directory service unavailable: {0}")]
    ServiceUnavailable(String),
}
