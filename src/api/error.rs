use thiserror::Error;

/// Failures talking to the users endpoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("Request to {url} returned status {status}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("Could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("Base URL cannot carry a path: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Status code for [`ApiError::Status`], `None` otherwise.
    #[cfg(test)]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
