//! Transport seam between the directory service and the REST collaborator.

pub mod error;
pub mod http;

pub use error::*;
pub use http::HttpUserApi;

use async_trait::async_trait;

use crate::domain::{User, UserId};

/// The three calls the directory makes against the users endpoint.
#[async_trait]
pub trait UserApi: Send + Sync + 'static {
    /// `GET /users`
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// `PATCH /users/{id}` with the full record; returns the server's copy.
    async fn update_user(&self, id: UserId, user: &User) -> Result<User, ApiError>;

    /// `DELETE /users/{id}`; the response body is ignored.
    async fn delete_user(&self, id: UserId) -> Result<(), ApiError>;
}
