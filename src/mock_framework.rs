//! # Mock Framework
//!
//! Utilities for testing the directory service without a REST server.
//!
//! Use [`create_mock_api`] to get a [`UserApi`] and a receiver.
//! Every call the service makes shows up on the receiver as an [`ApiRequest`]
//! with a responder, so the test decides what the server answers and when.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::api::{ApiError, UserApi};
use crate::domain::{Address, User, UserId};

pub type Responder<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Debug)]
pub enum ApiRequest {
    ListUsers {
        respond_to: Responder<Vec<User>>,
    },
    UpdateUser {
        id: UserId,
        user: User,
        respond_to: Responder<User>,
    },
    DeleteUser {
        id: UserId,
        respond_to: Responder<()>,
    },
}

pub struct MockUserApi {
    sender: mpsc::Sender<ApiRequest>,
}

impl MockUserApi {
    async fn call<T>(&self, url: &str, request: impl FnOnce(Responder<T>) -> ApiRequest) -> Result<T, ApiError> {
        let unavailable = |message: &str| ApiError::Transport {
            url: url.to_string(),
            message: message.to_string(),
        };
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| unavailable("mock server closed"))?;
        response.await.map_err(|_| unavailable("mock server dropped the request"))?
    }
}

#[async_trait]
impl UserApi for MockUserApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.call("mock://users", |respond_to| ApiRequest::ListUsers { respond_to })
            .await
    }

    async fn update_user(&self, id: UserId, user: &User) -> Result<User, ApiError> {
        let user = user.clone();
        self.call(&format!("mock://users/{id}"), |respond_to| ApiRequest::UpdateUser {
            id,
            user,
            respond_to,
        })
        .await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.call(&format!("mock://users/{id}"), |respond_to| ApiRequest::DeleteUser {
            id,
            respond_to,
        })
        .await
    }
}

/// Creates a mock API and a receiver for asserting requests.
pub fn create_mock_api(buffer_size: usize) -> (MockUserApi, mpsc::Receiver<ApiRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockUserApi { sender }, receiver)
}

/// Helper to verify that the next request is a list fetch
pub async fn expect_list(receiver: &mut mpsc::Receiver<ApiRequest>) -> Option<Responder<Vec<User>>> {
    match receiver.recv().await {
        Some(ApiRequest::ListUsers { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next request is a PATCH
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<(UserId, User, Responder<User>)> {
    match receiver.recv().await {
        Some(ApiRequest::UpdateUser {
            id,
            user,
            respond_to,
        }) => Some((id, user, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next request is a DELETE
pub async fn expect_delete(receiver: &mut mpsc::Receiver<ApiRequest>) -> Option<(UserId, Responder<()>)> {
    match receiver.recv().await {
        Some(ApiRequest::DeleteUser { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Three users shaped like the public mock API's first records.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new(1, "Leanne Graham", "Bret", "Sincere@april.biz").with_address(Address {
            street: "Kulas Light".to_string(),
            suite: "Apt. 556".to_string(),
            city: "Gwenborough".to_string(),
            zipcode: "92998-3874".to_string(),
        }),
        User::new(2, "Ervin Howell", "Antonette", "Shanna@melissa.tv").with_address(Address {
            street: "Victor Plains".to_string(),
            suite: "Suite 879".to_string(),
            city: "Wisokyburgh".to_string(),
            zipcode: "90566-7771".to_string(),
        }),
        User::new(3, "Clementine Bauch", "Samantha", "Nathan@yesenia.net").with_address(Address {
            street: "Douglas Extension".to_string(),
            suite: "Suite 847".to_string(),
            city: "McKenziehaven".to_string(),
            zipcode: "59590-4157".to_string(),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_api() {
        let (api, mut receiver) = create_mock_api(10);

        let call = tokio::spawn(async move { api.delete_user(UserId(2)).await });

        let (id, responder) = expect_delete(&mut receiver).await.expect("Expected Delete request");
        assert_eq!(id, UserId(2));
        responder.send(Ok(())).unwrap();

        assert_eq!(call.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_a_transport_error() {
        let (api, mut receiver) = create_mock_api(10);

        let call = tokio::spawn(async move { api.list_users().await });
        drop(expect_list(&mut receiver).await.expect("Expected List request"));

        assert!(matches!(call.await.unwrap(), Err(ApiError::Transport { .. })));
    }
}
