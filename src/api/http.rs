//! Reqwest-backed implementation of [`UserApi`].
//!
//! Owns transport details only: URL building, status mapping and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{ApiError, UserApi};
use crate::domain::{User, UserId};

const USERS_PATH: &str = "users";

pub struct HttpUserApi {
    client: Client,
    base_url: Url,
}

impl HttpUserApi {
    /// Builds an adapter for `base_url`, with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot take path segments or the
    /// reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ApiError::Transport {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: Url, client: Client) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    fn collection_url(&self) -> Url {
        self.endpoint(&[USERS_PATH])
    }

    fn user_url(&self, id: UserId) -> Url {
        self.endpoint(&[USERS_PATH, &id.to_string()])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in `with_client`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Vec<u8>, ApiError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(url, &e))?;

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Users endpoint returned an error status");
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: body_preview(&body),
            });
        }

        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "Users endpoint answered");
        Ok(body.to_vec())
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let url = self.collection_url();
        let body = self.send(self.client.get(url.clone()), &url).await?;
        decode(&url, &body)
    }

    #[instrument(fields(user_id = %id), skip(self, id, user))]
    async fn update_user(&self, id: UserId, user: &User) -> Result<User, ApiError> {
        let url = self.user_url(id);
        let request = self.client.patch(url.clone()).json(user);
        let body = self.send(request, &url).await?;
        decode(&url, &body)
    }

    #[instrument(fields(user_id = %id), skip(self, id))]
    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        let url = self.user_url(id);
        self.send(self.client.delete(url.clone()), &url).await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn transport_error(url: &Url, error: &reqwest::Error) -> ApiError {
    let message = if error.is_timeout() {
        format!("timed out: {error}")
    } else {
        error.to_string()
    };
    ApiError::Transport {
        url: url.to_string(),
        message,
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, AddressField, UserField};
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Accepts one connection, answers it with the canned response and
    /// returns the raw request text.
    async fn serve_once(status_line: &'static str, body: String) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (Url::parse(&format!("http://{addr}")).unwrap(), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&raw).into_owned();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if raw.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&raw).into_owned()
    }

    fn api_for(base_url: Url) -> HttpUserApi {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpUserApi::with_client(base_url, client).unwrap()
    }

    fn clementine() -> User {
        User::new(3, "Clementine Bauch", "Samantha", "Nathan@yesenia.net").with_address(Address {
            street: "Douglas Extension".to_string(),
            suite: "Suite 847".to_string(),
            city: "McKenziehaven".to_string(),
            zipcode: "59590-4157".to_string(),
        })
    }

    #[test]
    fn test_endpoint_urls_tolerate_trailing_slash() {
        let bare = api_for(Url::parse("https://jsonplaceholder.typicode.com").unwrap());
        let slashed = api_for(Url::parse("https://jsonplaceholder.typicode.com/").unwrap());
        let nested = api_for(Url::parse("http://localhost:8080/api/v1/").unwrap());

        assert_eq!(bare.collection_url().as_str(), "https://jsonplaceholder.typicode.com/users");
        assert_eq!(slashed.user_url(UserId(7)).as_str(), "https://jsonplaceholder.typicode.com/users/7");
        assert_eq!(nested.user_url(UserId(2)).as_str(), "http://localhost:8080/api/v1/users/2");
    }

    #[test]
    fn test_rejects_base_url_without_path() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        let client = Client::new();
        assert!(matches!(
            HttpUserApi::with_client(url, client),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_body_preview_compacts_whitespace() {
        assert_eq!(body_preview(b"  {\n  \"error\":\n \"nope\" }  "), "{ \"error\": \"nope\" }");
        let long = "x".repeat(200);
        assert_eq!(body_preview(long.as_bytes()).len(), 163);
    }

    #[tokio::test]
    async fn test_list_users_decodes_array() {
        let body = json!([
            { "id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz",
              "address": { "street": "Kulas Light", "suite": "Apt. 556", "city": "Gwenborough", "zipcode": "92998-3874" } },
            { "id": 3, "name": "Clementine Bauch", "username": "Samantha", "email": "Nathan@yesenia.net",
              "address": { "street": "Douglas Extension", "suite": "Suite 847", "city": "McKenziehaven", "zipcode": "59590-4157" } }
        ])
        .to_string();
        let (base_url, server) = serve_once("200 OK", body).await;

        let users = api_for(base_url).list_users().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[1], clementine());
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /users HTTP/1.1"), "{request}");
    }

    #[tokio::test]
    async fn test_update_user_sends_full_record_and_returns_echo() {
        let mut draft = clementine();
        draft.set_field(UserField::Address(AddressField::City), "Gotham");
        let echo = serde_json::to_string(&draft).unwrap();
        let (base_url, server) = serve_once("200 OK", echo).await;

        let saved = api_for(base_url).update_user(UserId(3), &draft).await.unwrap();

        assert_eq!(saved, draft);
        let request = server.await.unwrap();
        assert!(request.starts_with("PATCH /users/3 HTTP/1.1"), "{request}");
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        let (_, sent_body) = request.split_once("\r\n\r\n").unwrap();
        let sent: User = serde_json::from_str(sent_body).unwrap();
        assert_eq!(sent, draft);
    }

    #[tokio::test]
    async fn test_delete_user_ignores_body() {
        let (base_url, server) = serve_once("200 OK", "{}".to_string()).await;

        api_for(base_url).delete_user(UserId(4)).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("DELETE /users/4 HTTP/1.1"), "{request}");
    }

    #[tokio::test]
    async fn test_error_status_is_surfaced() {
        let (base_url, server) = serve_once("404 Not Found", "{}".to_string()).await;

        let error = api_for(base_url).delete_user(UserId(99)).await.unwrap_err();

        assert_eq!(error.status(), Some(404));
        assert!(matches!(error, ApiError::Status { ref body, .. } if body == "{}"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_decode_error() {
        let (base_url, server) = serve_once("200 OK", "not json".to_string()).await;

        let error = api_for(base_url).list_users().await.unwrap_err();

        assert!(matches!(error, ApiError::Decode { .. }), "{error:?}");
        server.await.unwrap();
    }
}
