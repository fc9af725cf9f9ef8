//! HTTP adapter for the remote user store.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use domain::{NewUser, User, UserId, UserPatch};

use super::error::{ClientError, ClientResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User API contract: one HTTP request per call, no retry and no caching.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserApi: Send + Sync {
    /// List all users, with categorical fields lower-cased
    async fn list(&self) -> ClientResult<Vec<User>>;

    /// Get user by ID
    async fn get(&self, id: UserId) -> ClientResult<User>;

    /// Create a user; the server assigns id, avatar and creation time
    async fn create(&self, input: NewUser) -> ClientResult<User>;

    /// Partially update a user
    async fn update(&self, id: UserId, patch: UserPatch) -> ClientResult<User>;

    /// Delete a user; `None` when the server answers without a body
    async fn delete(&self, id: UserId) -> ClientResult<Option<User>>;
}

/// [`UserApi`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpUserApi {
    http: Client,
    base_url: String,
}

impl HttpUserApi {
    /// Create a client for an API root such as `http://localhost:3001/api`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let parsed = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .user_agent(format!("user-dashboard/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    /// Get the API root URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: UserId) -> String {
        format!("{}/users/{}", self.base_url, id)
    }

    /// Send a request and turn any non-2xx status into an error.
    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await.map_err(ClientError::Network)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body, "User API request failed");

        if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound { body })
        } else {
            Err(ClientError::Http {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Read the body as text first so a malformed payload is a decode error.
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let body = response.text().await.map_err(ClientError::Network)?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list(&self) -> ClientResult<Vec<User>> {
        let url = self.users_url();
        debug!(url = %url, "Listing users");

        let response = self.send(self.http.get(&url)).await?;
        let mut users: Vec<User> = decode(response).await?;
        users.iter_mut().for_each(User::normalize_casing);
        Ok(users)
    }

    async fn get(&self, id: UserId) -> ClientResult<User> {
        let response = self.send(self.http.get(self.user_url(id))).await?;
        decode(response).await
    }

    async fn create(&self, input: NewUser) -> ClientResult<User> {
        let response = self
            .send(self.http.post(self.users_url()).json(&input))
            .await?;
        decode(response).await
    }

    async fn update(&self, id: UserId, patch: UserPatch) -> ClientResult<User> {
        let response = self
            .send(self.http.patch(self.user_url(id)).json(&patch))
            .await?;
        decode(response).await
    }

    async fn delete(&self, id: UserId) -> ClientResult<Option<User>> {
        let response = self.send(self.http.delete(self.user_url(id))).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await.map_err(ClientError::Network)?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
