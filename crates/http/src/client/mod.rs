//! REST clients for the dashboard backend
//!
//! [`PublicClient`] reaches the unauthenticated endpoints (login, token
//! rotation). [`AuthenticatedClient`] carries an access token and can only be
//! obtained from a public client or the builder, so a bearer call without a
//! token does not type-check.

pub mod auth;
pub mod error;
pub mod session;

use error::ClientError;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("koov-client/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct PublicClient {
    http: Client,
    base_url: String,
}

#[derive(Clone)]
pub struct AuthenticatedClient {
    inner: PublicClient,
    access_token: String,
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

fn http_client(timeout: Option<Duration>) -> Result<Client, ClientError> {
    let builder = ClientBuilder::new().user_agent(USER_AGENT);
    // The fetch backend has no per-request timeout
    #[cfg(not(target_arch = "wasm32"))]
    let builder = match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    };
    #[cfg(target_arch = "wasm32")]
    let _ = timeout;
    Ok(builder.build()?)
}

/// Map a non-2xx response to a [`ClientError`] carrying the raw body
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_else(|_| status.to_string());
    Err(ClientError::from_status(status, body))
}

impl PublicClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        TypedClientBuilder::new().base_url(base_url).build_public()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request for `path`, relative to the base URL
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// Send and decode the JSON body
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = ensure_success(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Send and ignore the body
    pub async fn execute_unit(&self, request: RequestBuilder) -> Result<(), ClientError> {
        ensure_success(request.send().await?).await.map(drop)
    }

    /// Bearer client sharing this connection pool
    pub fn authenticate(&self, access_token: impl Into<String>) -> AuthenticatedClient {
        AuthenticatedClient {
            inner: self.clone(),
            access_token: access_token.into(),
        }
    }
}

impl AuthenticatedClient {
    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    /// Request for `path` with `Authorization: Bearer <access token>`
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.inner
            .request(method, path)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.access_token))
    }

    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        self.inner.execute(request).await
    }

    pub async fn execute_unit(&self, request: RequestBuilder) -> Result<(), ClientError> {
        self.inner.execute_unit(request).await
    }

    pub fn to_public(&self) -> PublicClient {
        self.inner.clone()
    }
}

#[derive(Debug, Default)]
pub struct TypedClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl TypedClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Per-request timeout; native builds only
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build_public(self) -> Result<PublicClient, ClientError> {
        let base_url = self
            .base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        Ok(PublicClient {
            http: http_client(self.timeout)?,
            base_url,
        })
    }

    pub fn build_authenticated(
        self,
        access_token: impl Into<String>,
    ) -> Result<AuthenticatedClient, ClientError> {
        Ok(self.build_public()?.authenticate(access_token))
    }
}
