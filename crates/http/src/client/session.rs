//! [`AuthClient`] backed by the REST API

use super::{PublicClient, TypedClientBuilder};
use crate::client::error::ClientError;
use crate::types::{ChangePasswordRequest, LoginRequest, RefreshRequest};
use async_trait::async_trait;
use koov_core::{AuthClient, AuthConfig, AuthError, Credentials, Session, TokenPair};
use std::time::Duration;
use tracing::{debug, warn};

const CHANGE_PASSWORD_FALLBACK: &str = "An error occurred while changing the password";

#[derive(Clone, Debug)]
pub struct HttpAuthClient {
    public: PublicClient,
}

impl HttpAuthClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self::from_client(PublicClient::new(base_url)?))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let public = TypedClientBuilder::new()
            .base_url(base_url)
            .timeout(timeout)
            .build_public()?;
        Ok(Self::from_client(public))
    }

    pub fn from_client(public: PublicClient) -> Self {
        Self { public }
    }

    pub fn public(&self) -> &PublicClient {
        &self.public
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AuthClient for HttpAuthClient {
    async fn login(&self, credentials: &Credentials) -> koov_core::Result<Session> {
        let request = LoginRequest {
            job_id: credentials.job_id.clone(),
            password: credentials.password.clone(),
        };
        let failed = || AuthError::LoginFailed(AuthConfig::LOGIN_FAILED_MESSAGE.to_string());

        let response = self.public.login(&request).await.map_err(|e| {
            warn!(error = %e, "Login request failed");
            failed()
        })?;
        response.into_session().map_err(|e| {
            warn!(error = %e, "Login response unusable");
            failed()
        })
    }

    async fn refresh(&self, refresh_token: &str) -> koov_core::Result<TokenPair> {
        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let response = self
            .public
            .refresh_token(&request)
            .await
            .map_err(|e| {
                if e.is_auth_expired() {
                    debug!(error = %e, "Refresh token rejected");
                } else {
                    warn!(error = %e, "Refresh request failed");
                }
                AuthError::RefreshFailed(e.to_string())
            })?;
        let status_code = response.status_code;
        response.into_tokens().ok_or_else(|| {
            AuthError::RefreshFailed(format!(
                "unexpected envelope (statusCode {status_code:?})"
            ))
        })
    }

    async fn logout(&self, access_token: &str) -> koov_core::Result<()> {
        self.public
            .authenticate(access_token)
            .logout()
            .await
            .map_err(|e| AuthError::LogoutFailed(e.to_string()))?;
        debug!("Server session invalidated");
        Ok(())
    }

    async fn change_password(
        &self,
        access_token: &str,
        old_password: &str,
        new_password: &str,
    ) -> koov_core::Result<()> {
        let request = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.public
            .authenticate(access_token)
            .change_password(&request)
            .await
            .map_err(|e| {
                warn!(error = %e, "Password change rejected");
                AuthError::ChangePasswordFailed(
                    e.server_message()
                        .unwrap_or_else(|| CHANGE_PASSWORD_FALLBACK.to_string()),
                )
            })
    }
}
