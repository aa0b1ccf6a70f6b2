//! The network seam the session manager depends on

use crate::MaybeSendSync;
use crate::error::Result;
use crate::types::{Credentials, Session, TokenPair};
use async_trait::async_trait;

/// Remote authentication operations. Implementations never retry.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AuthClient: MaybeSendSync {
    /// Exchange credentials for a new session
    async fn login(&self, credentials: &Credentials) -> Result<Session>;

    /// Exchange a refresh token for a rotated pair; the old token becomes invalid
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair>;

    /// Best-effort server-side invalidation
    async fn logout(&self, access_token: &str) -> Result<()>;

    /// Change the password of the user owning `access_token`
    async fn change_password(
        &self,
        access_token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<()>;
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: AuthClient + ?Sized> AuthClient for std::sync::Arc<T> {
    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        (**self).login(credentials).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        (**self).refresh(refresh_token).await
    }

    async fn logout(&self, access_token: &str) -> Result<()> {
        (**self).logout(access_token).await
    }

    async fn change_password(
        &self,
        access_token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        (**self)
            .change_password(access_token, old_password, new_password)
            .await
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub AuthClient {}

        #[async_trait]
        impl AuthClient for AuthClient {
            async fn login(&self, credentials: &Credentials) -> Result<Session>;
            async fn refresh(&self, refresh_token: &str) -> Result<TokenPair>;
            async fn logout(&self, access_token: &str) -> Result<()>;
            async fn change_password(
                &self,
                access_token: &str,
                old_password: &str,
                new_password: &str,
            ) -> Result<()>;
        }
    }
}
