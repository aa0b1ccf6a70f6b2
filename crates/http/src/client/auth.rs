//! Authentication endpoints

use super::{AuthenticatedClient, ClientError, PublicClient};
use crate::types::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
};
use reqwest::Method;

impl PublicClient {
    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let req = self.request(Method::POST, "/auth/login").json(request);
        self.execute(req).await
    }

    /// `POST /common/token`
    pub async fn refresh_token(
        &self,
        request: &RefreshRequest,
    ) -> Result<RefreshResponse, ClientError> {
        let req = self.request(Method::POST, "/common/token").json(request);
        self.execute(req).await
    }
}

impl AuthenticatedClient {
    /// `GET /common/logoutUser`
    pub async fn logout(&self) -> Result<(), ClientError> {
        let req = self.request(Method::GET, "/common/logoutUser");
        self.execute_unit(req).await
    }

    /// `POST /common/changePassword`
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<(), ClientError> {
        let req = self
            .request(Method::POST, "/common/changePassword")
            .json(request);
        self.execute_unit(req).await
    }
}
