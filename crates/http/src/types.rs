//! Wire types for the dashboard REST backend

use koov_core::{AuthError, Role, Session, TokenPair, UserDetails};
use serde::{Deserialize, Serialize};

/// `POST /auth/login` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub job_id: String,
    pub password: String,
}

/// `POST /auth/login` response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub data: LoginData,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub access_token: String,
    pub refresh_token: String,
    pub user: ApiUser,
}

/// User record as the backend sends it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    pub full_name: String,
    pub job_id: String,
    pub role: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub total_target_completed: Option<f64>,
}

impl LoginResponse {
    /// Convert into a session, snapshotting the user
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::CorruptSession`] if the role is not one we know
    pub fn into_session(self) -> Result<Session, AuthError> {
        let LoginData {
            access_token,
            refresh_token,
            user,
        } = self.data;
        let role: Role = user.role.parse()?;
        Ok(Session::new(
            TokenPair {
                access_token,
                refresh_token,
            },
            UserDetails::new(
                user.full_name,
                user.job_id,
                role,
                user.area,
                user.total_target_completed,
            ),
        ))
    }
}

/// `POST /common/token` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// `POST /common/token` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub data: Option<TokenPair>,
}

impl RefreshResponse {
    /// The rotated pair, only when the envelope reports 200 and carries data
    pub fn into_tokens(self) -> Option<TokenPair> {
        match (self.status_code, self.data) {
            (Some(200), Some(tokens)) => Some(tokens),
            _ => None,
        }
    }
}

/// `POST /common/changePassword` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_response_keeps_sales_fields_only_for_salesperson() {
        let sales: LoginResponse = serde_json::from_value(json!({
            "data": {
                "accessToken": "a", "refreshToken": "r",
                "user": {"fullName": "Ann Lee", "jobId": "S1", "role": "salesperson",
                         "area": "North", "totalTargetCompleted": 40}
            }
        }))
        .unwrap();
        let session = sales.into_session().unwrap();
        assert_eq!(session.user.name, "Ann Lee");
        assert_eq!(session.user.area.as_deref(), Some("North"));
        assert_eq!(session.user.total_target_completed, Some(40.0));

        let admin: LoginResponse = serde_json::from_value(json!({
            "data": {
                "accessToken": "a", "refreshToken": "r",
                "user": {"fullName": "Bo", "jobId": "A1", "role": "admin", "area": "HQ"}
            }
        }))
        .unwrap();
        assert!(admin.into_session().unwrap().user.area.is_none());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let resp: LoginResponse = serde_json::from_value(json!({
            "data": {"accessToken": "a", "refreshToken": "r",
                     "user": {"fullName": "X", "jobId": "1", "role": "janitor"}}
        }))
        .unwrap();
        assert!(resp.into_session().is_err());
    }

    #[test]
    fn refresh_envelope_requires_status_and_data() {
        let ok: RefreshResponse = serde_json::from_value(json!({
            "statusCode": 200, "data": {"accessToken": "a2", "refreshToken": "r2"}
        }))
        .unwrap();
        assert_eq!(ok.into_tokens().unwrap().refresh_token, "r2");

        let wrong_status: RefreshResponse = serde_json::from_value(json!({
            "statusCode": 403, "data": {"accessToken": "a2", "refreshToken": "r2"}
        }))
        .unwrap();
        assert!(wrong_status.into_tokens().is_none());

        let no_data: RefreshResponse =
            serde_json::from_value(json!({"statusCode": 200})).unwrap();
        assert!(no_data.into_tokens().is_none());
    }
}
