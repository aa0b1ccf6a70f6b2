//! Errors raised by the REST clients

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Backend unreachable, timed out, or the body could not be read
    #[error("Backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 400
    #[error("Backend rejected the request: {0}")]
    BadRequest(String),

    /// 401: token missing, expired or revoked
    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    /// 403
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 404
    #[error("Endpoint not found: {0}")]
    NotFound(String),

    /// Any other non-2xx status
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Body did not match the expected wire shape
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid client configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(message),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            other => Self::Status {
                status: other.as_u16(),
                message,
            },
        }
    }

    /// Whether the server rejected our credentials
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Forbidden(_))
    }

    /// HTTP status, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::Configuration(_) => None,
        }
    }

    /// The `message` field of a JSON error body, if there is one
    pub fn server_message(&self) -> Option<String> {
        let body = match self {
            Self::BadRequest(body)
            | Self::Unauthorized(body)
            | Self::Forbidden(body)
            | Self::NotFound(body)
            | Self::Status { message: body, .. } => body,
            _ => return None,
        };
        serde_json::from_str::<crate::types::ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ClientError::Unauthorized(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, String::new()),
            ClientError::Status { status: 502, .. }
        ));
    }

    #[test]
    fn server_message_from_json_body() {
        let err = ClientError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"statusCode":400,"message":"Old password is incorrect"}"#.into(),
        );
        assert_eq!(err.server_message().as_deref(), Some("Old password is incorrect"));
        assert_eq!(err.status(), Some(400));

        let plain = ClientError::from_status(StatusCode::BAD_REQUEST, "oops".into());
        assert!(plain.server_message().is_none());
    }
}
