//! Session error taxonomy
//!
//! Every failure here degrades to "redirect to login" except
//! [`AuthError::LoginFailed`] and the password-change errors, which are
//! surfaced to the user as form messages.

use thiserror::Error;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No refresh token in storage; handled by the guard, never shown
    #[error("No refresh token stored")]
    MissingRefreshToken,

    /// Refresh endpoint rejected the token or could not be reached
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// Bad credentials or network failure during login; carries the form message
    #[error("{0}")]
    LoginFailed(String),

    /// Server-side logout failed; swallowed by callers
    #[error("Logout failed: {0}")]
    LogoutFailed(String),

    /// Password change rejected locally before any request is made
    #[error("{0}")]
    InvalidPassword(String),

    /// Password change rejected by the server; carries the form message
    #[error("{0}")]
    ChangePasswordFailed(String),

    /// Stored session fields are missing or unreadable
    #[error("Stored session is corrupt: {0}")]
    CorruptSession(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl AuthError {
    /// Errors the guard resolves by tearing the session down and redirecting
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            AuthError::MissingRefreshToken
                | AuthError::RefreshFailed(_)
                | AuthError::CorruptSession(_)
        )
    }

    /// Text suitable for a form error banner, if this error is user-facing
    pub fn user_message(&self) -> Option<String> {
        match self {
            AuthError::LoginFailed(msg)
            | AuthError::InvalidPassword(msg)
            | AuthError::ChangePasswordFailed(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_form_errors_have_user_messages() {
        assert_eq!(
            AuthError::LoginFailed("nope".into()).user_message().as_deref(),
            Some("nope")
        );
        assert!(AuthError::RefreshFailed("401".into()).user_message().is_none());
        assert!(AuthError::MissingRefreshToken.user_message().is_none());
        assert!(AuthError::LogoutFailed("down".into()).user_message().is_none());
    }

    #[test]
    fn refresh_errors_end_the_session() {
        assert!(AuthError::MissingRefreshToken.ends_session());
        assert!(AuthError::RefreshFailed("x".into()).ends_session());
        assert!(!AuthError::LogoutFailed("x".into()).ends_session());
        assert!(!AuthError::LoginFailed("x".into()).ends_session());
    }
}
