//! Password-change form validation

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};

/// Fields of the change-password form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn new(
        old_password: impl Into<String>,
        new_password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            old_password: old_password.into(),
            new_password: new_password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Checks run before any request, first failure wins
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidPassword`] with the form message
    pub fn validate(&self) -> Result<()> {
        if self.old_password.is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(invalid("All fields are required"));
        }
        if self.new_password != self.confirm_password {
            return Err(invalid("New password and confirm password do not match"));
        }
        if self.new_password.chars().count() < AuthConfig::MIN_PASSWORD_LEN {
            return Err(invalid(
                "New password must be at least 8 characters long",
            ));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> AuthError {
    AuthError::InvalidPassword(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(change: PasswordChange) -> Option<String> {
        change.validate().err().and_then(|e| e.user_message())
    }

    #[test]
    fn missing_field_reported_first() {
        assert_eq!(
            message(PasswordChange::new("", "short", "other")).as_deref(),
            Some("All fields are required")
        );
    }

    #[test]
    fn mismatch_reported_before_length() {
        assert_eq!(
            message(PasswordChange::new("old", "abc", "abd")).as_deref(),
            Some("New password and confirm password do not match")
        );
    }

    #[test]
    fn short_password_rejected() {
        assert_eq!(
            message(PasswordChange::new("old", "abc1234", "abc1234")).as_deref(),
            Some("New password must be at least 8 characters long")
        );
    }

    #[test]
    fn valid_change_passes() {
        assert!(PasswordChange::new("old", "abcd1234", "abcd1234").validate().is_ok());
    }
}
