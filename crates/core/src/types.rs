use crate::error::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dashboard role. Decides which top-level route tree a user may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Salesperson,
    Production,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Salesperson, Role::Production];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Salesperson => "salesperson",
            Role::Production => "production",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "salesperson" => Ok(Role::Salesperson),
            "production" => Ok(Role::Production),
            other => Err(AuthError::CorruptSession(format!("unknown role `{other}`"))),
        }
    }
}

/// Snapshot of the logged-in user, taken at login time and stored under `userDetails`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub name: String,
    pub job_id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_target_completed: Option<f64>,
}

impl UserDetails {
    /// Build a snapshot, dropping the sales-only fields for other roles
    pub fn new(
        name: impl Into<String>,
        job_id: impl Into<String>,
        role: Role,
        area: Option<String>,
        total_target_completed: Option<f64>,
    ) -> Self {
        let (area, total_target_completed) = match role {
            Role::Salesperson => (area, total_target_completed),
            Role::Admin | Role::Production => (None, None),
        };
        Self {
            name: name.into(),
            job_id: job_id.into(),
            role,
            area,
            total_target_completed,
        }
    }

    /// Initials shown in the header avatar
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

/// Access/refresh pair returned by the refresh endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// A complete authenticated session
#[derive(Clone, PartialEq)]
pub struct Session {
    pub tokens: TokenPair,
    pub user: UserDetails,
}

impl Session {
    pub fn new(tokens: TokenPair, user: UserDetails) -> Self {
        Self { tokens, user }
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn access_token(&self) -> &str {
        &self.tokens.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.tokens.refresh_token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("tokens", &self.tokens)
            .field("user", &self.user)
            .finish()
    }
}

/// Credentials submitted by the login form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub job_id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(job_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            password: password.into(),
        }
    }

    /// Demo account preset for a role (job id is the role name)
    pub fn demo(role: Role) -> Self {
        Self::new(role.as_str(), crate::config::AuthConfig::DEMO_PASSWORD)
    }

    /// Both fields are required by the login form
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.job_id.trim().is_empty() || self.password.is_empty() {
            return Err(AuthError::LoginFailed(
                crate::config::AuthConfig::LOGIN_FAILED_MESSAGE.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("job_id", &self.job_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Light/dark preference persisted under the `theme` key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Unknown values fall back to light
    pub fn parse(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}
