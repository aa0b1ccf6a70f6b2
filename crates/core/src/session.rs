//! Session store: the only place session fields are read or written
//!
//! Keeps the three session keys consistent: `accessToken` is written last
//! and removed first, so an access token is never visible without its
//! refresh token and user snapshot.

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::store::TokenStore;
use crate::types::{Session, Theme, TokenPair, UserDetails};
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: TokenStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying token store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(AuthConfig::ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(AuthConfig::REFRESH_TOKEN_KEY)
    }

    /// Stored user snapshot
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::CorruptSession`] if the stored JSON is unreadable
    pub fn user(&self) -> Result<Option<UserDetails>> {
        match self.store.get(AuthConfig::USER_DETAILS_KEY) {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AuthError::CorruptSession(format!("userDetails: {e}"))),
            None => Ok(None),
        }
    }

    /// Full session, if all three fields are present and readable
    pub fn load(&self) -> Option<Session> {
        let refresh_token = self.refresh_token()?;
        let access_token = self.access_token()?;
        let user = match self.user() {
            Ok(user) => user?,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session");
                return None;
            }
        };
        Some(Session::new(
            TokenPair {
                access_token,
                refresh_token,
            },
            user,
        ))
    }

    /// Persist a freshly created session as one unit
    pub fn save(&self, session: &Session) {
        let user = match serde_json::to_string(&session.user) {
            Ok(user) => user,
            Err(e) => {
                // Never leave tokens behind without a user snapshot
                warn!(error = %e, "Failed to encode user details; session not saved");
                return;
            }
        };
        self.store.set(AuthConfig::USER_DETAILS_KEY, &user);
        self.store
            .set(AuthConfig::REFRESH_TOKEN_KEY, session.refresh_token());
        self.store
            .set(AuthConfig::ACCESS_TOKEN_KEY, session.access_token());
        debug!(role = %session.role(), "Session saved");
    }

    /// Replace the token pair after a successful refresh (rotation)
    pub fn update_tokens(&self, tokens: &TokenPair) {
        self.store
            .set(AuthConfig::REFRESH_TOKEN_KEY, &tokens.refresh_token);
        self.store
            .set(AuthConfig::ACCESS_TOKEN_KEY, &tokens.access_token);
    }

    /// Destroy the session unit
    pub fn teardown(&self) {
        self.store.clear();
        debug!("Session cleared");
    }

    pub fn theme(&self) -> Theme {
        self.store
            .get(AuthConfig::THEME_KEY)
            .map(|raw| Theme::parse(&raw))
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.set(AuthConfig::THEME_KEY, theme.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::Role;

    fn session(role: Role) -> Session {
        Session::new(
            TokenPair {
                access_token: "a1".into(),
                refresh_token: "r1".into(),
            },
            UserDetails::new("Ann Lee", "E7", role, None, None),
        )
    }

    #[test]
    fn save_then_load_returns_same_session() {
        let sessions = SessionStore::new(MemoryStore::new());
        let original = session(Role::Production);
        sessions.save(&original);
        assert_eq!(sessions.load(), Some(original));
    }

    #[test]
    fn access_token_implies_rest_of_session() {
        let store = MemoryStore::new();
        let sessions = SessionStore::new(store.clone());
        sessions.save(&session(Role::Admin));

        assert!(store.get("accessToken").is_some());
        assert!(store.get("refreshToken").is_some());
        assert_eq!(sessions.user().unwrap().map(|u| u.role), Some(Role::Admin));

        sessions.teardown();
        for key in ["accessToken", "refreshToken", "userDetails"] {
            assert!(store.get(key).is_none(), "{key} survived teardown");
        }
    }

    #[test]
    fn update_tokens_keeps_user() {
        let sessions = SessionStore::new(MemoryStore::new());
        sessions.save(&session(Role::Salesperson));
        sessions.update_tokens(&TokenPair {
            access_token: "a2".into(),
            refresh_token: "r2".into(),
        });

        let loaded = sessions.load().unwrap();
        assert_eq!(loaded.access_token(), "a2");
        assert_eq!(loaded.refresh_token(), "r2");
        assert_eq!(loaded.role(), Role::Salesperson);
    }

    #[test]
    fn corrupt_user_details_is_reported() {
        let store = MemoryStore::new();
        store.set("userDetails", "{not json");
        let sessions = SessionStore::new(store);
        assert!(matches!(sessions.user(), Err(AuthError::CorruptSession(_))));
        assert!(sessions.load().is_none());
    }

    #[test]
    fn theme_survives_teardown() {
        let sessions = SessionStore::new(MemoryStore::new());
        assert_eq!(sessions.theme(), Theme::Light);
        sessions.set_theme(Theme::Dark);
        sessions.save(&session(Role::Admin));
        sessions.teardown();
        assert_eq!(sessions.theme(), Theme::Dark);
    }
}
