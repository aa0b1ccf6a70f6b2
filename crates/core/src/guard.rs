//! Session guard state machine and the session manager it drives
//!
//! The guard starts in [`GuardState::Checking`], verifies the stored session
//! by rotating the refresh token, and settles on either
//! [`GuardState::Authenticated`] or [`GuardState::Unauthenticated`]. The
//! machine is runtime-agnostic: the browser component and the native
//! [`crate::scheduler::SessionGuard`] both feed it [`CheckOutcome`]s.

use crate::client::AuthClient;
use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::password::PasswordChange;
use crate::routes::{AppRoute, landing_route};
use crate::session::SessionStore;
use crate::store::TokenStore;
use crate::types::{Credentials, Role, Session, TokenPair};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authenticated,
    Unauthenticated,
}

/// What a guarded route shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardView {
    /// Verification in flight; children suppressed
    Loading,
    /// Session verified and the role is admitted
    Children,
    /// Render nothing and navigate to the route
    Redirect(AppRoute),
}

/// Who may see a guarded route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Role(Role),
    /// Any authenticated role
    Authenticated,
}

impl Requirement {
    pub fn admits(&self, role: Role) -> bool {
        match self {
            Requirement::Role(required) => *required == role,
            Requirement::Authenticated => true,
        }
    }
}

impl From<Role> for Requirement {
    fn from(role: Role) -> Self {
        Requirement::Role(role)
    }
}

/// Result of one verification round (mount check or recurring refresh)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Verified { role: Role },
    Failed(AuthError),
}

/// Pure transition table for one guard instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardMachine {
    requirement: Requirement,
    state: GuardState,
    view: GuardView,
}

impl GuardMachine {
    pub fn new(requirement: impl Into<Requirement>) -> Self {
        Self {
            requirement: requirement.into(),
            state: GuardState::Checking,
            view: GuardView::Loading,
        }
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn view(&self) -> GuardView {
        self.view
    }

    /// Recurring refresh runs only while children are shown
    pub fn wants_refresh(&self) -> bool {
        self.state == GuardState::Authenticated && self.view == GuardView::Children
    }

    /// Feed a verification result. `Unauthenticated` is terminal.
    pub fn apply(&mut self, outcome: CheckOutcome) -> GuardView {
        if self.state == GuardState::Unauthenticated {
            return self.view;
        }
        match outcome {
            CheckOutcome::Verified { role } => {
                self.state = GuardState::Authenticated;
                self.view = if self.requirement.admits(role) {
                    GuardView::Children
                } else {
                    debug!(%role, required = ?self.requirement, "Role mismatch, redirecting to role home");
                    GuardView::Redirect(landing_route(role))
                };
            }
            CheckOutcome::Failed(error) => {
                debug!(%error, "Session check failed, redirecting to login");
                self.state = GuardState::Unauthenticated;
                self.view = GuardView::Redirect(AppRoute::Login);
            }
        }
        self.view
    }
}

/// Session operations over a token store and an auth client
#[derive(Clone, Debug)]
pub struct SessionManager<S, C> {
    sessions: SessionStore<S>,
    client: C,
}

impl<S: TokenStore, C: AuthClient> SessionManager<S, C> {
    pub fn new(store: S, client: C) -> Self {
        Self {
            sessions: SessionStore::new(store),
            client,
        }
    }

    pub fn sessions(&self) -> &SessionStore<S> {
        &self.sessions
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Current session, if one is stored
    pub fn current(&self) -> Option<Session> {
        self.sessions.load()
    }

    /// Log in and persist the new session as a unit
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::LoginFailed`] with a form message; never retries
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        credentials.validate()?;
        let session = self
            .client
            .login(credentials)
            .await
            .map_err(|e| match e {
                AuthError::LoginFailed(message) => AuthError::LoginFailed(message),
                other => {
                    warn!(error = %other, "Login failed");
                    AuthError::LoginFailed(AuthConfig::LOGIN_FAILED_MESSAGE.to_string())
                }
            })?;
        self.sessions.save(&session);
        info!(job_id = %session.user.job_id, role = %session.role(), "Logged in");
        Ok(session)
    }

    /// Rotate the stored refresh token
    ///
    /// A missing token or any refresh failure tears the session down.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingRefreshToken`] without touching the
    /// network, or [`AuthError::RefreshFailed`]
    pub async fn refresh(&self) -> Result<TokenPair> {
        let Some(refresh_token) = self.sessions.refresh_token() else {
            self.sessions.teardown();
            return Err(AuthError::MissingRefreshToken);
        };

        match self.client.refresh(&refresh_token).await {
            Ok(tokens) => {
                self.sessions.update_tokens(&tokens);
                debug!("Tokens refreshed");
                Ok(tokens)
            }
            Err(error) => {
                self.sessions.teardown();
                let error = match error {
                    AuthError::RefreshFailed(reason) => AuthError::RefreshFailed(reason),
                    other => AuthError::RefreshFailed(other.to_string()),
                };
                warn!(%error, "Refresh rejected, session cleared");
                Err(error)
            }
        }
    }

    /// One verification round: refresh, then read the role
    pub async fn check(&self) -> CheckOutcome {
        if let Err(error) = self.refresh().await {
            return CheckOutcome::Failed(error);
        }
        match self.sessions.user() {
            Ok(Some(user)) => CheckOutcome::Verified { role: user.role },
            Ok(None) => {
                self.sessions.teardown();
                CheckOutcome::Failed(AuthError::CorruptSession("missing userDetails".into()))
            }
            Err(error) => {
                self.sessions.teardown();
                CheckOutcome::Failed(error)
            }
        }
    }

    /// Tear the session down locally, then tell the server
    ///
    /// The server call is best-effort; its failure is logged and dropped.
    pub async fn logout(&self) {
        if let Some(token) = self.end_session() {
            self.revoke(&token).await;
        }
    }

    /// Synchronous half of [`Self::logout`]: clear storage and hand back the
    /// access token for [`Self::revoke`]. Callers that must not wait on the
    /// network (the browser header) run the two halves separately.
    pub fn end_session(&self) -> Option<String> {
        let access_token = self.sessions.access_token();
        self.sessions.teardown();
        info!("Logged out");
        access_token
    }

    /// Best-effort server-side logout for a token already removed locally
    pub async fn revoke(&self, access_token: &str) {
        match self.client.logout(access_token).await {
            Ok(()) => debug!("Server session invalidated"),
            Err(error) => warn!(%error, "Server-side logout failed"),
        }
    }

    /// Validate the form, then change the password for the current session
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidPassword`] for local validation failures
    /// and [`AuthError::ChangePasswordFailed`] for server rejections
    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        change.validate()?;
        let Some(access_token) = self.sessions.access_token() else {
            return Err(AuthError::ChangePasswordFailed(
                "You are not logged in".to_string(),
            ));
        };
        self.client
            .change_password(&access_token, &change.old_password, &change.new_password)
            .await?;
        info!("Password changed");
        Ok(())
    }
}
