//! Koov session core: token storage, session lifecycle and role-based route guarding

pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod password;
pub mod routes;
#[cfg(not(target_arch = "wasm32"))]
pub mod scheduler;
pub mod session;
pub mod store;
pub mod types;

pub use client::AuthClient;
pub use config::AuthConfig;
pub use error::{AuthError, Result};
pub use guard::{CheckOutcome, GuardMachine, GuardState, GuardView, Requirement, SessionManager};
pub use password::PasswordChange;
pub use routes::{AppRoute, landing_path, landing_route};
#[cfg(not(target_arch = "wasm32"))]
pub use scheduler::SessionGuard;
pub use session::SessionStore;
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;
pub use store::{MemoryStore, TokenStore};
pub use types::{Credentials, Role, Session, Theme, TokenPair, UserDetails};

/// `Send + Sync` on native targets; no bound in the single-threaded browser
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSendSync: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync + ?Sized> MaybeSendSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSendSync {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> MaybeSendSync for T {}
