//! Koov HTTP client
//!
//! Typed access to the dashboard REST backend and the [`HttpAuthClient`]
//! adapter that plugs it into the session manager.

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::session::HttpAuthClient;
pub use client::{AuthenticatedClient, PublicClient, TypedClientBuilder};
