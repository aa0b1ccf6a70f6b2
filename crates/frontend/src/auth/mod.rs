mod context;
mod guard;

pub use context::{SessionAction, SessionHandle, SessionProvider, use_session};
pub use guard::ProtectedRoute;
