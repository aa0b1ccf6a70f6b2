mod header;
mod layout;
mod spinner;

pub use header::Header;
pub use layout::Layout;
pub use spinner::LoadingSpinner;
