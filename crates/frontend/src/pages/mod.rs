mod change_password;
mod dashboard;
mod login;

pub use change_password::ChangePasswordPage;
pub use dashboard::{AdminPage, HomePage, ProductionPage};
pub use login::LoginPage;
