pub mod extract;
pub mod password;
pub mod session;

pub use extract::{AdminUser, CurrentUser};
pub use session::{Session, SessionStore, SESSION_COOKIE};
