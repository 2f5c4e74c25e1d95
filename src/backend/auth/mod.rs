//! Authentication: credential store, session tokens, and HTTP handlers.

pub mod handlers;
pub mod sessions;
pub mod store;

pub use handlers::login::login;
pub use handlers::me::{get_me, update_me};
pub use handlers::register::register;
