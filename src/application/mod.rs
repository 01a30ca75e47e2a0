//! Application layer: use cases orchestrated over the domain repositories

pub mod identity;
pub mod session;

pub use identity::{AuthResult, NewAccount, UserService};
pub use session::{create_token_store, SharedTokenStore, TokenStore};
