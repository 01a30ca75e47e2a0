//! Session handling: revocation of issued tokens

pub mod token_store;

pub use token_store::{create_token_store, SharedTokenStore, TokenStore};
