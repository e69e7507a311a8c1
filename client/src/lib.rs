//! Terminal client for the tweetshare API.
//!
//! [`ApiClient`] speaks the REST surface over reqwest. [`AppState`] holds the
//! signed-in user, tweet lists and user directory that the CLI renders.

pub mod api;
pub mod error;
pub mod render;
pub mod store;
pub mod types;

pub use api::ApiClient;
pub use error::ClientError;
pub use store::AppState;
