//! Port for issuing and verifying bearer tokens.

use crate::domain::{AccessToken, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Token failures. Every variant means the caller is not authenticated.
    pub enum TokenError {
        /// Signature, structure or claims are invalid.
        Invalid { message: String } => "invalid token: {message}",
        /// The token is past its expiry.
        Expired => "token expired",
        /// A token could not be produced.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signs tokens that identify a user and verifies presented tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a token for `user`.
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError>;

    /// Verify `token` and return the user it names.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
