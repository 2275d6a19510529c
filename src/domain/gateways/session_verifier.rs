//! Session Verifier Gateway
//!
//! Abstract trait for validating provider-issued session tokens.

use crate::domain::models::session::Session;

/// Validates a raw session token
pub trait SessionVerifier: Send + Sync {
    /// Return the session if the token is valid, `None` otherwise
    ///
    /// A verifier without a usable signing secret treats every token as invalid.
    fn verify(&self, token: &str) -> Option<Session>;
}
