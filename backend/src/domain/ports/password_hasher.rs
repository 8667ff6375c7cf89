//! Port for one-way password hashing.

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// The hash could not be produced.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash is not in a recognised format.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Driven port that derives and checks password hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a self-describing hash string for `password`.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check `password` against a hash produced by [`PasswordHasher::hash`].
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
