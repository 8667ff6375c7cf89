//! Error raised by every kitchen repository adapter.

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by kitchen repository adapters.
    pub enum KitchenRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "kitchen repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "kitchen repository query failed: {message}",
        /// A cook with the same username already exists.
        DuplicateUsername { username: String } => "username {username} is already taken",
    }
}
