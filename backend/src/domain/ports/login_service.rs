//! Driving port for the login screen.
//!
//! Inbound adapters authenticate credentials through this port without
//! knowing how cooks or password hashes are stored.

use async_trait::async_trait;

use crate::domain::{CookId, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated cook.
    ///
    /// Unknown usernames and wrong passwords fail alike with
    /// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized).
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<CookId, Error>;

    /// Whether `id` still names a stored cook.
    ///
    /// Sessions outlive accounts; the login gate asks this on every request
    /// so a deleted cook's cookie counts as logged out.
    async fn is_active_cook(&self, id: CookId) -> Result<bool, Error>;
}
