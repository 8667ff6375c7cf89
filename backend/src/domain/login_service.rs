//! Password login against stored cook accounts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{CookRepository, LoginService, PasswordHasher};
use crate::domain::service_support::map_repository_error;
use crate::domain::{CookId, Error, LoginCredentials};

const INVALID_CREDENTIALS: &str = "Please enter a correct username and password.";

/// [`LoginService`] that checks passwords against stored hashes.
#[derive(Clone)]
pub struct CookLoginService {
    cooks: Arc<dyn CookRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl CookLoginService {
    /// Create a login service over the cook repository.
    pub fn new(cooks: Arc<dyn CookRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { cooks, hasher }
    }
}

#[async_trait]
impl LoginService for CookLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<CookId, Error> {
        let Some(stored) = self
            .cooks
            .find_credentials(credentials.username())
            .await
            .map_err(map_repository_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .unwrap_or_else(|err| {
                warn!(cook_id = %stored.id, error = %err, "stored password hash rejected");
                false
            });
        if !verified {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        info!(cook_id = %stored.id, "cook logged in");
        Ok(stored.id)
    }

    async fn is_active_cook(&self, id: CookId) -> Result<bool, Error> {
        let cook = self
            .cooks
            .find_cook(id)
            .await
            .map_err(map_repository_error)?;
        Ok(cook.is_some())
    }
}
