//! Async connection pool for the kitchen database.
//!
//! Wraps `diesel-async`'s `bb8` integration. Checkout honours the configured
//! timeout and every failure surfaces as a [`PoolError`], which the
//! repositories translate into connection errors.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

const DEFAULT_MAX_SIZE: u32 = 10;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool sizing and checkout settings.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use kitchen::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://kitchen@localhost/kitchen")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Configuration with ten connections and a 30 second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            connection_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Set the maximum number of connections; zero is raised to one.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Cloneable handle to the shared connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool and open its initial connections.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the URL is invalid or the server
    /// cannot be reached.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection frees up within the
    /// configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_suit_a_small_service() {
        let config = PoolConfig::new("postgres://localhost/kitchen");

        assert_eq!(config.database_url(), "postgres://localhost/kitchen");
        assert_eq!(config.max_size(), DEFAULT_MAX_SIZE);
        assert_eq!(config.connection_timeout, DEFAULT_CHECKOUT_TIMEOUT);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(32, 32)]
    fn max_size_is_at_least_one(#[case] requested: u32, #[case] expected: u32) {
        let config = PoolConfig::new("postgres://localhost/kitchen").with_max_size(requested);
        assert_eq!(config.max_size(), expected);
    }

    #[rstest]
    fn errors_name_the_failing_step() {
        assert_eq!(
            PoolError::checkout("timed out").to_string(),
            "failed to get connection from pool: timed out"
        );
        assert_eq!(
            PoolError::build("invalid URL").to_string(),
            "failed to build connection pool: invalid URL"
        );
    }
}
