//! Process settings and the server configuration built from them.

use std::net::SocketAddr;

use kitchen::inbound::http::session_config::SessionSettings;
use kitchen::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings loaded from `--flags`, `KITCHEN_*` variables and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "KITCHEN")]
pub struct KitchenSettings {
    /// PostgreSQL URL; without one the kitchen lives in memory.
    pub database_url: Option<String>,
    /// Listen address.
    pub bind_addr: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

/// Rejected settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("pool size must be at least 1")]
    PoolSize,
}

impl KitchenSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Pool settings when a database is configured.
    pub fn pool_config(&self) -> Result<Option<PoolConfig>, SettingsError> {
        let Some(url) = self.database_url.as_deref() else {
            return Ok(None);
        };
        let max_size = self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE);
        if max_size == 0 {
            return Err(SettingsError::PoolSize);
        }
        Ok(Some(PoolConfig::new(url).with_max_size(max_size)))
    }
}

/// Everything [`create_server`](super::create_server) needs.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
        }
    }

    /// Store records in PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
