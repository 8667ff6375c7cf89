//! Kitchen service entry point.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use kitchen::inbound::http::health::HealthState;
use kitchen::inbound::http::session_config::{BuildMode, session_settings_from_env};
use kitchen::outbound::persistence::{DbPool, run_migrations};
use server::{KitchenSettings, ServerConfig, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn server_config(settings: &KitchenSettings) -> io::Result<ServerConfig> {
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())
        .map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let config = ServerConfig::new(session, bind_addr);

    let Some(pool_config) = settings.pool_config().map_err(io::Error::other)? else {
        return Ok(config);
    };
    run_migrations(pool_config.database_url())
        .await
        .map_err(io::Error::other)?;
    let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
    Ok(config.with_db_pool(pool))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let settings = KitchenSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let config = server_config(&settings).await?;
    info!(bind_addr = %config.bind_addr, database = config.db_pool.is_some(), "starting kitchen");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
