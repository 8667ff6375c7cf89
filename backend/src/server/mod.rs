//! HTTP server construction.

mod config;
mod state_builders;

pub use config::{KitchenSettings, ServerConfig, SettingsError};

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use kitchen::ApiDoc;
use kitchen::inbound::http::app::kitchen_app;
use kitchen::inbound::http::health::HealthState;
use state_builders::build_http_state;

/// Bind the listener and start serving.
///
/// `health_state` is marked ready once the socket is bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(config.db_pool.as_ref());
    let ServerConfig {
        session,
        bind_addr,
        db_pool: _,
    } = config;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let app = kitchen_app(
            http_state.clone(),
            server_health_state.clone(),
            session.middleware(),
        );

        #[cfg(debug_assertions)]
        let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
