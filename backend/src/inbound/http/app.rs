//! Application assembly: routes, scopes and middleware order.
//!
//! The kitchen scopes sit behind [`LoginRequired`]; the overview, account
//! screens and health probes stay public. The session middleware wraps
//! everything so the login gate can read the cookie.

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{accounts, cooks, dish_types, dishes, ingredients, overview};
use crate::middleware::{LoginRequired, Trace};

/// Register every kitchen route.
///
/// Expects [`HttpState`] and [`HealthState`] in the app data and a session
/// middleware around the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(ready)
        .service(live)
        .service(overview::overview)
        .service(web::scope("/accounts").configure(accounts::configure))
        .service(
            web::scope("/cook")
                .wrap(LoginRequired)
                .configure(cooks::configure),
        )
        .service(
            web::scope("/dish-type")
                .wrap(LoginRequired)
                .configure(dish_types::configure),
        )
        .service(
            web::scope("/ingredient")
                .wrap(LoginRequired)
                .configure(ingredients::configure),
        )
        .service(
            web::scope("/dish")
                .wrap(LoginRequired)
                .configure(dishes::configure),
        );
}

/// Build the full application around `session`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_session::{SessionMiddleware, storage::CookieSessionStore};
/// use actix_web::{cookie::Key, web};
/// use kitchen::inbound::http::app::kitchen_app;
/// use kitchen::inbound::http::health::HealthState;
/// use kitchen::inbound::http::state::{HttpState, KitchenRepositories};
/// use kitchen::outbound::memory::InMemoryKitchenStore;
/// use kitchen::outbound::security::Argon2PasswordHasher;
/// use mockable::DefaultClock;
///
/// let state = HttpState::from_repositories(
///     KitchenRepositories::shared(Arc::new(InMemoryKitchenStore::new())),
///     Arc::new(Argon2PasswordHasher::new()),
///     Arc::new(DefaultClock),
/// );
/// let session = SessionMiddleware::new(CookieSessionStore::default(), Key::generate());
/// let _app = kitchen_app(
///     web::Data::new(state),
///     web::Data::new(HealthState::new()),
///     session,
/// );
/// ```
pub fn kitchen_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
    session: SessionMiddleware<CookieSessionStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(http_state)
        .app_data(health_state)
        .wrap(session)
        .wrap(Trace)
        .configure(configure)
}
