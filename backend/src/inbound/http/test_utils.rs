//! Test helpers for the HTTP adapter.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use mockable::DefaultClock;

use crate::inbound::http::state::{HttpState, KitchenRepositories};
use crate::outbound::memory::InMemoryKitchenStore;
use crate::outbound::security::Argon2PasswordHasher;

/// Cookie name used by every test session middleware.
pub const SESSION_COOKIE: &str = "session";

/// Session middleware with a fresh key and the `Secure` flag off, for plain
/// HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set on `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Handler state over an empty in-memory store.
///
/// The store is returned too so tests can seed records directly. Passwords
/// are hashed at minimal Argon2 cost.
pub fn memory_state() -> (Arc<InMemoryKitchenStore>, HttpState) {
    let store = Arc::new(InMemoryKitchenStore::new());
    let state = HttpState::from_repositories(
        KitchenRepositories::shared(store.clone()),
        Arc::new(Argon2PasswordHasher::with_cost(8, 1).unwrap_or_default()),
        Arc::new(DefaultClock),
    );
    (store, state)
}
