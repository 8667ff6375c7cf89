//! Session helpers that keep handlers free of cookie plumbing.
//!
//! The login screen stores the authenticated cook's id; the login gate and
//! handlers read it back through [`SessionContext`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{CookId, Error};

pub(crate) const COOK_ID_KEY: &str = "cook_id";

/// Newtype exposing the session operations the kitchen screens need.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `cook_id` as the logged-in cook.
    ///
    /// The session key is renewed first so a pre-login cookie cannot be
    /// replayed as an authenticated one.
    pub fn persist_cook(&self, cook_id: CookId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(COOK_ID_KEY, cook_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Logged-in cook, if any. Undecodable values count as logged out.
    pub fn cook_id(&self) -> Result<Option<CookId>, Error> {
        match self.0.get::<i64>(COOK_ID_KEY) {
            Ok(id) => Ok(id.map(CookId::new)),
            Err(error) => {
                warn!(%error, "invalid cook id in session cookie");
                Ok(None)
            }
        }
    }

    /// Drop every session value and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
