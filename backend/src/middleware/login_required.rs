//! Login gate for the kitchen screens.
//!
//! Requests without a logged-in cook never reach the wrapped service; they
//! are redirected to the login screen with the original target in `next`.
//! A session naming a cook that no longer exists is purged and treated the
//! same way.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::LOCATION;
use actix_web::{Error, HttpResponse, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, info};
use url::form_urlencoded;

use crate::domain::{CookId, Error as DomainError};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Path of the login screen.
pub const LOGIN_PATH: &str = "/accounts/login/";

/// Login URL that returns to `target` after authenticating.
///
/// # Examples
/// ```
/// use kitchen::middleware::login_required::login_url;
///
/// assert_eq!(
///     login_url("/dish/?name=soup"),
///     "/accounts/login/?next=%2Fdish%2F%3Fname%3Dsoup"
/// );
/// ```
pub fn login_url(target: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("next", target)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

/// Middleware that answers `302 Found` to the login screen unless the
/// session holds the id of an existing cook.
///
/// Must be wrapped inside the session middleware, in an app that registers
/// [`HttpState`] as app data.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoginRequired;

impl<S, B> Transform<S, ServiceRequest> for LoginRequired
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = LoginRequiredMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoginRequiredMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service wrapper produced by [`LoginRequired`].
pub struct LoginRequiredMiddleware<S> {
    service: Rc<S>,
}

/// Whether the session's cook may pass, purging sessions of deleted cooks.
async fn session_cook_is_active(
    req: &ServiceRequest,
    session: &SessionContext,
) -> Result<bool, DomainError> {
    let Some(cook_id) = session.cook_id()? else {
        return Ok(false);
    };
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| DomainError::internal("login gate is missing handler state"))?;
    if state.login.is_active_cook(cook_id).await? {
        return Ok(true);
    }
    forget_deleted_cook(session, cook_id);
    Ok(false)
}

fn forget_deleted_cook(session: &SessionContext, cook_id: CookId) {
    info!(cook_id = %cook_id, "session names a deleted cook; logging out");
    session.purge();
}

fn redirect_to_login<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    let target = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
    debug!(path = req.path(), "redirecting anonymous request to login");
    let response = HttpResponse::Found()
        .insert_header((LOCATION, login_url(&target)))
        .finish()
        .map_into_right_body();
    req.into_response(response)
}

impl<S, B> Service<ServiceRequest> for LoginRequiredMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let session = SessionContext::new(req.get_session());
            if session_cook_is_active(&req, &session).await? {
                return service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body);
            }
            Ok(redirect_to_login(req))
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::BoxBody;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::RegisterCookRequest;
    use crate::inbound::http::test_utils::{memory_state, session_cookie, test_session_middleware};

    async fn login(
        session: SessionContext,
        id: web::Path<i64>,
    ) -> Result<HttpResponse, crate::domain::Error> {
        session.persist_cook(CookId::new(id.into_inner()))?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn seeded_state() -> (web::Data<HttpState>, CookId) {
        let (_store, state) = memory_state();
        let cook = state
            .cooks_command
            .register_cook(RegisterCookRequest {
                username: "chef.ann".to_owned(),
                password1: "tomato-soup".to_owned(),
                password2: "tomato-soup".to_owned(),
                ..RegisterCookRequest::default()
            })
            .await
            .expect("seed cook");
        (web::Data::new(state), cook.id)
    }

    macro_rules! gated_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .wrap(test_session_middleware())
                    .route("/login/{id}", web::post().to(login))
                    .service(
                        web::scope("/dish")
                            .wrap(LoginRequired)
                            .route("/", web::get().to(|| async { HttpResponse::Ok().body("dishes") })),
                    ),
            )
            .await
        };
    }

    async fn cookie_for<S>(app: &S, id: CookId) -> Cookie<'static>
    where
        S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = Error>,
    {
        let res = test::call_service(
            app,
            test::TestRequest::post()
                .uri(&format!("/login/{id}"))
                .to_request(),
        )
        .await;
        session_cookie(&res).expect("session cookie")
    }

    #[rstest]
    #[case("/dish/", "/accounts/login/?next=%2Fdish%2F")]
    #[case("/dish/?page=2", "/accounts/login/?next=%2Fdish%2F%3Fpage%3D2")]
    #[actix_web::test]
    async fn anonymous_requests_redirect_to_login(#[case] uri: &str, #[case] location: &str) {
        let (state, _) = seeded_state().await;
        let app = gated_app!(state);

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some(location)
        );
    }

    #[actix_web::test]
    async fn logged_in_requests_pass_through() {
        let (state, cook) = seeded_state().await;
        let app = gated_app!(state);
        let cookie = cookie_for(&app, cook).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/dish/")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "dishes");
    }

    #[rstest]
    #[case::deleted_after_login(true)]
    #[case::never_existed(false)]
    #[actix_web::test]
    async fn sessions_of_missing_cooks_are_purged(#[case] registered: bool) {
        let (state, cook) = seeded_state().await;
        let app = gated_app!(state.clone());
        let target = if registered { cook } else { CookId::new(cook.get() + 100) };
        let cookie = cookie_for(&app, target).await;
        if registered {
            state.cooks_command.delete_cook(cook).await.expect("delete cook");
        }

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/dish/")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        let removal = session_cookie(&res).expect("removal cookie");
        assert_eq!(removal.value(), "");
    }
}
