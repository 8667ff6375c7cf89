//! Login and logout screens.
//!
//! ```text
//! GET  /accounts/login/?next=/dish/
//! POST /accounts/login/?next=/dish/ {"username":"chef.ann","password":"..."}
//! POST /accounts/logout/
//! ```

use std::fmt;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, FieldErrors, FieldIssue, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::context::{private_ok, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::middleware::login_required::LOGIN_PATH;

/// Landing page after login when no usable `next` was given.
const DEFAULT_LANDING: &str = "/";

/// Login form body.
#[derive(Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "chef.ann")]
    pub username: String,
    #[schema(format = Password)]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Where to go once logged in.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NextParam {
    /// Local path to return to.
    pub next: Option<String>,
}

impl NextParam {
    /// `next` when it names a path on this site, otherwise the home screen.
    ///
    /// Absolute and scheme-relative URLs are ignored so the login screen
    /// cannot bounce a cook to another host.
    pub fn landing(&self) -> &str {
        self.next
            .as_deref()
            .filter(|next| next.starts_with('/') && !next.starts_with("//"))
            .filter(|next| !next.contains('\\'))
            .unwrap_or(DEFAULT_LANDING)
    }
}

#[derive(Debug, Serialize)]
struct LoginContext<'a> {
    form: LoginRequest,
    next: &'a str,
}

fn login_validation_error(err: LoginValidationError) -> Error {
    let mut errors = FieldErrors::new();
    errors.push(err.field(), FieldIssue::new("required", err.to_string()));
    errors.into_error()
}

/// Empty login form.
#[utoipa::path(
    get,
    path = "/accounts/login/",
    params(NextParam),
    responses((status = 200, description = "Login form", body = LoginRequest)),
    tags = ["accounts"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login/")]
pub async fn login_form(params: web::Query<NextParam>) -> HttpResponse {
    private_ok().json(LoginContext {
        form: LoginRequest::default(),
        next: params.landing(),
    })
}

/// Check the password and start a session.
#[utoipa::path(
    post,
    path = "/accounts/login/",
    params(NextParam),
    request_body = LoginRequest,
    responses(
        (status = 303, description = "Logged in; redirects to `next`",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank username or password", body = Error),
        (status = 401, description = "Wrong username or password", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<NextParam>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(&payload.into_inner()).map_err(login_validation_error)?;
    let cook_id = state.login.authenticate(&credentials).await?;
    session.persist_cook(cook_id)?;
    Ok(see_other(params.landing()))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/accounts/logout/",
    responses((status = 303, description = "Logged out; redirects to the login screen")),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/logout/")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other(LOGIN_PATH)
}

/// Register the account screens on a scope mounted at `/accounts`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_form).service(login).service(logout);
}
