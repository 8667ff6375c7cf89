//! Shared setup for the end-to-end kitchen tests.
//!
//! Each test crate builds the complete application over the in-memory store
//! and drives it through `actix_web::test`.

#![allow(dead_code, reason = "each test crate uses a subset of these helpers")]

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::web;
use serde_json::{Value, json};

use kitchen::domain::ports::RegisterCookRequest;
use kitchen::inbound::http::app::kitchen_app;
use kitchen::inbound::http::health::HealthState;
use kitchen::inbound::http::state::HttpState;
use kitchen::inbound::http::test_utils::{memory_state, session_cookie, test_session_middleware};

pub const PASSWORD: &str = "tomato-soup";

/// Handler state with one cook per username, all sharing [`PASSWORD`].
pub async fn state_with_cooks(usernames: &[&str]) -> HttpState {
    let (_store, state) = memory_state();
    for username in usernames {
        state
            .cooks_command
            .register_cook(RegisterCookRequest {
                username: (*username).to_owned(),
                password1: PASSWORD.to_owned(),
                password2: PASSWORD.to_owned(),
                ..RegisterCookRequest::default()
            })
            .await
            .expect("seed cook");
    }
    state
}

pub async fn init_app(
    state: HttpState,
    health: HealthState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(kitchen_app(
        web::Data::new(state),
        web::Data::new(health),
        test_session_middleware(),
    ))
    .await
}

/// Log `username` in and return the session cookie.
pub async fn log_in<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        TestRequest::post()
            .uri("/accounts/login/")
            .set_json(json!({"username": username, "password": PASSWORD}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER, "login should succeed");
    session_cookie(&res).expect("session cookie")
}

/// GET `uri` with `cookie` and decode the JSON body.
pub async fn get_json<S>(app: &S, cookie: &Cookie<'static>, uri: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        TestRequest::get()
            .uri(uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "GET {uri}");
    test::read_body_json(res).await
}

/// POST `body` to `uri` with `cookie` and return the status.
pub async fn post_json<S>(app: &S, cookie: &Cookie<'static>, uri: &str, body: Value) -> StatusCode
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        TestRequest::post()
            .uri(uri)
            .cookie(cookie.clone())
            .set_json(body)
            .to_request(),
    )
    .await;
    res.status()
}

/// Values of `field` across a list context's items.
pub fn item_field(list: &Value, field: &str) -> Vec<String> {
    list["items"]
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(|item| item[field].as_str().map(str::to_owned))
        .collect()
}
