//! Liveness and readiness probes for orchestrators.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::info;

/// Process health shared by the probe handlers and the server lifecycle.
///
/// Starts live but not ready; the server marks it ready once the store is
/// reachable and the listener is bound.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Fresh state: live, not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start accepting traffic.
    pub fn mark_ready(&self) {
        if !self.ready.swap(true, Ordering::AcqRel) {
            info!("kitchen service ready");
        }
    }

    /// Fail liveness so the orchestrator drains and restarts the process.
    pub fn mark_unhealthy(&self) {
        self.ready.store(false, Ordering::Release);
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn probe_response(healthy: bool) -> HttpResponse {
    let mut builder = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe: 200 once the service can take traffic, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Ready to handle traffic"),
        (status = 503, description = "Not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}

/// Liveness probe: 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Alive"),
        (status = 503, description = "Shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use super::*;

    async fn probe(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Option<String>) {
        let app = test::init_service(App::new().app_data(state).service(ready).service(live)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let cache = res
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        (res.status(), cache)
    }

    #[rstest]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, StatusCode::OK)]
    #[actix_web::test]
    async fn readiness_follows_state(#[case] mark_ready: bool, #[case] expected: StatusCode) {
        let state = web::Data::new(HealthState::new());
        if mark_ready {
            state.mark_ready();
        }

        let (status, cache) = probe(state, "/health/ready").await;

        assert_eq!(status, expected);
        assert_eq!(cache.as_deref(), Some("no-store"));
    }

    #[actix_web::test]
    async fn unhealthy_process_fails_both_probes() {
        let state = web::Data::new(HealthState::new());
        state.mark_ready();
        state.mark_unhealthy();

        let (live_status, _) = probe(state.clone(), "/health/live").await;
        let (ready_status, _) = probe(state, "/health/ready").await;

        assert_eq!(live_status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ready_status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
