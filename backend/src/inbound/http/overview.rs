//! Home screen counters.

use actix_web::{HttpResponse, get, web};

use crate::domain::ports::KitchenOverview;
use crate::inbound::http::ApiResult;
use crate::inbound::http::context::private_ok;
use crate::inbound::http::state::HttpState;

/// Number of cooks, dishes, dish types and ingredients.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Record counts", body = KitchenOverview),
        (status = 503, description = "Store unavailable", body = crate::domain::Error)
    ),
    tags = ["overview"],
    operation_id = "overview",
    security([])
)]
#[get("/")]
pub async fn overview(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let counts = state.overview.overview().await?;
    Ok(private_ok().json(counts))
}
