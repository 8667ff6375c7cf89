//! Cook screens.
//!
//! ```text
//! GET  /cook/?username=ann&page=2
//! GET  /cook/create/          POST /cook/create/
//! GET  /cook/{id}/
//! GET  /cook/{id}/update/     POST /cook/{id}/update/
//! GET  /cook/{id}/delete/     POST /cook/{id}/delete/
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::CookId;
use crate::domain::ports::{
    CookDetailPayload, CookPayload, RegisterCookRequest, UpdateCookExperienceRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::context::{
    ConfirmDeleteContext, FormContext, ListContext, UsernameSearchParams, private_ok, see_other,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::middleware::login_required::LOGIN_PATH;

/// Where successful cook writes redirect.
pub const COOK_LIST_PATH: &str = "/cook/";

/// Cooks ordered by username, filtered by `username`.
#[utoipa::path(
    get,
    path = "/cook/",
    params(UsernameSearchParams),
    responses(
        (status = 200, description = "One page of cooks with the search box"),
        (status = 302, description = "Login required")
    ),
    tags = ["cooks"],
    operation_id = "listCooks"
)]
#[get("/")]
pub async fn list_cooks(
    state: web::Data<HttpState>,
    params: web::Query<UsernameSearchParams>,
) -> ApiResult<HttpResponse> {
    let query = params.to_query();
    let page = state.cooks.list_cooks(&query).await?;
    Ok(private_ok().json(ListContext::new(page, &query)))
}

/// Empty registration form.
#[utoipa::path(
    get,
    path = "/cook/create/",
    responses((status = 200, description = "Registration form", body = RegisterCookRequest)),
    tags = ["cooks"],
    operation_id = "cookCreateForm"
)]
#[get("/create/")]
pub async fn create_cook_form() -> HttpResponse {
    private_ok().json(FormContext::<_> {
        form: RegisterCookRequest::default(),
        object: None,
    })
}

/// Register a cook account.
#[utoipa::path(
    post,
    path = "/cook/create/",
    request_body = RegisterCookRequest,
    responses(
        (status = 303, description = "Created; redirects to the cook list"),
        (status = 400, description = "Invalid form", body = crate::domain::Error)
    ),
    tags = ["cooks"],
    operation_id = "createCook"
)]
#[post("/create/")]
pub async fn create_cook(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterCookRequest>,
) -> ApiResult<HttpResponse> {
    state.cooks_command.register_cook(payload.into_inner()).await?;
    Ok(see_other(COOK_LIST_PATH))
}

/// Cook with the dishes they are credited on.
#[utoipa::path(
    get,
    path = "/cook/{id}/",
    params(("id" = i64, Path, description = "Cook id")),
    responses(
        (status = 200, description = "Cook detail", body = CookDetailPayload),
        (status = 404, description = "Unknown cook", body = crate::domain::Error)
    ),
    tags = ["cooks"],
    operation_id = "cookDetail"
)]
#[get("/{id}/")]
pub async fn cook_detail(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let detail = state.cooks.cook_detail(CookId::new(path.into_inner())).await?;
    Ok(private_ok().json(detail))
}

/// Experience form pre-filled from the cook.
#[utoipa::path(
    get,
    path = "/cook/{id}/update/",
    params(("id" = i64, Path, description = "Cook id")),
    responses(
        (status = 200, description = "Experience form", body = UpdateCookExperienceRequest),
        (status = 404, description = "Unknown cook", body = crate::domain::Error)
    ),
    tags = ["cooks"],
    operation_id = "cookUpdateForm"
)]
#[get("/{id}/update/")]
pub async fn update_cook_form(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let cook: CookPayload = state.cooks.get_cook(CookId::new(path.into_inner())).await?;
    let form = UpdateCookExperienceRequest {
        years_of_experience: Some(i64::from(cook.years_of_experience)),
    };
    Ok(private_ok().json(FormContext {
        form,
        object: Some(cook),
    }))
}

/// Replace a cook's years of experience.
#[utoipa::path(
    post,
    path = "/cook/{id}/update/",
    params(("id" = i64, Path, description = "Cook id")),
    request_body = UpdateCookExperienceRequest,
    responses(
        (status = 303, description = "Updated; redirects to the cook list"),
        (status = 400, description = "Invalid form", body = crate::domain::Error),
        (status = 404, description = "Unknown cook", body = crate::domain::Error)
    ),
    tags = ["cooks"],
    operation_id = "updateCook"
)]
#[post("/{id}/update/")]
pub async fn update_cook(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateCookExperienceRequest>,
) -> ApiResult<HttpResponse> {
    state
        .cooks_command
        .update_experience(CookId::new(path.into_inner()), payload.into_inner())
        .await?;
    Ok(see_other(COOK_LIST_PATH))
}

/// Delete confirmation.
#[utoipa::path(
    get,
    path = "/cook/{id}/delete/",
    params(("id" = i64, Path, description = "Cook id")),
    responses(
        (status = 200, description = "Cook about to be deleted", body = CookPayload),
        (status = 404, description = "Unknown cook", body = crate::domain::Error)
    ),
    tags = ["cooks"],
    operation_id = "cookDeleteForm"
)]
#[get("/{id}/delete/")]
pub async fn delete_cook_form(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let object = state.cooks.get_cook(CookId::new(path.into_inner())).await?;
    Ok(private_ok().json(ConfirmDeleteContext { object }))
}

/// Delete a cook. Their dishes stay, without this cook credited.
///
/// A cook deleting their own account is logged out on the spot.
#[utoipa::path(
    post,
    path = "/cook/{id}/delete/",
    params(("id" = i64, Path, description = "Cook id")),
    responses(
        (status = 303, description = "Deleted; redirects to the cook list, or to login after self-deletion"),
        (status = 404, description = "Unknown cook", body = crate::domain::Error)
    ),
    tags = ["cooks"],
    operation_id = "deleteCook"
)]
#[post("/{id}/delete/")]
pub async fn delete_cook(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = CookId::new(path.into_inner());
    state.cooks_command.delete_cook(id).await?;
    if session.cook_id()? == Some(id) {
        session.purge();
        return Ok(see_other(LOGIN_PATH));
    }
    Ok(see_other(COOK_LIST_PATH))
}

/// Register the cook screens on a scope mounted at `/cook`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_cooks)
        .service(create_cook_form)
        .service(create_cook)
        .service(cook_detail)
        .service(update_cook_form)
        .service(update_cook)
        .service(delete_cook_form)
        .service(delete_cook);
}

#[cfg(test)]
#[path = "cooks_tests.rs"]
mod tests;
