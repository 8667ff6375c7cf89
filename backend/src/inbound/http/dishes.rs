//! Dish screens.
//!
//! Dish forms reference a dish type, cooks and ingredients by id. Create and
//! update screens therefore also carry the selectable records.

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;

use crate::domain::DishId;
use crate::domain::ports::{DishDetailPayload, DishFormChoices, DishRequest, DishSummaryPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::context::{
    ConfirmDeleteContext, ListContext, NameSearchParams, private_ok, see_other,
};
use crate::inbound::http::state::HttpState;

/// Where successful dish writes redirect.
pub const DISH_LIST_PATH: &str = "/dish/";

/// Create or update screen for a dish.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishFormContext {
    pub form: DishRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<DishId>,
    pub choices: DishFormChoices,
}

/// Dishes ordered by name with their types, filtered by `name`.
#[utoipa::path(
    get,
    path = "/dish/",
    params(NameSearchParams),
    responses((status = 200, description = "One page of dishes with the search box")),
    tags = ["dishes"],
    operation_id = "listDishes"
)]
#[get("/")]
pub async fn list_dishes(
    state: web::Data<HttpState>,
    params: web::Query<NameSearchParams>,
) -> ApiResult<HttpResponse> {
    let query = params.to_query();
    let page = state.dishes.list_dishes(&query).await?;
    Ok(private_ok().json(ListContext::<DishSummaryPayload>::new(page, &query)))
}

/// Empty dish form with the selectable records.
#[utoipa::path(
    get,
    path = "/dish/create/",
    responses((status = 200, description = "Dish form", body = DishFormContext)),
    tags = ["dishes"],
    operation_id = "dishCreateForm"
)]
#[get("/create/")]
pub async fn create_dish_form(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let choices = state.dishes.dish_form_choices().await?;
    Ok(private_ok().json(DishFormContext {
        form: DishRequest::default(),
        object: None,
        choices,
    }))
}

/// Create a dish with exactly the submitted relations.
#[utoipa::path(
    post,
    path = "/dish/create/",
    request_body = DishRequest,
    responses(
        (status = 303, description = "Created; redirects to the dish list"),
        (status = 400, description = "Invalid form", body = crate::domain::Error)
    ),
    tags = ["dishes"],
    operation_id = "createDish"
)]
#[post("/create/")]
pub async fn create_dish(
    state: web::Data<HttpState>,
    payload: web::Json<DishRequest>,
) -> ApiResult<HttpResponse> {
    state.dishes_command.create_dish(payload.into_inner()).await?;
    Ok(see_other(DISH_LIST_PATH))
}

/// Dish with its type, cooks and ingredients.
#[utoipa::path(
    get,
    path = "/dish/{id}/",
    params(("id" = i64, Path, description = "Dish id")),
    responses(
        (status = 200, description = "Dish detail", body = DishDetailPayload),
        (status = 404, description = "Unknown dish", body = crate::domain::Error)
    ),
    tags = ["dishes"],
    operation_id = "dishDetail"
)]
#[get("/{id}/")]
pub async fn dish_detail(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let detail = state.dishes.dish_detail(DishId::new(path.into_inner())).await?;
    Ok(private_ok().json(detail))
}

/// Dish form pre-filled from the stored dish.
#[utoipa::path(
    get,
    path = "/dish/{id}/update/",
    params(("id" = i64, Path, description = "Dish id")),
    responses(
        (status = 200, description = "Dish form", body = DishFormContext),
        (status = 404, description = "Unknown dish", body = crate::domain::Error)
    ),
    tags = ["dishes"],
    operation_id = "dishUpdateForm"
)]
#[get("/{id}/update/")]
pub async fn update_dish_form(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = DishId::new(path.into_inner());
    let form = state.dishes.dish_form(id).await?;
    let choices = state.dishes.dish_form_choices().await?;
    Ok(private_ok().json(DishFormContext {
        form,
        object: Some(id),
        choices,
    }))
}

/// Replace a dish and its relations.
#[utoipa::path(
    post,
    path = "/dish/{id}/update/",
    params(("id" = i64, Path, description = "Dish id")),
    request_body = DishRequest,
    responses(
        (status = 303, description = "Updated; redirects to the dish list"),
        (status = 400, description = "Invalid form", body = crate::domain::Error),
        (status = 404, description = "Unknown dish", body = crate::domain::Error)
    ),
    tags = ["dishes"],
    operation_id = "updateDish"
)]
#[post("/{id}/update/")]
pub async fn update_dish(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<DishRequest>,
) -> ApiResult<HttpResponse> {
    state
        .dishes_command
        .update_dish(DishId::new(path.into_inner()), payload.into_inner())
        .await?;
    Ok(see_other(DISH_LIST_PATH))
}

/// Delete confirmation.
#[utoipa::path(
    get,
    path = "/dish/{id}/delete/",
    params(("id" = i64, Path, description = "Dish id")),
    responses(
        (status = 200, description = "Dish about to be deleted", body = DishDetailPayload),
        (status = 404, description = "Unknown dish", body = crate::domain::Error)
    ),
    tags = ["dishes"],
    operation_id = "dishDeleteForm"
)]
#[get("/{id}/delete/")]
pub async fn delete_dish_form(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let object = state.dishes.dish_detail(DishId::new(path.into_inner())).await?;
    Ok(private_ok().json(ConfirmDeleteContext { object }))
}

/// Delete a dish.
#[utoipa::path(
    post,
    path = "/dish/{id}/delete/",
    params(("id" = i64, Path, description = "Dish id")),
    responses(
        (status = 303, description = "Deleted; redirects to the dish list"),
        (status = 404, description = "Unknown dish", body = crate::domain::Error)
    ),
    tags = ["dishes"],
    operation_id = "deleteDish"
)]
#[post("/{id}/delete/")]
pub async fn delete_dish(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .dishes_command
        .delete_dish(DishId::new(path.into_inner()))
        .await?;
    Ok(see_other(DISH_LIST_PATH))
}

/// Register the dish screens on a scope mounted at `/dish`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_dishes)
        .service(create_dish_form)
        .service(create_dish)
        .service(dish_detail)
        .service(update_dish_form)
        .service(update_dish)
        .service(delete_dish_form)
        .service(delete_dish);
}

#[cfg(test)]
#[path = "dishes_tests.rs"]
mod tests;
