//! Dish type screens.
//!
//! Dish types have no detail screen; the list links straight to update and
//! delete. Deleting a type deletes every dish of that type.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::DishTypeId;
use crate::domain::ports::{DishTypePayload, NamedRecordRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::context::{
    ConfirmDeleteContext, FormContext, ListContext, NameSearchParams, private_ok, see_other,
};
use crate::inbound::http::state::HttpState;

/// Where successful dish type writes redirect.
pub const DISH_TYPE_LIST_PATH: &str = "/dish-type/";

/// Dish types ordered by name, filtered by `name`.
#[utoipa::path(
    get,
    path = "/dish-type/",
    params(NameSearchParams),
    responses((status = 200, description = "One page of dish types with the search box")),
    tags = ["dish types"],
    operation_id = "listDishTypes"
)]
#[get("/")]
pub async fn list_dish_types(
    state: web::Data<HttpState>,
    params: web::Query<NameSearchParams>,
) -> ApiResult<HttpResponse> {
    let query = params.to_query();
    let page = state.dish_types.list_dish_types(&query).await?;
    Ok(private_ok().json(ListContext::new(page, &query)))
}

/// Empty dish type form.
#[utoipa::path(
    get,
    path = "/dish-type/create/",
    responses((status = 200, description = "Dish type form", body = NamedRecordRequest)),
    tags = ["dish types"],
    operation_id = "dishTypeCreateForm"
)]
#[get("/create/")]
pub async fn create_dish_type_form() -> HttpResponse {
    private_ok().json(FormContext::<_> {
        form: NamedRecordRequest::default(),
        object: None,
    })
}

/// Create a dish type.
#[utoipa::path(
    post,
    path = "/dish-type/create/",
    request_body = NamedRecordRequest,
    responses(
        (status = 303, description = "Created; redirects to the dish type list"),
        (status = 400, description = "Invalid form", body = crate::domain::Error)
    ),
    tags = ["dish types"],
    operation_id = "createDishType"
)]
#[post("/create/")]
pub async fn create_dish_type(
    state: web::Data<HttpState>,
    payload: web::Json<NamedRecordRequest>,
) -> ApiResult<HttpResponse> {
    state
        .dish_types_command
        .create_dish_type(payload.into_inner())
        .await?;
    Ok(see_other(DISH_TYPE_LIST_PATH))
}

/// Rename form pre-filled from the dish type.
#[utoipa::path(
    get,
    path = "/dish-type/{id}/update/",
    params(("id" = i64, Path, description = "Dish type id")),
    responses(
        (status = 200, description = "Dish type form", body = NamedRecordRequest),
        (status = 404, description = "Unknown dish type", body = crate::domain::Error)
    ),
    tags = ["dish types"],
    operation_id = "dishTypeUpdateForm"
)]
#[get("/{id}/update/")]
pub async fn update_dish_type_form(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let dish_type: DishTypePayload = state
        .dish_types
        .get_dish_type(DishTypeId::new(path.into_inner()))
        .await?;
    Ok(private_ok().json(FormContext {
        form: NamedRecordRequest {
            name: dish_type.name.clone(),
        },
        object: Some(dish_type),
    }))
}

/// Rename a dish type.
#[utoipa::path(
    post,
    path = "/dish-type/{id}/update/",
    params(("id" = i64, Path, description = "Dish type id")),
    request_body = NamedRecordRequest,
    responses(
        (status = 303, description = "Updated; redirects to the dish type list"),
        (status = 400, description = "Invalid form", body = crate::domain::Error),
        (status = 404, description = "Unknown dish type", body = crate::domain::Error)
    ),
    tags = ["dish types"],
    operation_id = "updateDishType"
)]
#[post("/{id}/update/")]
pub async fn update_dish_type(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<NamedRecordRequest>,
) -> ApiResult<HttpResponse> {
    state
        .dish_types_command
        .rename_dish_type(DishTypeId::new(path.into_inner()), payload.into_inner())
        .await?;
    Ok(see_other(DISH_TYPE_LIST_PATH))
}

/// Delete confirmation.
#[utoipa::path(
    get,
    path = "/dish-type/{id}/delete/",
    params(("id" = i64, Path, description = "Dish type id")),
    responses(
        (status = 200, description = "Dish type about to be deleted", body = DishTypePayload),
        (status = 404, description = "Unknown dish type", body = crate::domain::Error)
    ),
    tags = ["dish types"],
    operation_id = "dishTypeDeleteForm"
)]
#[get("/{id}/delete/")]
pub async fn delete_dish_type_form(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let object = state
        .dish_types
        .get_dish_type(DishTypeId::new(path.into_inner()))
        .await?;
    Ok(private_ok().json(ConfirmDeleteContext { object }))
}

/// Delete a dish type together with its dishes.
#[utoipa::path(
    post,
    path = "/dish-type/{id}/delete/",
    params(("id" = i64, Path, description = "Dish type id")),
    responses(
        (status = 303, description = "Deleted; redirects to the dish type list"),
        (status = 404, description = "Unknown dish type", body = crate::domain::Error)
    ),
    tags = ["dish types"],
    operation_id = "deleteDishType"
)]
#[post("/{id}/delete/")]
pub async fn delete_dish_type(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .dish_types_command
        .delete_dish_type(DishTypeId::new(path.into_inner()))
        .await?;
    Ok(see_other(DISH_TYPE_LIST_PATH))
}

/// Register the dish type screens on a scope mounted at `/dish-type`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_dish_types)
        .service(create_dish_type_form)
        .service(create_dish_type)
        .service(update_dish_type_form)
        .service(update_dish_type)
        .service(delete_dish_type_form)
        .service(delete_dish_type);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::test_utils::memory_state;

    macro_rules! dish_type_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .service(web::scope("/dish-type").configure(configure)),
            )
            .await
        };
    }

    async fn seed(state: &HttpState, name: &str) -> DishTypeId {
        state
            .dish_types_command
            .create_dish_type(NamedRecordRequest {
                name: name.to_owned(),
            })
            .await
            .expect("seed dish type")
            .id
    }

    #[rstest]
    #[case("/dish-type/?name=test_dish_type", json!(["test_dish_type"]))]
    #[case("/dish-type/?name=SOUP", json!(["Soup"]))]
    #[case("/dish-type/?name=%20%20", json!(["Salad", "Soup", "test_dish_type"]))]
    #[actix_web::test]
    async fn list_filters_by_name(#[case] uri: &str, #[case] expected: Value) {
        let (_store, state) = memory_state();
        for name in ["test_dish_type", "Soup", "Salad"] {
            seed(&state, name).await;
        }
        let app = dish_type_app!(state);

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let body: Value = test::read_body_json(res).await;

        let names: Vec<Value> = body["items"]
            .as_array()
            .expect("items array")
            .iter()
            .map(|item| item["name"].clone())
            .collect();
        assert_eq!(Value::Array(names), expected);
    }

    #[actix_web::test]
    async fn blank_name_is_a_field_error() {
        let (_store, state) = memory_state();
        let app = dish_type_app!(state);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/dish-type/create/")
                .set_json(json!({"name": "   "}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert!(body["details"]["fields"]["name"].is_array());
    }

    #[actix_web::test]
    async fn rename_redirects_and_persists() {
        let (_store, state) = memory_state();
        let id = seed(&state, "Soup").await;
        let app = dish_type_app!(state.clone());

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/dish-type/{}/update/", id.get()))
                .set_json(json!({"name": "Soups"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let renamed = state.dish_types.get_dish_type(id).await.expect("exists");
        assert_eq!(renamed.name, "Soups");
    }

    #[actix_web::test]
    async fn delete_confirmation_shows_the_record() {
        let (_store, state) = memory_state();
        let id = seed(&state, "Soup").await;
        let app = dish_type_app!(state);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/dish-type/{}/delete/", id.get()))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["object"]["name"], "Soup");
    }
}
