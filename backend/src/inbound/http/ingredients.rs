//! Ingredient screens.
//!
//! Deleting an ingredient removes it from every dish that listed it; the
//! dishes themselves stay.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::IngredientId;
use crate::domain::ports::{IngredientPayload, NamedRecordRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::context::{
    ConfirmDeleteContext, FormContext, ListContext, NameSearchParams, private_ok, see_other,
};
use crate::inbound::http::state::HttpState;

/// Where successful ingredient writes redirect.
pub const INGREDIENT_LIST_PATH: &str = "/ingredient/";

/// Ingredients ordered by name, filtered by `name`.
#[utoipa::path(
    get,
    path = "/ingredient/",
    params(NameSearchParams),
    responses((status = 200, description = "One page of ingredients with the search box")),
    tags = ["ingredients"],
    operation_id = "listIngredients"
)]
#[get("/")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    params: web::Query<NameSearchParams>,
) -> ApiResult<HttpResponse> {
    let query = params.to_query();
    let page = state.ingredients.list_ingredients(&query).await?;
    Ok(private_ok().json(ListContext::new(page, &query)))
}

/// Empty ingredient form.
#[utoipa::path(
    get,
    path = "/ingredient/create/",
    responses((status = 200, description = "Ingredient form", body = NamedRecordRequest)),
    tags = ["ingredients"],
    operation_id = "ingredientCreateForm"
)]
#[get("/create/")]
pub async fn create_ingredient_form() -> HttpResponse {
    private_ok().json(FormContext::<_> {
        form: NamedRecordRequest::default(),
        object: None,
    })
}

/// Create an ingredient.
#[utoipa::path(
    post,
    path = "/ingredient/create/",
    request_body = NamedRecordRequest,
    responses(
        (status = 303, description = "Created; redirects to the ingredient list"),
        (status = 400, description = "Invalid form", body = crate::domain::Error)
    ),
    tags = ["ingredients"],
    operation_id = "createIngredient"
)]
#[post("/create/")]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    payload: web::Json<NamedRecordRequest>,
) -> ApiResult<HttpResponse> {
    state
        .ingredients_command
        .create_ingredient(payload.into_inner())
        .await?;
    Ok(see_other(INGREDIENT_LIST_PATH))
}

/// Rename form pre-filled from the ingredient.
#[utoipa::path(
    get,
    path = "/ingredient/{id}/update/",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 200, description = "Ingredient form", body = NamedRecordRequest),
        (status = 404, description = "Unknown ingredient", body = crate::domain::Error)
    ),
    tags = ["ingredients"],
    operation_id = "ingredientUpdateForm"
)]
#[get("/{id}/update/")]
pub async fn update_ingredient_form(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let ingredient: IngredientPayload = state
        .ingredients
        .get_ingredient(IngredientId::new(path.into_inner()))
        .await?;
    Ok(private_ok().json(FormContext {
        form: NamedRecordRequest {
            name: ingredient.name.clone(),
        },
        object: Some(ingredient),
    }))
}

/// Rename an ingredient.
#[utoipa::path(
    post,
    path = "/ingredient/{id}/update/",
    params(("id" = i64, Path, description = "Ingredient id")),
    request_body = NamedRecordRequest,
    responses(
        (status = 303, description = "Updated; redirects to the ingredient list"),
        (status = 400, description = "Invalid form", body = crate::domain::Error),
        (status = 404, description = "Unknown ingredient", body = crate::domain::Error)
    ),
    tags = ["ingredients"],
    operation_id = "updateIngredient"
)]
#[post("/{id}/update/")]
pub async fn update_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<NamedRecordRequest>,
) -> ApiResult<HttpResponse> {
    state
        .ingredients_command
        .rename_ingredient(IngredientId::new(path.into_inner()), payload.into_inner())
        .await?;
    Ok(see_other(INGREDIENT_LIST_PATH))
}

/// Delete confirmation.
#[utoipa::path(
    get,
    path = "/ingredient/{id}/delete/",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 200, description = "Ingredient about to be deleted", body = IngredientPayload),
        (status = 404, description = "Unknown ingredient", body = crate::domain::Error)
    ),
    tags = ["ingredients"],
    operation_id = "ingredientDeleteForm"
)]
#[get("/{id}/delete/")]
pub async fn delete_ingredient_form(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let object = state
        .ingredients
        .get_ingredient(IngredientId::new(path.into_inner()))
        .await?;
    Ok(private_ok().json(ConfirmDeleteContext { object }))
}

/// Delete an ingredient.
#[utoipa::path(
    post,
    path = "/ingredient/{id}/delete/",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 303, description = "Deleted; redirects to the ingredient list"),
        (status = 404, description = "Unknown ingredient", body = crate::domain::Error)
    ),
    tags = ["ingredients"],
    operation_id = "deleteIngredient"
)]
#[post("/{id}/delete/")]
pub async fn delete_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .ingredients_command
        .delete_ingredient(IngredientId::new(path.into_inner()))
        .await?;
    Ok(see_other(INGREDIENT_LIST_PATH))
}

/// Register the ingredient screens on a scope mounted at `/ingredient`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_ingredients)
        .service(create_ingredient_form)
        .service(create_ingredient)
        .service(update_ingredient_form)
        .service(update_ingredient)
        .service(delete_ingredient_form)
        .service(delete_ingredient);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::test_utils::memory_state;

    macro_rules! ingredient_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .service(web::scope("/ingredient").configure(configure)),
            )
            .await
        };
    }

    async fn seed(state: &HttpState, name: &str) -> IngredientId {
        state
            .ingredients_command
            .create_ingredient(NamedRecordRequest {
                name: name.to_owned(),
            })
            .await
            .expect("seed ingredient")
            .id
    }

    #[rstest]
    #[case("/ingredient/", 1, 10, true)]
    #[case("/ingredient/?page=2", 2, 2, false)]
    #[case("/ingredient/?page=99", 2, 2, false)]
    #[case("/ingredient/?page=abc", 1, 10, true)]
    #[actix_web::test]
    async fn list_pages_by_ten_and_clamps(
        #[case] uri: &str,
        #[case] number: u64,
        #[case] items: usize,
        #[case] has_next: bool,
    ) {
        let (_store, state) = memory_state();
        for n in 1..=12 {
            seed(&state, &format!("Ingredient_{n:02}")).await;
        }
        let app = ingredient_app!(state);

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;

        assert_eq!(body["page"]["number"], number);
        assert_eq!(body["page"]["totalPages"], 2);
        assert_eq!(body["page"]["totalItems"], 12);
        assert_eq!(body["page"]["hasNext"], has_next);
        assert_eq!(body["items"].as_array().map(Vec::len), Some(items));
    }

    #[actix_web::test]
    async fn filter_is_carried_into_page_links() {
        let (_store, state) = memory_state();
        for n in 1..=11 {
            seed(&state, &format!("Garlic {n:02}")).await;
        }
        seed(&state, "Onion").await;
        let app = ingredient_app!(state);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/ingredient/?name=garlic")
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;

        assert_eq!(body["page"]["totalItems"], 11);
        assert_eq!(body["page"]["next"], "?name=garlic&page=2");
        assert_eq!(body["searchForm"]["value"], "garlic");
    }

    #[actix_web::test]
    async fn update_form_echoes_current_name() {
        let (_store, state) = memory_state();
        let id = seed(&state, "Onion").await;
        let app = ingredient_app!(state);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/ingredient/{}/update/", id.get()))
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;

        assert_eq!(body["form"]["name"], "Onion");
        assert_eq!(body["object"]["id"], id.get());
    }

    #[actix_web::test]
    async fn deleting_twice_is_not_found() {
        let (_store, state) = memory_state();
        let id = seed(&state, "Onion").await;
        let app = ingredient_app!(state);
        let uri = format!("/ingredient/{}/delete/", id.get());

        let first = test::call_service(&app, test::TestRequest::post().uri(&uri).to_request()).await;
        let second = test::call_service(&app, test::TestRequest::post().uri(&uri).to_request()).await;

        assert_eq!(first.status(), StatusCode::SEE_OTHER);
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
    }
}
