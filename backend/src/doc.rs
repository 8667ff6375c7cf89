//! OpenAPI document for the kitchen service.
//!
//! Served through Swagger UI in debug builds. Every kitchen screen expects
//! the session cookie issued by `POST /accounts/login/`; the account
//! screens, the overview and the health probes opt out per operation.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{
    CookDetailPayload, CookPayload, DishDetailPayload, DishFormChoices, DishRequest,
    DishSummaryPayload, DishTypePayload, IngredientPayload, KitchenOverview, NamedRecordRequest,
    RegisterCookRequest, UpdateCookExperienceRequest,
};
use crate::domain::{Error, ErrorCode, FieldIssue, SearchFormContext};
use crate::inbound::http::accounts::LoginRequest;
use crate::inbound::http::dishes::DishFormContext;
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;

struct SessionCookieScheme;

impl Modify for SessionCookieScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Encrypted session cookie issued by POST /accounts/login/.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieScheme),
    info(
        title = "Kitchen service API",
        description = "Cooks, dish types, ingredients and dishes behind a cookie session."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::overview::overview,
        crate::inbound::http::accounts::login_form,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::cooks::list_cooks,
        crate::inbound::http::cooks::create_cook_form,
        crate::inbound::http::cooks::create_cook,
        crate::inbound::http::cooks::cook_detail,
        crate::inbound::http::cooks::update_cook_form,
        crate::inbound::http::cooks::update_cook,
        crate::inbound::http::cooks::delete_cook_form,
        crate::inbound::http::cooks::delete_cook,
        crate::inbound::http::dish_types::list_dish_types,
        crate::inbound::http::dish_types::create_dish_type_form,
        crate::inbound::http::dish_types::create_dish_type,
        crate::inbound::http::dish_types::update_dish_type_form,
        crate::inbound::http::dish_types::update_dish_type,
        crate::inbound::http::dish_types::delete_dish_type_form,
        crate::inbound::http::dish_types::delete_dish_type,
        crate::inbound::http::ingredients::list_ingredients,
        crate::inbound::http::ingredients::create_ingredient_form,
        crate::inbound::http::ingredients::create_ingredient,
        crate::inbound::http::ingredients::update_ingredient_form,
        crate::inbound::http::ingredients::update_ingredient,
        crate::inbound::http::ingredients::delete_ingredient_form,
        crate::inbound::http::ingredients::delete_ingredient,
        crate::inbound::http::dishes::list_dishes,
        crate::inbound::http::dishes::create_dish_form,
        crate::inbound::http::dishes::create_dish,
        crate::inbound::http::dishes::dish_detail,
        crate::inbound::http::dishes::update_dish_form,
        crate::inbound::http::dishes::update_dish,
        crate::inbound::http::dishes::delete_dish_form,
        crate::inbound::http::dishes::delete_dish,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        FieldIssue,
        SearchFormContext,
        KitchenOverview,
        LoginRequest,
        CookPayload,
        CookDetailPayload,
        RegisterCookRequest,
        UpdateCookExperienceRequest,
        DishTypePayload,
        IngredientPayload,
        NamedRecordRequest,
        DishSummaryPayload,
        DishDetailPayload,
        DishRequest,
        DishFormChoices,
        DishFormContext,
    )),
    tags(
        (name = "overview", description = "Home screen counters"),
        (name = "accounts", description = "Login and logout"),
        (name = "cooks", description = "Cook accounts"),
        (name = "dish-types", description = "Dish categories"),
        (name = "ingredients", description = "Ingredients"),
        (name = "dishes", description = "Dishes with their cooks and ingredients"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
