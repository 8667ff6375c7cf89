//! Tests for the dish service.

use std::sync::Arc;

use rust_decimal::Decimal;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    KitchenRepositoryError, MockCookRepository, MockDishRepository, MockDishTypeRepository,
    MockIngredientRepository,
};
use crate::domain::{CookId, DishType, DishTypeName, ErrorCode, IngredientId};

#[derive(Default)]
struct Mocks {
    dishes: MockDishRepository,
    dish_types: MockDishTypeRepository,
    cooks: MockCookRepository,
    ingredients: MockIngredientRepository,
}

impl Mocks {
    fn into_service(self) -> DishService {
        DishService::new(DishServiceRepositories {
            dishes: Arc::new(self.dishes),
            dish_types: Arc::new(self.dish_types),
            cooks: Arc::new(self.cooks),
            ingredients: Arc::new(self.ingredients),
        })
    }

    fn with_known_references(mut self) -> Self {
        self.dish_types.expect_find_dish_type().returning(|id| {
            Ok(Some(DishType {
                id,
                name: DishTypeName::new("Soup").expect("valid name"),
            }))
        });
        self.cooks
            .expect_existing_cook_ids()
            .returning(|ids| Ok(ids.to_vec()));
        self.ingredients
            .expect_existing_ingredient_ids()
            .returning(|ids| Ok(ids.to_vec()));
        self
    }
}

#[fixture]
fn request() -> DishRequest {
    DishRequest {
        name: "Borscht".to_owned(),
        description: "Beetroot soup".to_owned(),
        price: Some(Decimal::new(125, 1)),
        dish_type: Some(DishTypeId::new(1)),
        cooks: vec![CookId::new(2), CookId::new(1)],
        ingredients: vec![IngredientId::new(7)],
    }
}

fn field_codes(error: &Error, field: &str) -> Vec<String> {
    error
        .details()
        .and_then(|details| details["fields"][field].as_array().cloned())
        .unwrap_or_default()
        .into_iter()
        .filter_map(|issue| issue["code"].as_str().map(str::to_owned))
        .collect()
}

#[rstest]
#[tokio::test]
async fn create_persists_exactly_the_submitted_relations(request: DishRequest) {
    let mut mocks = Mocks::default().with_known_references();
    mocks
        .dishes
        .expect_insert_dish()
        .withf(|draft| {
            draft.dish_type == DishTypeId::new(1)
                && draft.cooks == vec![CookId::new(1), CookId::new(2)]
                && draft.ingredients == vec![IngredientId::new(7)]
                && draft.price.to_string() == "12.50"
        })
        .times(1)
        .return_once(|_| Ok(DishId::new(10)));

    let id = mocks
        .into_service()
        .create_dish(request)
        .await
        .expect("create succeeds");

    assert_eq!(id, DishId::new(10));
}

#[rstest]
#[tokio::test]
async fn create_reports_missing_fields_together(mut request: DishRequest) {
    request.name = String::new();
    request.price = None;
    request.dish_type = None;
    let mut mocks = Mocks::default().with_known_references();
    mocks.dishes.expect_insert_dish().times(0);

    let err = mocks
        .into_service()
        .create_dish(request)
        .await
        .expect_err("missing fields");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(field_codes(&err, "name"), vec!["required"]);
    assert_eq!(field_codes(&err, "price"), vec!["required"]);
    assert_eq!(field_codes(&err, "dishType"), vec!["required"]);
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_references(request: DishRequest) {
    let mut mocks = Mocks::default();
    mocks
        .dish_types
        .expect_find_dish_type()
        .return_once(|_| Ok(None));
    mocks
        .cooks
        .expect_existing_cook_ids()
        .return_once(|_| Ok(vec![CookId::new(1)]));
    mocks
        .ingredients
        .expect_existing_ingredient_ids()
        .return_once(|_| Ok(Vec::new()));
    mocks.dishes.expect_insert_dish().times(0);

    let err = mocks
        .into_service()
        .create_dish(request)
        .await
        .expect_err("unknown references");

    assert_eq!(field_codes(&err, "dishType"), vec!["invalid_choice"]);
    assert_eq!(field_codes(&err, "cooks"), vec!["invalid_choice"]);
    assert_eq!(field_codes(&err, "ingredients"), vec!["invalid_choice"]);
}

#[rstest]
#[tokio::test]
async fn create_rejects_prices_with_three_decimals(mut request: DishRequest) {
    request.price = Some(Decimal::new(12_345, 3));
    let mut mocks = Mocks::default().with_known_references();
    mocks.dishes.expect_insert_dish().times(0);

    let err = mocks
        .into_service()
        .create_dish(request)
        .await
        .expect_err("too precise");

    assert_eq!(field_codes(&err, "price"), vec!["max_decimal_places"]);
}

#[rstest]
#[tokio::test]
async fn update_unknown_dish_is_not_found(request: DishRequest) {
    let mut mocks = Mocks::default().with_known_references();
    mocks
        .dishes
        .expect_update_dish()
        .return_once(|_, _| Ok(false));

    let err = mocks
        .into_service()
        .update_dish(DishId::new(3), request)
        .await
        .expect_err("unknown dish");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn store_outage_is_service_unavailable(request: DishRequest) {
    let mut mocks = Mocks::default();
    mocks
        .dish_types
        .expect_find_dish_type()
        .return_once(|_| Err(KitchenRepositoryError::connection("pool exhausted")));

    let err = mocks
        .into_service()
        .create_dish(request)
        .await
        .expect_err("store down");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn delete_unknown_dish_is_not_found() {
    let mut mocks = Mocks::default();
    mocks.dishes.expect_delete_dish().return_once(|_| Ok(false));

    let err = mocks
        .into_service()
        .delete_dish(DishId::new(3))
        .await
        .expect_err("unknown dish");

    assert_eq!(err.code(), ErrorCode::NotFound);
}
