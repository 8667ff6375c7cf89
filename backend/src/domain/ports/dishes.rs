//! Driving ports for the dish screens.

use async_trait::async_trait;
use pagination::Page;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CookId, DishDetail, DishId, DishSummary, DishTypeId, Error, IngredientId, ListQuery,
};

use super::{CookPayload, DishTypePayload, IngredientPayload};

/// Dish list row as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishSummaryPayload {
    pub id: DishId,
    #[schema(example = "Borscht")]
    pub name: String,
    /// Decimal string with two fractional digits.
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub dish_type: DishTypePayload,
    /// Canonical display string, `"{name} (price: {price}, type: {type})"`.
    pub display: String,
}

impl From<DishSummary> for DishSummaryPayload {
    fn from(summary: DishSummary) -> Self {
        let display = summary.to_string();
        Self {
            id: summary.id,
            name: summary.name.into(),
            price: summary.price.amount(),
            dish_type: summary.dish_type.into(),
            display,
        }
    }
}

/// Dish detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishDetailPayload {
    #[serde(flatten)]
    pub dish: DishSummaryPayload,
    pub description: String,
    pub cooks: Vec<CookPayload>,
    pub ingredients: Vec<IngredientPayload>,
}

impl From<DishDetail> for DishDetailPayload {
    fn from(detail: DishDetail) -> Self {
        Self {
            dish: detail.summary.into(),
            description: detail.description.into(),
            cooks: detail.cooks.into_iter().map(Into::into).collect(),
            ingredients: detail.ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create/update form for dishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DishRequest {
    #[schema(example = "Borscht")]
    pub name: String,
    pub description: String,
    /// Accepts a JSON number or decimal string.
    #[schema(value_type = Option<String>, example = "12.50")]
    pub price: Option<Decimal>,
    pub dish_type: Option<DishTypeId>,
    pub cooks: Vec<CookId>,
    pub ingredients: Vec<IngredientId>,
}

impl From<DishDetail> for DishRequest {
    fn from(detail: DishDetail) -> Self {
        Self {
            name: detail.summary.name.into(),
            description: detail.description.into(),
            price: Some(detail.summary.price.amount()),
            dish_type: Some(detail.summary.dish_type.id),
            cooks: detail.cooks.into_iter().map(|cook| cook.id).collect(),
            ingredients: detail
                .ingredients
                .into_iter()
                .map(|ingredient| ingredient.id)
                .collect(),
        }
    }
}

/// Records a dish form can reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishFormChoices {
    pub dish_types: Vec<DishTypePayload>,
    pub cooks: Vec<CookPayload>,
    pub ingredients: Vec<IngredientPayload>,
}

/// Read side of the dish screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishQuery: Send + Sync {
    /// Filtered, paginated dishes ordered by name, with their types.
    async fn list_dishes(&self, query: &ListQuery) -> Result<Page<DishSummaryPayload>, Error>;

    /// One dish with its type, cooks and ingredients.
    async fn dish_detail(&self, id: DishId) -> Result<DishDetailPayload, Error>;

    /// Current form values of a dish, for the update screen.
    async fn dish_form(&self, id: DishId) -> Result<DishRequest, Error>;

    /// Selectable dish types, cooks and ingredients.
    async fn dish_form_choices(&self) -> Result<DishFormChoices, Error>;
}

/// Write side of the dish screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishCommand: Send + Sync {
    /// Validate and insert a dish with its relations.
    async fn create_dish(&self, request: DishRequest) -> Result<DishId, Error>;

    /// Validate and replace a dish and its relations.
    async fn update_dish(&self, id: DishId, request: DishRequest) -> Result<(), Error>;

    /// Delete a dish.
    async fn delete_dish(&self, id: DishId) -> Result<(), Error>;
}
