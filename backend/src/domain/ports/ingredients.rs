//! Driving ports for the ingredient screens.

use async_trait::async_trait;
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Ingredient, IngredientId, ListQuery};

use super::NamedRecordRequest;

/// Ingredient as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientPayload {
    pub id: IngredientId,
    #[schema(example = "Garlic")]
    pub name: String,
}

impl From<Ingredient> for IngredientPayload {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name.into(),
        }
    }
}

/// Read side of the ingredient screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientQuery: Send + Sync {
    /// Filtered, paginated ingredients ordered by name.
    async fn list_ingredients(&self, query: &ListQuery)
    -> Result<Page<IngredientPayload>, Error>;

    /// One ingredient.
    async fn get_ingredient(&self, id: IngredientId) -> Result<IngredientPayload, Error>;
}

/// Write side of the ingredient screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientCommand: Send + Sync {
    /// Validate and insert an ingredient.
    async fn create_ingredient(
        &self,
        request: NamedRecordRequest,
    ) -> Result<IngredientPayload, Error>;

    /// Validate and apply a new name.
    async fn rename_ingredient(
        &self,
        id: IngredientId,
        request: NamedRecordRequest,
    ) -> Result<IngredientPayload, Error>;

    /// Delete an ingredient.
    async fn delete_ingredient(&self, id: IngredientId) -> Result<(), Error>;
}
