//! Driving ports for the dish type screens.

use async_trait::async_trait;
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DishType, DishTypeId, Error, ListQuery};

/// Dish type as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishTypePayload {
    pub id: DishTypeId,
    #[schema(example = "Soup")]
    pub name: String,
}

impl From<DishType> for DishTypePayload {
    fn from(dish_type: DishType) -> Self {
        Self {
            id: dish_type.id,
            name: dish_type.name.into(),
        }
    }
}

/// Create/update form for records that only carry a name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NamedRecordRequest {
    #[schema(example = "Soup")]
    pub name: String,
}

/// Read side of the dish type screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishTypeQuery: Send + Sync {
    /// Filtered, paginated dish types ordered by name.
    async fn list_dish_types(&self, query: &ListQuery) -> Result<Page<DishTypePayload>, Error>;

    /// One dish type.
    async fn get_dish_type(&self, id: DishTypeId) -> Result<DishTypePayload, Error>;
}

/// Write side of the dish type screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishTypeCommand: Send + Sync {
    /// Validate and insert a dish type.
    async fn create_dish_type(&self, request: NamedRecordRequest)
    -> Result<DishTypePayload, Error>;

    /// Validate and apply a new name.
    async fn rename_dish_type(
        &self,
        id: DishTypeId,
        request: NamedRecordRequest,
    ) -> Result<DishTypePayload, Error>;

    /// Delete a dish type and, by cascade, its dishes.
    async fn delete_dish_type(&self, id: DishTypeId) -> Result<(), Error>;
}
