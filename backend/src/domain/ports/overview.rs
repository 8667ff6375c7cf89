//! Driving port for the home screen counters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;

/// Number of stored records per entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KitchenOverview {
    pub num_cooks: u64,
    pub num_dishes: u64,
    pub num_dish_types: u64,
    pub num_ingredients: u64,
}

/// Read the home screen counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KitchenOverviewQuery: Send + Sync {
    /// Count every entity.
    async fn overview(&self) -> Result<KitchenOverview, Error>;
}
