//! Port abstraction for dish type persistence.

use async_trait::async_trait;
use pagination::PageWindow;

use crate::domain::{DishType, DishTypeId, DishTypeName, SearchFilter};

use super::KitchenRepositoryError;

/// Driven port over stored dish types, ordered by name then id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishTypeRepository: Send + Sync {
    /// Count dish types whose name matches `filter`.
    async fn count_dish_types(&self, filter: &SearchFilter)
    -> Result<u64, KitchenRepositoryError>;

    /// Load one window of matching dish types.
    async fn list_dish_types(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<DishType>, KitchenRepositoryError>;

    /// Every dish type, for selection lists.
    async fn all_dish_types(&self) -> Result<Vec<DishType>, KitchenRepositoryError>;

    /// Fetch a dish type by identifier.
    async fn find_dish_type(
        &self,
        id: DishTypeId,
    ) -> Result<Option<DishType>, KitchenRepositoryError>;

    /// Insert a dish type.
    async fn insert_dish_type(&self, name: &DishTypeName)
    -> Result<DishType, KitchenRepositoryError>;

    /// Rename a dish type; `None` when it is unknown.
    async fn rename_dish_type(
        &self,
        id: DishTypeId,
        name: &DishTypeName,
    ) -> Result<Option<DishType>, KitchenRepositoryError>;

    /// Delete a dish type together with its dishes; `false` when unknown.
    async fn delete_dish_type(&self, id: DishTypeId) -> Result<bool, KitchenRepositoryError>;
}
