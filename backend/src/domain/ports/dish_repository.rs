//! Port abstraction for dish persistence.

use async_trait::async_trait;
use pagination::PageWindow;

use crate::domain::{DishDetail, DishDraft, DishId, DishSummary, SearchFilter};

use super::KitchenRepositoryError;

/// Driven port over stored dishes, ordered by name then id.
///
/// Adapters write a dish and its cook and ingredient links atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishRepository: Send + Sync {
    /// Count dishes whose name matches `filter`.
    async fn count_dishes(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError>;

    /// Load one window of matching dishes with their types.
    async fn list_dishes(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<DishSummary>, KitchenRepositoryError>;

    /// Fetch a dish with its type, cooks and ingredients.
    async fn find_dish(&self, id: DishId) -> Result<Option<DishDetail>, KitchenRepositoryError>;

    /// Insert a dish and its links.
    async fn insert_dish(&self, draft: &DishDraft) -> Result<DishId, KitchenRepositoryError>;

    /// Replace a dish and its links; `false` when the dish is unknown.
    async fn update_dish(
        &self,
        id: DishId,
        draft: &DishDraft,
    ) -> Result<bool, KitchenRepositoryError>;

    /// Delete a dish and its links; `false` when the dish is unknown.
    async fn delete_dish(&self, id: DishId) -> Result<bool, KitchenRepositoryError>;
}
