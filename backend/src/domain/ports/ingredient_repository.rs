//! Port abstraction for ingredient persistence.

use async_trait::async_trait;
use pagination::PageWindow;

use crate::domain::{Ingredient, IngredientId, IngredientName, SearchFilter};

use super::KitchenRepositoryError;

/// Driven port over stored ingredients, ordered by name then id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Count ingredients whose name matches `filter`.
    async fn count_ingredients(
        &self,
        filter: &SearchFilter,
    ) -> Result<u64, KitchenRepositoryError>;

    /// Load one window of matching ingredients.
    async fn list_ingredients(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<Ingredient>, KitchenRepositoryError>;

    /// Every ingredient, for selection lists.
    async fn all_ingredients(&self) -> Result<Vec<Ingredient>, KitchenRepositoryError>;

    /// Fetch an ingredient by identifier.
    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, KitchenRepositoryError>;

    /// The subset of `ids` that exist.
    async fn existing_ingredient_ids(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<IngredientId>, KitchenRepositoryError>;

    /// Insert an ingredient.
    async fn insert_ingredient(
        &self,
        name: &IngredientName,
    ) -> Result<Ingredient, KitchenRepositoryError>;

    /// Rename an ingredient; `None` when it is unknown.
    async fn rename_ingredient(
        &self,
        id: IngredientId,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, KitchenRepositoryError>;

    /// Delete an ingredient and its dish links; `false` when unknown.
    async fn delete_ingredient(&self, id: IngredientId) -> Result<bool, KitchenRepositoryError>;
}
