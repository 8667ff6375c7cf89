//! Port abstraction for cook persistence.

use async_trait::async_trait;
use pagination::PageWindow;

use crate::domain::{
    Cook, CookCredentials, CookId, DishSummary, NewCook, SearchFilter, YearsOfExperience,
};

use super::KitchenRepositoryError;

/// Driven port over stored cook accounts.
///
/// Listings are ordered by username, then id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CookRepository: Send + Sync {
    /// Count cooks whose username matches `filter`.
    async fn count_cooks(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError>;

    /// Load one window of matching cooks.
    async fn list_cooks(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<Cook>, KitchenRepositoryError>;

    /// Every cook, for selection lists.
    async fn all_cooks(&self) -> Result<Vec<Cook>, KitchenRepositoryError>;

    /// Fetch a cook by identifier.
    async fn find_cook(&self, id: CookId) -> Result<Option<Cook>, KitchenRepositoryError>;

    /// Fetch the stored password hash for `username`.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<CookCredentials>, KitchenRepositoryError>;

    /// Dishes the cook is credited on, ordered by dish name.
    async fn cook_dishes(&self, id: CookId) -> Result<Vec<DishSummary>, KitchenRepositoryError>;

    /// The subset of `ids` that exist.
    async fn existing_cook_ids(
        &self,
        ids: &[CookId],
    ) -> Result<Vec<CookId>, KitchenRepositoryError>;

    /// Insert a new account.
    ///
    /// Fails with [`KitchenRepositoryError::DuplicateUsername`] when the
    /// username is taken.
    async fn insert_cook(&self, cook: &NewCook) -> Result<Cook, KitchenRepositoryError>;

    /// Replace a cook's years of experience; `None` when the cook is unknown.
    async fn update_experience(
        &self,
        id: CookId,
        years: YearsOfExperience,
    ) -> Result<Option<Cook>, KitchenRepositoryError>;

    /// Delete a cook and their dish credits; `false` when the cook is unknown.
    async fn delete_cook(&self, id: CookId) -> Result<bool, KitchenRepositoryError>;
}
