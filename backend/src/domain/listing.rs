//! Generic list-query resolver shared by every list screen.
//!
//! A list request is resolved in two store round trips: count the records
//! matching the filter, then load the window for the clamped page. Stores
//! order by the natural key (name or username, then id) before windowing, so
//! page boundaries are stable across identical requests.

use async_trait::async_trait;
use pagination::{Page, PageSize, PageWindow, Paginator};

use crate::domain::ports::{
    CookRepository, DishRepository, DishTypeRepository, IngredientRepository,
    KitchenRepositoryError,
};
use crate::domain::service_support::map_repository_error;
use crate::domain::{Cook, DishSummary, DishType, Error, Ingredient, ListQuery, SearchFilter};

/// Records shown per list page.
pub const LIST_PAGE_SIZE: u64 = 10;

/// Store capability needed to serve one list screen.
#[async_trait]
pub trait Listing<T>: Send + Sync {
    /// Count records matching `filter`.
    async fn count_matching(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError>;

    /// Load the matching records inside `window`, in natural order.
    async fn load_window(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<T>, KitchenRepositoryError>;
}

/// Resolve a list request into one page of records.
///
/// Requests past the last page are served the last page.
pub async fn resolve_listing<T, L>(listing: &L, query: &ListQuery) -> Result<Page<T>, Error>
where
    T: Send,
    L: Listing<T> + ?Sized,
{
    let paginator = Paginator::new(PageSize::clamped(LIST_PAGE_SIZE));
    let filter = query.filter();
    let total = listing
        .count_matching(filter)
        .await
        .map_err(map_repository_error)?;
    let plan = paginator.plan(total, query.page());
    let items = listing
        .load_window(filter, plan.window())
        .await
        .map_err(map_repository_error)?;
    Ok(Page::new(&plan, items, &query.links()))
}

#[async_trait]
impl<R> Listing<Cook> for R
where
    R: CookRepository + ?Sized,
{
    async fn count_matching(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        self.count_cooks(filter).await
    }

    async fn load_window(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<Cook>, KitchenRepositoryError> {
        self.list_cooks(filter, window).await
    }
}

#[async_trait]
impl<R> Listing<DishType> for R
where
    R: DishTypeRepository + ?Sized,
{
    async fn count_matching(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        self.count_dish_types(filter).await
    }

    async fn load_window(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<DishType>, KitchenRepositoryError> {
        self.list_dish_types(filter, window).await
    }
}

#[async_trait]
impl<R> Listing<Ingredient> for R
where
    R: IngredientRepository + ?Sized,
{
    async fn count_matching(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        self.count_ingredients(filter).await
    }

    async fn load_window(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<Ingredient>, KitchenRepositoryError> {
        self.list_ingredients(filter, window).await
    }
}

#[async_trait]
impl<R> Listing<DishSummary> for R
where
    R: DishRepository + ?Sized,
{
    async fn count_matching(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        self.count_dishes(filter).await
    }

    async fn load_window(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<DishSummary>, KitchenRepositoryError> {
        self.list_dishes(filter, window).await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the list resolver.
    use super::*;
    use crate::domain::ports::MockDishTypeRepository;
    use crate::domain::{DishTypeId, DishTypeName, ErrorCode, SearchField};
    use mockall::predicate::eq;
    use rstest::rstest;

    fn dish_type(id: i64) -> DishType {
        DishType {
            id: DishTypeId::new(id),
            name: DishTypeName::new(format!("type_{id:02}")).expect("valid name"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn clamps_to_last_page_and_loads_its_window() {
        let mut repo = MockDishTypeRepository::new();
        repo.expect_count_dish_types()
            .withf(|filter| filter.text() == Some("type"))
            .times(1)
            .return_once(|_| Ok(23));
        repo.expect_list_dish_types()
            .withf(|_, window| window.offset() == 20 && window.limit() == 10)
            .times(1)
            .return_once(|_, _| Ok((21..=23).map(dish_type).collect()));

        let query = ListQuery::parse(SearchField::Name, Some("type"), Some("9"));
        let page: Page<DishType> = resolve_listing(&repo, &query).await.expect("page");

        assert_eq!(page.meta().number(), 3);
        assert_eq!(page.meta().total_items(), 23);
        assert_eq!(page.items().len(), 3);
        assert_eq!(page.meta().previous(), Some("?name=type&page=2"));
        assert!(page.meta().next().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn empty_store_yields_single_empty_page() {
        let mut repo = MockDishTypeRepository::new();
        repo.expect_count_dish_types().return_once(|_| Ok(0));
        repo.expect_list_dish_types()
            .with(eq(SearchFilter::none()), mockall::predicate::always())
            .return_once(|_, _| Ok(Vec::new()));

        let query = ListQuery::first_page(SearchField::Name);
        let page: Page<DishType> = resolve_listing(&repo, &query).await.expect("page");

        assert_eq!(page.meta().total_pages(), 1);
        assert!(page.items().is_empty());
        assert!(!page.meta().has_next());
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_become_service_unavailable() {
        let mut repo = MockDishTypeRepository::new();
        repo.expect_count_dish_types()
            .return_once(|_| Err(KitchenRepositoryError::connection("refused")));
        repo.expect_list_dish_types().times(0);

        let query = ListQuery::first_page(SearchField::Name);
        let err = resolve_listing::<DishType, _>(&repo, &query)
            .await
            .expect_err("unavailable store");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
