//! Dish repository over the in-memory tables.

use async_trait::async_trait;
use pagination::PageWindow;

use super::{InMemoryKitchenStore, Tables, count, matches, window};
use crate::domain::ports::{DishRepository, KitchenRepositoryError};
use crate::domain::{DishDetail, DishDraft, DishId, DishSummary, SearchFilter};

fn matching_summaries(
    tables: &Tables,
    filter: &SearchFilter,
) -> Result<Vec<DishSummary>, KitchenRepositoryError> {
    let mut dishes = tables
        .dishes
        .iter()
        .filter(|(_, dish)| matches(filter, &dish.name))
        .map(|(id, dish)| tables.dish_summary(*id, dish))
        .collect::<Result<Vec<_>, _>>()?;
    dishes.sort_by(|a, b| (a.name.as_ref(), a.id).cmp(&(b.name.as_ref(), b.id)));
    Ok(dishes)
}

#[async_trait]
impl DishRepository for InMemoryKitchenStore {
    async fn count_dishes(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        let tables = self.tables()?;
        Ok(count(
            tables
                .dishes
                .values()
                .filter(|dish| matches(filter, &dish.name))
                .count(),
        ))
    }

    async fn list_dishes(
        &self,
        filter: &SearchFilter,
        page: PageWindow,
    ) -> Result<Vec<DishSummary>, KitchenRepositoryError> {
        let tables = self.tables()?;
        Ok(window(matching_summaries(&tables, filter)?, page))
    }

    async fn find_dish(&self, id: DishId) -> Result<Option<DishDetail>, KitchenRepositoryError> {
        self.tables()?.dish_detail(id)
    }

    async fn insert_dish(&self, draft: &DishDraft) -> Result<DishId, KitchenRepositoryError> {
        let mut tables = self.tables()?;
        tables.check_draft_references(draft)?;
        let id = DishId::new(tables.next_id());
        tables.write_dish(id, draft);
        Ok(id)
    }

    async fn update_dish(
        &self,
        id: DishId,
        draft: &DishDraft,
    ) -> Result<bool, KitchenRepositoryError> {
        let mut tables = self.tables()?;
        if !tables.dishes.contains_key(&id) {
            return Ok(false);
        }
        tables.check_draft_references(draft)?;
        tables.write_dish(id, draft);
        Ok(true)
    }

    async fn delete_dish(&self, id: DishId) -> Result<bool, KitchenRepositoryError> {
        Ok(self.tables()?.remove_dish(id))
    }
}
