//! Dish type repository over the in-memory tables.

use async_trait::async_trait;
use pagination::PageWindow;

use super::{InMemoryKitchenStore, count, matches, sort_by_name, window};
use crate::domain::ports::{DishTypeRepository, KitchenRepositoryError};
use crate::domain::{DishType, DishTypeId, DishTypeName, SearchFilter};

fn ordered<'a>(dish_types: impl Iterator<Item = &'a DishType>) -> Vec<DishType> {
    let mut dish_types: Vec<DishType> = dish_types.cloned().collect();
    sort_by_name(&mut dish_types, |dish_type| {
        (dish_type.name.as_ref(), dish_type.id.get())
    });
    dish_types
}

#[async_trait]
impl DishTypeRepository for InMemoryKitchenStore {
    async fn count_dish_types(
        &self,
        filter: &SearchFilter,
    ) -> Result<u64, KitchenRepositoryError> {
        let tables = self.tables()?;
        Ok(count(
            tables
                .dish_types
                .values()
                .filter(|dish_type| matches(filter, &dish_type.name))
                .count(),
        ))
    }

    async fn list_dish_types(
        &self,
        filter: &SearchFilter,
        page: PageWindow,
    ) -> Result<Vec<DishType>, KitchenRepositoryError> {
        let tables = self.tables()?;
        let dish_types = ordered(
            tables
                .dish_types
                .values()
                .filter(|dish_type| matches(filter, &dish_type.name)),
        );
        Ok(window(dish_types, page))
    }

    async fn all_dish_types(&self) -> Result<Vec<DishType>, KitchenRepositoryError> {
        let tables = self.tables()?;
        Ok(ordered(tables.dish_types.values()))
    }

    async fn find_dish_type(
        &self,
        id: DishTypeId,
    ) -> Result<Option<DishType>, KitchenRepositoryError> {
        let tables = self.tables()?;
        Ok(tables.dish_types.get(&id).cloned())
    }

    async fn insert_dish_type(
        &self,
        name: &DishTypeName,
    ) -> Result<DishType, KitchenRepositoryError> {
        let mut tables = self.tables()?;
        let dish_type = DishType {
            id: DishTypeId::new(tables.next_id()),
            name: name.clone(),
        };
        tables.dish_types.insert(dish_type.id, dish_type.clone());
        Ok(dish_type)
    }

    async fn rename_dish_type(
        &self,
        id: DishTypeId,
        name: &DishTypeName,
    ) -> Result<Option<DishType>, KitchenRepositoryError> {
        let mut tables = self.tables()?;
        Ok(tables.dish_types.get_mut(&id).map(|dish_type| {
            dish_type.name = name.clone();
            dish_type.clone()
        }))
    }

    async fn delete_dish_type(&self, id: DishTypeId) -> Result<bool, KitchenRepositoryError> {
        let mut tables = self.tables()?;
        if tables.dish_types.remove(&id).is_none() {
            return Ok(false);
        }
        let orphaned: Vec<_> = tables
            .dishes
            .iter()
            .filter(|(_, dish)| dish.dish_type == id)
            .map(|(dish_id, _)| *dish_id)
            .collect();
        for dish_id in orphaned {
            tables.remove_dish(dish_id);
        }
        Ok(true)
    }
}
