//! Ingredient repository over the in-memory tables.

use async_trait::async_trait;
use pagination::PageWindow;

use super::{InMemoryKitchenStore, count, matches, sort_by_name, window};
use crate::domain::ports::{IngredientRepository, KitchenRepositoryError};
use crate::domain::{Ingredient, IngredientId, IngredientName, SearchFilter};

fn matching(ingredients: &[&Ingredient], filter: &SearchFilter) -> Vec<Ingredient> {
    let mut found: Vec<Ingredient> = ingredients
        .iter()
        .filter(|ingredient| matches(filter, &ingredient.name))
        .map(|ingredient| (*ingredient).clone())
        .collect();
    sort_by_name(&mut found, |ingredient| {
        (ingredient.name.as_ref(), ingredient.id.get())
    });
    found
}

#[async_trait]
impl IngredientRepository for InMemoryKitchenStore {
    async fn count_ingredients(
        &self,
        filter: &SearchFilter,
    ) -> Result<u64, KitchenRepositoryError> {
        let tables = self.tables()?;
        let all: Vec<&Ingredient> = tables.ingredients.values().collect();
        Ok(count(matching(&all, filter).len()))
    }

    async fn list_ingredients(
        &self,
        filter: &SearchFilter,
        page: PageWindow,
    ) -> Result<Vec<Ingredient>, KitchenRepositoryError> {
        let tables = self.tables()?;
        let all: Vec<&Ingredient> = tables.ingredients.values().collect();
        Ok(window(matching(&all, filter), page))
    }

    async fn all_ingredients(&self) -> Result<Vec<Ingredient>, KitchenRepositoryError> {
        let tables = self.tables()?;
        let all: Vec<&Ingredient> = tables.ingredients.values().collect();
        Ok(matching(&all, &SearchFilter::none()))
    }

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, KitchenRepositoryError> {
        Ok(self.tables()?.ingredients.get(&id).cloned())
    }

    async fn existing_ingredient_ids(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<IngredientId>, KitchenRepositoryError> {
        let tables = self.tables()?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| tables.ingredients.contains_key(id))
            .collect())
    }

    async fn insert_ingredient(
        &self,
        name: &IngredientName,
    ) -> Result<Ingredient, KitchenRepositoryError> {
        let mut tables = self.tables()?;
        let ingredient = Ingredient {
            id: IngredientId::new(tables.next_id()),
            name: name.clone(),
        };
        tables.ingredients.insert(ingredient.id, ingredient.clone());
        Ok(ingredient)
    }

    async fn rename_ingredient(
        &self,
        id: IngredientId,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, KitchenRepositoryError> {
        let mut tables = self.tables()?;
        let Some(ingredient) = tables.ingredients.get_mut(&id) else {
            return Ok(None);
        };
        ingredient.name = name.clone();
        Ok(Some(ingredient.clone()))
    }

    async fn delete_ingredient(&self, id: IngredientId) -> Result<bool, KitchenRepositoryError> {
        let mut tables = self.tables()?;
        tables
            .dish_ingredients
            .retain(|(_, ingredient)| *ingredient != id);
        Ok(tables.ingredients.remove(&id).is_some())
    }
}
