//! Cook repository over the in-memory tables.

use async_trait::async_trait;
use pagination::PageWindow;

use super::{InMemoryKitchenStore, StoredCook, count, matches, window};
use crate::domain::ports::{CookRepository, KitchenRepositoryError};
use crate::domain::{
    Cook, CookCredentials, CookId, DishSummary, NewCook, SearchFilter, YearsOfExperience,
};

fn ordered_cooks<'a>(cooks: impl Iterator<Item = &'a StoredCook>) -> Vec<Cook> {
    let mut cooks: Vec<Cook> = cooks.map(|stored| stored.cook.clone()).collect();
    cooks.sort_by(|a, b| (a.username.as_ref(), a.id).cmp(&(b.username.as_ref(), b.id)));
    cooks
}

#[async_trait]
impl CookRepository for InMemoryKitchenStore {
    async fn count_cooks(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        let tables = self.tables()?;
        Ok(count(
            tables
                .cooks
                .values()
                .filter(|stored| matches(filter, &stored.cook.username))
                .count(),
        ))
    }

    async fn list_cooks(
        &self,
        filter: &SearchFilter,
        page: PageWindow,
    ) -> Result<Vec<Cook>, KitchenRepositoryError> {
        let tables = self.tables()?;
        let cooks = ordered_cooks(
            tables
                .cooks
                .values()
                .filter(|stored| matches(filter, &stored.cook.username)),
        );
        Ok(window(cooks, page))
    }

    async fn all_cooks(&self) -> Result<Vec<Cook>, KitchenRepositoryError> {
        let tables = self.tables()?;
        Ok(ordered_cooks(tables.cooks.values()))
    }

    async fn find_cook(&self, id: CookId) -> Result<Option<Cook>, KitchenRepositoryError> {
        let tables = self.tables()?;
        Ok(tables.cooks.get(&id).map(|stored| stored.cook.clone()))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<CookCredentials>, KitchenRepositoryError> {
        let tables = self.tables()?;
        Ok(tables
            .cooks
            .values()
            .find(|stored| stored.cook.username.as_ref() == username)
            .map(|stored| CookCredentials {
                id: stored.cook.id,
                password_hash: stored.password_hash.clone(),
            }))
    }

    async fn cook_dishes(&self, id: CookId) -> Result<Vec<DishSummary>, KitchenRepositoryError> {
        let tables = self.tables()?;
        let mut dishes = tables
            .dish_cooks
            .iter()
            .filter(|(_, cook)| *cook == id)
            .filter_map(|(dish_id, _)| {
                tables
                    .dishes
                    .get(dish_id)
                    .map(|dish| tables.dish_summary(*dish_id, dish))
            })
            .collect::<Result<Vec<_>, _>>()?;
        dishes.sort_by(|a, b| (a.name.as_ref(), a.id).cmp(&(b.name.as_ref(), b.id)));
        Ok(dishes)
    }

    async fn existing_cook_ids(
        &self,
        ids: &[CookId],
    ) -> Result<Vec<CookId>, KitchenRepositoryError> {
        let tables = self.tables()?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| tables.cooks.contains_key(id))
            .collect())
    }

    async fn insert_cook(&self, cook: &NewCook) -> Result<Cook, KitchenRepositoryError> {
        let mut tables = self.tables()?;
        let taken = tables
            .cooks
            .values()
            .any(|stored| stored.cook.username == cook.username);
        if taken {
            return Err(KitchenRepositoryError::duplicate_username(
                cook.username.as_ref(),
            ));
        }
        let id = CookId::new(tables.next_id());
        let stored = Cook {
            id,
            username: cook.username.clone(),
            first_name: cook.first_name.clone(),
            last_name: cook.last_name.clone(),
            years_of_experience: cook.years_of_experience,
            date_joined: cook.date_joined,
        };
        tables.cooks.insert(
            id,
            StoredCook {
                cook: stored.clone(),
                password_hash: cook.password_hash.clone(),
            },
        );
        Ok(stored)
    }

    async fn update_experience(
        &self,
        id: CookId,
        years: YearsOfExperience,
    ) -> Result<Option<Cook>, KitchenRepositoryError> {
        let mut tables = self.tables()?;
        Ok(tables.cooks.get_mut(&id).map(|stored| {
            stored.cook.years_of_experience = years;
            stored.cook.clone()
        }))
    }

    async fn delete_cook(&self, id: CookId) -> Result<bool, KitchenRepositoryError> {
        let mut tables = self.tables()?;
        tables.dish_cooks.retain(|(_, cook)| *cook != id);
        Ok(tables.cooks.remove(&id).is_some())
    }
}
