//! PostgreSQL-backed `IngredientRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageWindow;

use crate::domain::ports::{IngredientRepository, KitchenRepositoryError};
use crate::domain::{Ingredient, IngredientId, IngredientName, SearchFilter};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::IngredientRow;
use super::pool::DbPool;
use super::query_support::{ilike_pattern, row_count, sql_window};
use super::schema::ingredients;

/// Diesel-backed implementation of the `IngredientRepository` port.
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn count_ingredients(
        &self,
        filter: &SearchFilter,
    ) -> Result<u64, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = ingredients::table.select(count_star()).into_boxed();
        if let Some(pattern) = ilike_pattern(filter) {
            query = query.filter(ingredients::name.ilike(pattern));
        }
        let total: i64 = query
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_count(total))
    }

    async fn list_ingredients(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<Ingredient>, KitchenRepositoryError> {
        let (offset, limit) = sql_window(window);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = ingredients::table
            .select(IngredientRow::as_select())
            .order((ingredients::name.asc(), ingredients::id.asc()))
            .into_boxed();
        if let Some(pattern) = ilike_pattern(filter) {
            query = query.filter(ingredients::name.ilike(pattern));
        }
        query
            .offset(offset)
            .limit(limit)
            .load::<IngredientRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(IngredientRow::into_domain)
            .collect()
    }

    async fn all_ingredients(&self) -> Result<Vec<Ingredient>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        ingredients::table
            .select(IngredientRow::as_select())
            .order((ingredients::name.asc(), ingredients::id.asc()))
            .load::<IngredientRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(IngredientRow::into_domain)
            .collect()
    }

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        ingredients::table
            .find(id.get())
            .select(IngredientRow::as_select())
            .first::<IngredientRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(IngredientRow::into_domain)
            .transpose()
    }

    async fn existing_ingredient_ids(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<IngredientId>, KitchenRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Vec<i64> = ingredients::table
            .filter(ingredients::id.eq_any(raw))
            .select(ingredients::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(found.into_iter().map(IngredientId::new).collect())
    }

    async fn insert_ingredient(
        &self,
        name: &IngredientName,
    ) -> Result<Ingredient, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(ingredients::table)
            .values(ingredients::name.eq(name.as_ref()))
            .returning(IngredientRow::as_returning())
            .get_result::<IngredientRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_domain()
    }

    async fn rename_ingredient(
        &self,
        id: IngredientId,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(ingredients::table.find(id.get()))
            .set(ingredients::name.eq(name.as_ref()))
            .returning(IngredientRow::as_returning())
            .get_result::<IngredientRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(IngredientRow::into_domain)
            .transpose()
    }

    async fn delete_ingredient(&self, id: IngredientId) -> Result<bool, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(ingredients::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
