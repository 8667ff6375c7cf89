//! PostgreSQL-backed `DishTypeRepository` implementation using Diesel ORM.
//!
//! Deleting a type relies on `ON DELETE CASCADE` to remove its dishes and
//! their links in the same statement.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageWindow;

use crate::domain::ports::{DishTypeRepository, KitchenRepositoryError};
use crate::domain::{DishType, DishTypeId, DishTypeName, SearchFilter};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::DishTypeRow;
use super::pool::DbPool;
use super::query_support::{ilike_pattern, row_count, sql_window};
use super::schema::dish_types;

/// Diesel-backed implementation of the `DishTypeRepository` port.
#[derive(Clone)]
pub struct DieselDishTypeRepository {
    pool: DbPool,
}

impl DieselDishTypeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_dish_types(rows: Vec<DishTypeRow>) -> Result<Vec<DishType>, KitchenRepositoryError> {
    rows.into_iter().map(DishTypeRow::into_domain).collect()
}

#[async_trait]
impl DishTypeRepository for DieselDishTypeRepository {
    async fn count_dish_types(
        &self,
        filter: &SearchFilter,
    ) -> Result<u64, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = dish_types::table.select(count_star()).into_boxed();
        if let Some(pattern) = ilike_pattern(filter) {
            query = query.filter(dish_types::name.ilike(pattern));
        }
        let total: i64 = query
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_count(total))
    }

    async fn list_dish_types(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<DishType>, KitchenRepositoryError> {
        let (offset, limit) = sql_window(window);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = dish_types::table
            .select(DishTypeRow::as_select())
            .order((dish_types::name.asc(), dish_types::id.asc()))
            .into_boxed();
        if let Some(pattern) = ilike_pattern(filter) {
            query = query.filter(dish_types::name.ilike(pattern));
        }
        let rows = query
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_dish_types(rows)
    }

    async fn all_dish_types(&self) -> Result<Vec<DishType>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = dish_types::table
            .select(DishTypeRow::as_select())
            .order((dish_types::name.asc(), dish_types::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_dish_types(rows)
    }

    async fn find_dish_type(
        &self,
        id: DishTypeId,
    ) -> Result<Option<DishType>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DishTypeRow> = dish_types::table
            .find(id.get())
            .select(DishTypeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(DishTypeRow::into_domain).transpose()
    }

    async fn insert_dish_type(
        &self,
        name: &DishTypeName,
    ) -> Result<DishType, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: DishTypeRow = diesel::insert_into(dish_types::table)
            .values(dish_types::name.eq(name.as_ref()))
            .returning(DishTypeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row.into_domain()
    }

    async fn rename_dish_type(
        &self,
        id: DishTypeId,
        name: &DishTypeName,
    ) -> Result<Option<DishType>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DishTypeRow> = diesel::update(dish_types::table.find(id.get()))
            .set(dish_types::name.eq(name.as_ref()))
            .returning(DishTypeRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(DishTypeRow::into_domain).transpose()
    }

    async fn delete_dish_type(&self, id: DishTypeId) -> Result<bool, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(dish_types::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
