//! PostgreSQL-backed `CookRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageWindow;
use tracing::debug;

use crate::domain::ports::{CookRepository, KitchenRepositoryError};
use crate::domain::{
    Cook, CookCredentials, CookId, DishSummary, NewCook, SearchFilter, YearsOfExperience,
};

use super::error_mapping::{is_duplicate_username, map_diesel_error, map_pool_error};
use super::models::{CookCredentialsRow, CookRow, DishRow, DishTypeRow, NewCookRow};
use super::pool::DbPool;
use super::query_support::{ilike_pattern, row_count, sql_window};
use super::schema::{cooks, dish_cooks, dish_types, dishes};

/// Diesel-backed implementation of the `CookRepository` port.
#[derive(Clone)]
pub struct DieselCookRepository {
    pool: DbPool,
}

impl DieselCookRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_cooks(rows: Vec<CookRow>) -> Result<Vec<Cook>, KitchenRepositoryError> {
    rows.into_iter().map(CookRow::into_domain).collect()
}

#[async_trait]
impl CookRepository for DieselCookRepository {
    async fn count_cooks(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = cooks::table.select(count_star()).into_boxed();
        if let Some(pattern) = ilike_pattern(filter) {
            query = query.filter(cooks::username.ilike(pattern));
        }
        let total: i64 = query
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_count(total))
    }

    async fn list_cooks(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<Cook>, KitchenRepositoryError> {
        let (offset, limit) = sql_window(window);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = cooks::table
            .select(CookRow::as_select())
            .order((cooks::username.asc(), cooks::id.asc()))
            .into_boxed();
        if let Some(pattern) = ilike_pattern(filter) {
            query = query.filter(cooks::username.ilike(pattern));
        }
        let rows = query
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_cooks(rows)
    }

    async fn all_cooks(&self) -> Result<Vec<Cook>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = cooks::table
            .select(CookRow::as_select())
            .order((cooks::username.asc(), cooks::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_cooks(rows)
    }

    async fn find_cook(&self, id: CookId) -> Result<Option<Cook>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CookRow> = cooks::table
            .find(id.get())
            .select(CookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(CookRow::into_domain).transpose()
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<CookCredentials>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CookCredentialsRow> = cooks::table
            .filter(cooks::username.eq(username))
            .select(CookCredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(CookCredentials::from))
    }

    async fn cook_dishes(&self, id: CookId) -> Result<Vec<DishSummary>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(DishRow, DishTypeRow)> = dish_cooks::table
            .inner_join(dishes::table.inner_join(dish_types::table))
            .filter(dish_cooks::cook_id.eq(id.get()))
            .select((DishRow::as_select(), DishTypeRow::as_select()))
            .order((dishes::name.asc(), dishes::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(dish, dish_type)| dish.into_summary(dish_type).map(|(summary, _)| summary))
            .collect()
    }

    async fn existing_cook_ids(
        &self,
        ids: &[CookId],
    ) -> Result<Vec<CookId>, KitchenRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Vec<i64> = cooks::table
            .filter(cooks::id.eq_any(raw))
            .select(cooks::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(found.into_iter().map(CookId::new).collect())
    }

    async fn insert_cook(&self, cook: &NewCook) -> Result<Cook, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCookRow {
            username: cook.username.as_ref(),
            first_name: cook.first_name.as_ref(),
            last_name: cook.last_name.as_ref(),
            years_of_experience: cook.years_of_experience.get(),
            password_hash: &cook.password_hash,
            date_joined: cook.date_joined,
        };
        let inserted: CookRow = diesel::insert_into(cooks::table)
            .values(&row)
            .returning(CookRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_duplicate_username(&err) {
                    debug!(username = %cook.username, "username already taken");
                    KitchenRepositoryError::duplicate_username(cook.username.as_ref())
                } else {
                    map_diesel_error(err)
                }
            })?;
        inserted.into_domain()
    }

    async fn update_experience(
        &self,
        id: CookId,
        years: YearsOfExperience,
    ) -> Result<Option<Cook>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CookRow> = diesel::update(cooks::table.find(id.get()))
            .set(cooks::years_of_experience.eq(years.get()))
            .returning(CookRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(CookRow::into_domain).transpose()
    }

    async fn delete_cook(&self, id: CookId) -> Result<bool, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(cooks::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

