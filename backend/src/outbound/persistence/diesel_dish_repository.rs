//! PostgreSQL-backed `DishRepository` implementation using Diesel ORM.
//!
//! A dish and its cook and ingredient links are always written in one
//! transaction, so readers never observe a dish with half of its links.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use pagination::PageWindow;

use crate::domain::ports::{DishRepository, KitchenRepositoryError};
use crate::domain::{DishDetail, DishDraft, DishId, DishSummary, SearchFilter};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    CookRow, DishChanges, DishCookRow, DishIngredientRow, DishRow, DishTypeRow, IngredientRow,
    dish_description,
};
use super::pool::DbPool;
use super::query_support::{ilike_pattern, row_count, sql_window};
use super::schema::{cooks, dish_cooks, dish_ingredients, dish_types, dishes, ingredients};

/// Diesel-backed implementation of the `DishRepository` port.
#[derive(Clone)]
pub struct DieselDishRepository {
    pool: DbPool,
}

impl DieselDishRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type DetailRows = (
    Option<(DishRow, DishTypeRow)>,
    Vec<CookRow>,
    Vec<IngredientRow>,
);

fn changes(draft: &DishDraft) -> DishChanges<'_> {
    DishChanges {
        name: draft.name.as_ref(),
        description: draft.description.as_ref(),
        price: draft.price.amount(),
        dish_type_id: draft.dish_type.get(),
    }
}

/// Replace every link row of `dish_id` with the draft's cooks and ingredients.
async fn replace_links(
    conn: &mut AsyncPgConnection,
    dish_id: i64,
    draft: &DishDraft,
) -> QueryResult<()> {
    diesel::delete(dish_cooks::table.filter(dish_cooks::dish_id.eq(dish_id)))
        .execute(conn)
        .await?;
    diesel::delete(dish_ingredients::table.filter(dish_ingredients::dish_id.eq(dish_id)))
        .execute(conn)
        .await?;

    let cook_rows: Vec<DishCookRow> = draft
        .cooks
        .iter()
        .map(|cook| DishCookRow {
            dish_id,
            cook_id: cook.get(),
        })
        .collect();
    if !cook_rows.is_empty() {
        diesel::insert_into(dish_cooks::table)
            .values(&cook_rows)
            .execute(conn)
            .await?;
    }

    let ingredient_rows: Vec<DishIngredientRow> = draft
        .ingredients
        .iter()
        .map(|ingredient| DishIngredientRow {
            dish_id,
            ingredient_id: ingredient.get(),
        })
        .collect();
    if !ingredient_rows.is_empty() {
        diesel::insert_into(dish_ingredients::table)
            .values(&ingredient_rows)
            .execute(conn)
            .await?;
    }
    Ok(())
}

fn assemble_detail(rows: DetailRows) -> Result<Option<DishDetail>, KitchenRepositoryError> {
    let (dish, cook_rows, ingredient_rows) = rows;
    let Some((dish, dish_type)) = dish else {
        return Ok(None);
    };
    let (summary, description) = dish.into_summary(dish_type)?;
    let description = dish_description(summary.id, description)?;
    let cooks = cook_rows
        .into_iter()
        .map(CookRow::into_domain)
        .collect::<Result<Vec<_>, _>>()?;
    let ingredients = ingredient_rows
        .into_iter()
        .map(IngredientRow::into_domain)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(DishDetail {
        summary,
        description,
        cooks,
        ingredients,
    }))
}

#[async_trait]
impl DishRepository for DieselDishRepository {
    async fn count_dishes(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = dishes::table.select(count_star()).into_boxed();
        if let Some(pattern) = ilike_pattern(filter) {
            query = query.filter(dishes::name.ilike(pattern));
        }
        let total: i64 = query
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_count(total))
    }

    async fn list_dishes(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<Vec<DishSummary>, KitchenRepositoryError> {
        let (offset, limit) = sql_window(window);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = dishes::table
            .inner_join(dish_types::table)
            .select((DishRow::as_select(), DishTypeRow::as_select()))
            .order((dishes::name.asc(), dishes::id.asc()))
            .into_boxed();
        if let Some(pattern) = ilike_pattern(filter) {
            query = query.filter(dishes::name.ilike(pattern));
        }
        let rows: Vec<(DishRow, DishTypeRow)> = query
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(dish, dish_type)| dish.into_summary(dish_type).map(|(summary, _)| summary))
            .collect()
    }

    async fn find_dish(&self, id: DishId) -> Result<Option<DishDetail>, KitchenRepositoryError> {
        let dish_id = id.get();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: DetailRows = conn
            .transaction(|conn| {
                async move {
                    let dish: Option<(DishRow, DishTypeRow)> = dishes::table
                        .inner_join(dish_types::table)
                        .filter(dishes::id.eq(dish_id))
                        .select((DishRow::as_select(), DishTypeRow::as_select()))
                        .first(conn)
                        .await
                        .optional()?;
                    let cook_rows: Vec<CookRow> = dish_cooks::table
                        .inner_join(cooks::table)
                        .filter(dish_cooks::dish_id.eq(dish_id))
                        .select(CookRow::as_select())
                        .order((cooks::username.asc(), cooks::id.asc()))
                        .load(conn)
                        .await?;
                    let ingredient_rows: Vec<IngredientRow> = dish_ingredients::table
                        .inner_join(ingredients::table)
                        .filter(dish_ingredients::dish_id.eq(dish_id))
                        .select(IngredientRow::as_select())
                        .order((ingredients::name.asc(), ingredients::id.asc()))
                        .load(conn)
                        .await?;
                    Ok((dish, cook_rows, ingredient_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        assemble_detail(rows)
    }

    async fn insert_dish(&self, draft: &DishDraft) -> Result<DishId, KitchenRepositoryError> {
        let values = changes(draft);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: i64 = conn
            .transaction(|conn| {
                async move {
                    let id: i64 = diesel::insert_into(dishes::table)
                        .values(&values)
                        .returning(dishes::id)
                        .get_result(conn)
                        .await?;
                    replace_links(conn, id, draft).await?;
                    Ok(id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(DishId::new(id))
    }

    async fn update_dish(
        &self,
        id: DishId,
        draft: &DishDraft,
    ) -> Result<bool, KitchenRepositoryError> {
        let dish_id = id.get();
        let values = changes(draft);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let updated = diesel::update(dishes::table.find(dish_id))
                    .set(&values)
                    .execute(conn)
                    .await?;
                if updated == 0 {
                    return Ok(false);
                }
                replace_links(conn, dish_id, draft).await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete_dish(&self, id: DishId) -> Result<bool, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(dishes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
