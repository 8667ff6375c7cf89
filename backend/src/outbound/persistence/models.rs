//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Rows are re-validated on the way out so a
//! hand-edited table surfaces as a query error rather than a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::ports::KitchenRepositoryError;
use crate::domain::{
    Cook, CookCredentials, CookId, DishDescription, DishId, DishName, DishSummary, DishType,
    DishTypeId, DishTypeName, Ingredient, IngredientId, IngredientName, PersonName, Price,
    Username, YearsOfExperience,
};

use super::schema::{cooks, dish_cooks, dish_ingredients, dish_types, dishes, ingredients};

fn corrupt_row(table: &str, id: i64, error: impl std::fmt::Display) -> KitchenRepositoryError {
    KitchenRepositoryError::query(format!("stored {table} row {id} is invalid: {error}"))
}

// ---------------------------------------------------------------------------
// Cooks
// ---------------------------------------------------------------------------

/// Public columns of the cooks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cooks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CookRow {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub years_of_experience: i32,
    pub date_joined: DateTime<Utc>,
}

impl CookRow {
    pub fn into_domain(self) -> Result<Cook, KitchenRepositoryError> {
        let id = self.id;
        Ok(Cook {
            id: CookId::new(id),
            username: Username::new(self.username).map_err(|err| corrupt_row("cooks", id, err))?,
            first_name: PersonName::new(self.first_name)
                .map_err(|err| corrupt_row("cooks", id, err))?,
            last_name: PersonName::new(self.last_name)
                .map_err(|err| corrupt_row("cooks", id, err))?,
            years_of_experience: YearsOfExperience::new(i64::from(self.years_of_experience))
                .map_err(|err| corrupt_row("cooks", id, err))?,
            date_joined: self.date_joined,
        })
    }
}

/// Login lookup columns of the cooks table.
#[derive(Clone, Queryable, Selectable)]
#[diesel(table_name = cooks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CookCredentialsRow {
    pub id: i64,
    pub password_hash: String,
}

impl From<CookCredentialsRow> for CookCredentials {
    fn from(row: CookCredentialsRow) -> Self {
        Self {
            id: CookId::new(row.id),
            password_hash: row.password_hash,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = cooks)]
pub(crate) struct NewCookRow<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub years_of_experience: i32,
    pub password_hash: &'a str,
    pub date_joined: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Dish types and ingredients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dish_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DishTypeRow {
    pub id: i64,
    pub name: String,
}

impl DishTypeRow {
    pub fn into_domain(self) -> Result<DishType, KitchenRepositoryError> {
        let id = self.id;
        Ok(DishType {
            id: DishTypeId::new(id),
            name: DishTypeName::new(self.name).map_err(|err| corrupt_row("dish_types", id, err))?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: i64,
    pub name: String,
}

impl IngredientRow {
    pub fn into_domain(self) -> Result<Ingredient, KitchenRepositoryError> {
        let id = self.id;
        Ok(Ingredient {
            id: IngredientId::new(id),
            name: IngredientName::new(self.name)
                .map_err(|err| corrupt_row("ingredients", id, err))?,
        })
    }
}

// ---------------------------------------------------------------------------
// Dishes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dishes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DishRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub dish_type_id: i64,
}

impl DishRow {
    /// Pair the row with its joined type, returning the summary and the
    /// still-unvalidated description.
    ///
    /// The joined type must be the one the row's foreign key names.
    pub fn into_summary(
        self,
        dish_type: DishTypeRow,
    ) -> Result<(DishSummary, String), KitchenRepositoryError> {
        let id = self.id;
        if dish_type.id != self.dish_type_id {
            return Err(corrupt_row(
                "dishes",
                id,
                format_args!(
                    "joined dish type {} but references {}",
                    dish_type.id, self.dish_type_id
                ),
            ));
        }
        let summary = DishSummary {
            id: DishId::new(id),
            name: DishName::new(self.name).map_err(|err| corrupt_row("dishes", id, err))?,
            price: Price::new(self.price).map_err(|err| corrupt_row("dishes", id, err))?,
            dish_type: dish_type.into_domain()?,
        };
        Ok((summary, self.description))
    }
}

pub(crate) fn dish_description(
    id: DishId,
    raw: String,
) -> Result<DishDescription, KitchenRepositoryError> {
    DishDescription::new(raw).map_err(|err| corrupt_row("dishes", id.get(), err))
}

/// Insert and update columns of the dishes table.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = dishes)]
pub(crate) struct DishChanges<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: Decimal,
    pub dish_type_id: i64,
}

#[derive(Insertable)]
#[diesel(table_name = dish_cooks)]
pub(crate) struct DishCookRow {
    pub dish_id: i64,
    pub cook_id: i64,
}

#[derive(Insertable)]
#[diesel(table_name = dish_ingredients)]
pub(crate) struct DishIngredientRow {
    pub dish_id: i64,
    pub ingredient_id: i64,
}
