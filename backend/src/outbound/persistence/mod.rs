//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository port has a Diesel implementation backed by a shared
//! `bb8` pool from `diesel-async`.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Validation stays in the services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures are mapped onto
//!   [`KitchenRepositoryError`](crate::domain::ports::KitchenRepositoryError).
//!
//! # Example
//!
//! ```ignore
//! use kitchen::outbound::persistence::{DbPool, DieselCookRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/kitchen")).await?;
//! let cooks = DieselCookRepository::new(pool.clone());
//! ```

mod diesel_cook_repository;
mod diesel_dish_repository;
mod diesel_dish_type_repository;
mod diesel_ingredient_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod query_support;
mod schema;

pub use diesel_cook_repository::DieselCookRepository;
pub use diesel_dish_repository::DieselDishRepository;
pub use diesel_dish_type_repository::DieselDishTypeRepository;
pub use diesel_ingredient_repository::DieselIngredientRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
