//! actix-web adapter: kitchen screens as JSON context documents.

pub mod accounts;
pub mod app;
pub mod context;
pub mod cooks;
pub mod dish_types;
pub mod dishes;
pub mod error;
pub mod health;
pub mod ingredients;
pub mod overview;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use error::ApiResult;
