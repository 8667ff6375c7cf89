//! Domain ports: driven repositories and driving use-case traits.

mod macros;
pub(crate) use macros::define_port_error;

mod cook_repository;
mod cooks;
mod dish_repository;
mod dish_type_repository;
mod dish_types;
mod dishes;
mod ingredient_repository;
mod ingredients;
mod login_service;
mod overview;
mod password_hasher;
mod repository_error;

#[cfg(test)]
pub use cook_repository::MockCookRepository;
pub use cook_repository::CookRepository;
#[cfg(test)]
pub use cooks::{MockCookCommand, MockCookQuery};
pub use cooks::{
    CookCommand, CookDetailPayload, CookPayload, CookQuery, RegisterCookRequest,
    UpdateCookExperienceRequest,
};
#[cfg(test)]
pub use dish_repository::MockDishRepository;
pub use dish_repository::DishRepository;
#[cfg(test)]
pub use dish_type_repository::MockDishTypeRepository;
pub use dish_type_repository::DishTypeRepository;
#[cfg(test)]
pub use dish_types::{MockDishTypeCommand, MockDishTypeQuery};
pub use dish_types::{DishTypeCommand, DishTypePayload, DishTypeQuery, NamedRecordRequest};
#[cfg(test)]
pub use dishes::{MockDishCommand, MockDishQuery};
pub use dishes::{
    DishCommand, DishDetailPayload, DishFormChoices, DishQuery, DishRequest, DishSummaryPayload,
};
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
pub use ingredient_repository::IngredientRepository;
#[cfg(test)]
pub use ingredients::{MockIngredientCommand, MockIngredientQuery};
pub use ingredients::{IngredientCommand, IngredientPayload, IngredientQuery};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use overview::MockKitchenOverviewQuery;
pub use overview::{KitchenOverview, KitchenOverviewQuery};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use repository_error::KitchenRepositoryError;
