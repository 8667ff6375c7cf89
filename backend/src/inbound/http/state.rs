//! Shared HTTP adapter state.
//!
//! Handlers receive [`HttpState`] through `web::Data` and only see driving
//! ports, so they can be exercised against mocks or the in-memory store.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CookCommand, CookQuery, CookRepository, DishCommand, DishQuery, DishRepository,
    DishTypeCommand, DishTypeQuery, DishTypeRepository, IngredientCommand, IngredientQuery,
    IngredientRepository, KitchenOverviewQuery, LoginService, PasswordHasher,
};
use crate::domain::{
    CookLoginService, CookService, DishService, DishServiceRepositories, DishTypeService,
    IngredientService, OverviewService,
};

/// Repository adapters backing one running service.
#[derive(Clone)]
pub struct KitchenRepositories {
    pub cooks: Arc<dyn CookRepository>,
    pub dish_types: Arc<dyn DishTypeRepository>,
    pub ingredients: Arc<dyn IngredientRepository>,
    pub dishes: Arc<dyn DishRepository>,
}

impl KitchenRepositories {
    /// Use one store for every repository port.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: CookRepository
            + DishTypeRepository
            + IngredientRepository
            + DishRepository
            + 'static,
    {
        Self {
            cooks: store.clone(),
            dish_types: store.clone(),
            ingredients: store.clone(),
            dishes: store,
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub overview: Arc<dyn KitchenOverviewQuery>,
    pub cooks: Arc<dyn CookQuery>,
    pub cooks_command: Arc<dyn CookCommand>,
    pub dish_types: Arc<dyn DishTypeQuery>,
    pub dish_types_command: Arc<dyn DishTypeCommand>,
    pub ingredients: Arc<dyn IngredientQuery>,
    pub ingredients_command: Arc<dyn IngredientCommand>,
    pub dishes: Arc<dyn DishQuery>,
    pub dishes_command: Arc<dyn DishCommand>,
}

impl HttpState {
    /// Wire the domain services over `repos`.
    ///
    /// `hasher` protects cook passwords; `clock` stamps join dates.
    pub fn from_repositories(
        repos: KitchenRepositories,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cooks = Arc::new(CookService::new(repos.cooks.clone(), hasher.clone(), clock));
        let dish_types = Arc::new(DishTypeService::new(repos.dish_types.clone()));
        let ingredients = Arc::new(IngredientService::new(repos.ingredients.clone()));
        let dishes = Arc::new(DishService::new(DishServiceRepositories {
            dishes: repos.dishes.clone(),
            dish_types: repos.dish_types.clone(),
            cooks: repos.cooks.clone(),
            ingredients: repos.ingredients.clone(),
        }));
        let overview = Arc::new(OverviewService::new(
            repos.cooks.clone(),
            repos.dishes,
            repos.dish_types,
            repos.ingredients,
        ));
        let login = Arc::new(CookLoginService::new(repos.cooks, hasher));

        Self {
            login,
            overview,
            cooks: cooks.clone(),
            cooks_command: cooks,
            dish_types: dish_types.clone(),
            dish_types_command: dish_types,
            ingredients: ingredients.clone(),
            ingredients_command: ingredients,
            dishes: dishes.clone(),
            dishes_command: dishes,
        }
    }
}
