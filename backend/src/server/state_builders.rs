//! Pick the repository adapters for the configured store.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use kitchen::inbound::http::state::{HttpState, KitchenRepositories};
use kitchen::outbound::memory::InMemoryKitchenStore;
use kitchen::outbound::persistence::{
    DbPool, DieselCookRepository, DieselDishRepository, DieselDishTypeRepository,
    DieselIngredientRepository,
};
use kitchen::outbound::security::Argon2PasswordHasher;

fn diesel_repositories(pool: &DbPool) -> KitchenRepositories {
    KitchenRepositories {
        cooks: Arc::new(DieselCookRepository::new(pool.clone())),
        dish_types: Arc::new(DieselDishTypeRepository::new(pool.clone())),
        ingredients: Arc::new(DieselIngredientRepository::new(pool.clone())),
        dishes: Arc::new(DieselDishRepository::new(pool.clone())),
    }
}

/// PostgreSQL repositories when a pool exists, otherwise an empty in-memory
/// kitchen.
pub(crate) fn build_repositories(pool: Option<&DbPool>) -> KitchenRepositories {
    match pool {
        Some(pool) => diesel_repositories(pool),
        None => {
            info!("no database configured; records are kept in memory");
            KitchenRepositories::shared(Arc::new(InMemoryKitchenStore::new()))
        }
    }
}

pub(crate) fn build_http_state(pool: Option<&DbPool>) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_repositories(
        build_repositories(pool),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(DefaultClock),
    ))
}
