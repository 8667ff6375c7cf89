//! Home screen counters.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CookRepository, DishRepository, DishTypeRepository, IngredientRepository, KitchenOverview,
    KitchenOverviewQuery,
};
use crate::domain::service_support::map_repository_error;
use crate::domain::{Error, SearchFilter};

/// [`KitchenOverviewQuery`] backed by the four repositories.
#[derive(Clone)]
pub struct OverviewService {
    cooks: Arc<dyn CookRepository>,
    dishes: Arc<dyn DishRepository>,
    dish_types: Arc<dyn DishTypeRepository>,
    ingredients: Arc<dyn IngredientRepository>,
}

impl OverviewService {
    /// Create the service.
    pub fn new(
        cooks: Arc<dyn CookRepository>,
        dishes: Arc<dyn DishRepository>,
        dish_types: Arc<dyn DishTypeRepository>,
        ingredients: Arc<dyn IngredientRepository>,
    ) -> Self {
        Self {
            cooks,
            dishes,
            dish_types,
            ingredients,
        }
    }
}

#[async_trait]
impl KitchenOverviewQuery for OverviewService {
    async fn overview(&self) -> Result<KitchenOverview, Error> {
        let everything = SearchFilter::none();
        Ok(KitchenOverview {
            num_cooks: self
                .cooks
                .count_cooks(&everything)
                .await
                .map_err(map_repository_error)?,
            num_dishes: self
                .dishes
                .count_dishes(&everything)
                .await
                .map_err(map_repository_error)?,
            num_dish_types: self
                .dish_types
                .count_dish_types(&everything)
                .await
                .map_err(map_repository_error)?,
            num_ingredients: self
                .ingredients
                .count_ingredients(&everything)
                .await
                .map_err(map_repository_error)?,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        MockCookRepository, MockDishRepository, MockDishTypeRepository, MockIngredientRepository,
    };

    #[tokio::test]
    async fn counts_every_entity_without_filter() {
        let mut cooks = MockCookRepository::new();
        cooks
            .expect_count_cooks()
            .withf(|filter| filter.text().is_none())
            .return_once(|_| Ok(3));
        let mut dishes = MockDishRepository::new();
        dishes.expect_count_dishes().return_once(|_| Ok(5));
        let mut dish_types = MockDishTypeRepository::new();
        dish_types.expect_count_dish_types().return_once(|_| Ok(2));
        let mut ingredients = MockIngredientRepository::new();
        ingredients
            .expect_count_ingredients()
            .return_once(|_| Ok(11));

        let overview = OverviewService::new(
            Arc::new(cooks),
            Arc::new(dishes),
            Arc::new(dish_types),
            Arc::new(ingredients),
        )
        .overview()
        .await
        .expect("overview succeeds");

        assert_eq!(
            overview,
            KitchenOverview {
                num_cooks: 3,
                num_dishes: 5,
                num_dish_types: 2,
                num_ingredients: 11,
            }
        );
    }
}
