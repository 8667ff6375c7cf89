//! Dish screens, including validation of the type, cook and ingredient
//! references submitted with a dish form.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use tracing::info;

use crate::domain::listing::resolve_listing;
use crate::domain::ports::{
    CookRepository, DishCommand, DishDetailPayload, DishFormChoices, DishQuery, DishRepository,
    DishRequest, DishSummaryPayload, DishTypeRepository, IngredientRepository,
};
use crate::domain::service_support::{map_repository_error, record_not_found};
use crate::domain::{
    DishDescription, DishDetail, DishDraft, DishFields, DishId, DishName, DishSummary,
    DishTypeId, Error, FieldErrors, FieldIssue, ListQuery, Price, Required,
};

/// Repositories a [`DishService`] reads and writes.
#[derive(Clone)]
pub struct DishServiceRepositories {
    pub dishes: Arc<dyn DishRepository>,
    pub dish_types: Arc<dyn DishTypeRepository>,
    pub cooks: Arc<dyn CookRepository>,
    pub ingredients: Arc<dyn IngredientRepository>,
}

/// Dish service implementing the dish query and command ports.
#[derive(Clone)]
pub struct DishService {
    repos: DishServiceRepositories,
}

fn invalid_choice(value: impl std::fmt::Display) -> FieldIssue {
    FieldIssue::new(
        "invalid_choice",
        format!("Select a valid choice. {value} is not one of the available choices."),
    )
}

fn missing_ids<T>(requested: &[T], existing: &[T]) -> Vec<T>
where
    T: Copy + Ord,
{
    let existing: BTreeSet<T> = existing.iter().copied().collect();
    let mut missing: Vec<T> = requested
        .iter()
        .copied()
        .filter(|id| !existing.contains(id))
        .collect();
    missing.sort_unstable();
    missing.dedup();
    missing
}

impl DishService {
    /// Create a service over the dish repositories.
    pub fn new(repos: DishServiceRepositories) -> Self {
        Self { repos }
    }

    async fn require_dish(&self, id: DishId) -> Result<DishDetail, Error> {
        self.repos
            .dishes
            .find_dish(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| record_not_found("dish", id))
    }

    async fn check_dish_type(
        &self,
        errors: &mut FieldErrors,
        dish_type: Option<DishTypeId>,
    ) -> Result<Option<DishTypeId>, Error> {
        let Some(id) = dish_type else {
            return Ok(errors.capture::<DishTypeId, _>("dishType", Err(Required)));
        };
        let found = self
            .repos
            .dish_types
            .find_dish_type(id)
            .await
            .map_err(map_repository_error)?;
        if found.is_none() {
            errors.push("dishType", invalid_choice(id));
            return Ok(None);
        }
        Ok(Some(id))
    }

    /// Validate every field and reference, reporting all failures at once.
    async fn validate(&self, request: DishRequest) -> Result<DishDraft, Error> {
        let mut errors = FieldErrors::new();
        let name = errors.capture("name", DishName::new(request.name));
        let description = errors.capture("description", DishDescription::new(request.description));
        let price = match request.price {
            Some(raw) => errors.capture("price", Price::new(raw)),
            None => errors.capture::<Price, _>("price", Err(Required)),
        };
        let dish_type = self.check_dish_type(&mut errors, request.dish_type).await?;

        let existing_cooks = self
            .repos
            .cooks
            .existing_cook_ids(&request.cooks)
            .await
            .map_err(map_repository_error)?;
        for id in missing_ids(&request.cooks, &existing_cooks) {
            errors.push("cooks", invalid_choice(id));
        }

        let existing_ingredients = self
            .repos
            .ingredients
            .existing_ingredient_ids(&request.ingredients)
            .await
            .map_err(map_repository_error)?;
        for id in missing_ids(&request.ingredients, &existing_ingredients) {
            errors.push("ingredients", invalid_choice(id));
        }

        let (Some(name), Some(description), Some(price), Some(dish_type)) =
            (name, description, price, dish_type)
        else {
            return Err(errors.into_error());
        };
        errors.finish()?;

        Ok(DishDraft::new(
            DishFields {
                name,
                description,
                price,
                dish_type,
            },
            request.cooks,
            request.ingredients,
        ))
    }
}

#[async_trait]
impl DishQuery for DishService {
    async fn list_dishes(&self, query: &ListQuery) -> Result<Page<DishSummaryPayload>, Error> {
        let page: Page<DishSummary> = resolve_listing(self.repos.dishes.as_ref(), query).await?;
        Ok(page.map_items(DishSummaryPayload::from))
    }

    async fn dish_detail(&self, id: DishId) -> Result<DishDetailPayload, Error> {
        self.require_dish(id).await.map(DishDetailPayload::from)
    }

    async fn dish_form(&self, id: DishId) -> Result<DishRequest, Error> {
        self.require_dish(id).await.map(DishRequest::from)
    }

    async fn dish_form_choices(&self) -> Result<DishFormChoices, Error> {
        let dish_types = self
            .repos
            .dish_types
            .all_dish_types()
            .await
            .map_err(map_repository_error)?;
        let cooks = self
            .repos
            .cooks
            .all_cooks()
            .await
            .map_err(map_repository_error)?;
        let ingredients = self
            .repos
            .ingredients
            .all_ingredients()
            .await
            .map_err(map_repository_error)?;
        Ok(DishFormChoices {
            dish_types: dish_types.into_iter().map(Into::into).collect(),
            cooks: cooks.into_iter().map(Into::into).collect(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        })
    }
}

#[async_trait]
impl DishCommand for DishService {
    async fn create_dish(&self, request: DishRequest) -> Result<DishId, Error> {
        let draft = self.validate(request).await?;
        let id = self
            .repos
            .dishes
            .insert_dish(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(
            dish_id = %id,
            cooks = draft.cooks.len(),
            ingredients = draft.ingredients.len(),
            "dish created"
        );
        Ok(id)
    }

    async fn update_dish(&self, id: DishId, request: DishRequest) -> Result<(), Error> {
        let draft = self.validate(request).await?;
        let updated = self
            .repos
            .dishes
            .update_dish(id, &draft)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(record_not_found("dish", id));
        }
        info!(dish_id = %id, "dish updated");
        Ok(())
    }

    async fn delete_dish(&self, id: DishId) -> Result<(), Error> {
        let deleted = self
            .repos
            .dishes
            .delete_dish(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(record_not_found("dish", id));
        }
        info!(dish_id = %id, "dish deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "dish_service_tests.rs"]
mod tests;
