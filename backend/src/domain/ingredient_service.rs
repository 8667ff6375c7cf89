//! Ingredient screens.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use tracing::info;

use crate::domain::listing::resolve_listing;
use crate::domain::ports::{
    IngredientCommand, IngredientPayload, IngredientQuery, IngredientRepository,
    NamedRecordRequest,
};
use crate::domain::service_support::{map_repository_error, record_not_found};
use crate::domain::{Error, FieldErrors, Ingredient, IngredientId, IngredientName, ListQuery};

fn validate_name(request: NamedRecordRequest) -> Result<IngredientName, Error> {
    let mut errors = FieldErrors::new();
    errors
        .capture("name", IngredientName::new(request.name))
        .ok_or_else(|| errors.into_error())
}

/// Ingredient service implementing the ingredient query and command ports.
#[derive(Clone)]
pub struct IngredientService<R: ?Sized> {
    ingredients: Arc<R>,
}

impl<R: ?Sized> IngredientService<R> {
    /// Create a service over the ingredient repository.
    pub fn new(ingredients: Arc<R>) -> Self {
        Self { ingredients }
    }
}

#[async_trait]
impl<R> IngredientQuery for IngredientService<R>
where
    R: IngredientRepository + ?Sized,
{
    async fn list_ingredients(
        &self,
        query: &ListQuery,
    ) -> Result<Page<IngredientPayload>, Error> {
        let page: Page<Ingredient> = resolve_listing(self.ingredients.as_ref(), query).await?;
        Ok(page.map_items(IngredientPayload::from))
    }

    async fn get_ingredient(&self, id: IngredientId) -> Result<IngredientPayload, Error> {
        self.ingredients
            .find_ingredient(id)
            .await
            .map_err(map_repository_error)?
            .map(IngredientPayload::from)
            .ok_or_else(|| record_not_found("ingredient", id))
    }
}

#[async_trait]
impl<R> IngredientCommand for IngredientService<R>
where
    R: IngredientRepository + ?Sized,
{
    async fn create_ingredient(
        &self,
        request: NamedRecordRequest,
    ) -> Result<IngredientPayload, Error> {
        let name = validate_name(request)?;
        let created = self
            .ingredients
            .insert_ingredient(&name)
            .await
            .map_err(map_repository_error)?;
        info!(ingredient_id = %created.id, "ingredient created");
        Ok(created.into())
    }

    async fn rename_ingredient(
        &self,
        id: IngredientId,
        request: NamedRecordRequest,
    ) -> Result<IngredientPayload, Error> {
        let name = validate_name(request)?;
        self.ingredients
            .rename_ingredient(id, &name)
            .await
            .map_err(map_repository_error)?
            .map(IngredientPayload::from)
            .ok_or_else(|| record_not_found("ingredient", id))
    }

    async fn delete_ingredient(&self, id: IngredientId) -> Result<(), Error> {
        let deleted = self
            .ingredients
            .delete_ingredient(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(record_not_found("ingredient", id));
        }
        info!(ingredient_id = %id, "ingredient deleted");
        Ok(())
    }
}
