//! Dish type screens.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use tracing::info;

use crate::domain::listing::resolve_listing;
use crate::domain::ports::{
    DishTypeCommand, DishTypePayload, DishTypeQuery, DishTypeRepository, NamedRecordRequest,
};
use crate::domain::service_support::{map_repository_error, record_not_found};
use crate::domain::{DishType, DishTypeId, DishTypeName, Error, FieldErrors, ListQuery};

fn validate_name(request: NamedRecordRequest) -> Result<DishTypeName, Error> {
    let mut errors = FieldErrors::new();
    errors
        .capture("name", DishTypeName::new(request.name))
        .ok_or_else(|| errors.into_error())
}

/// Dish type service implementing the dish type query and command ports.
#[derive(Clone)]
pub struct DishTypeService<R: ?Sized> {
    dish_types: Arc<R>,
}

impl<R: ?Sized> DishTypeService<R> {
    /// Create a service over the dish type repository.
    pub fn new(dish_types: Arc<R>) -> Self {
        Self { dish_types }
    }
}

#[async_trait]
impl<R> DishTypeQuery for DishTypeService<R>
where
    R: DishTypeRepository + ?Sized,
{
    async fn list_dish_types(&self, query: &ListQuery) -> Result<Page<DishTypePayload>, Error> {
        let page: Page<DishType> = resolve_listing(self.dish_types.as_ref(), query).await?;
        Ok(page.map_items(DishTypePayload::from))
    }

    async fn get_dish_type(&self, id: DishTypeId) -> Result<DishTypePayload, Error> {
        self.dish_types
            .find_dish_type(id)
            .await
            .map_err(map_repository_error)?
            .map(DishTypePayload::from)
            .ok_or_else(|| record_not_found("dish type", id))
    }
}

#[async_trait]
impl<R> DishTypeCommand for DishTypeService<R>
where
    R: DishTypeRepository + ?Sized,
{
    async fn create_dish_type(
        &self,
        request: NamedRecordRequest,
    ) -> Result<DishTypePayload, Error> {
        let name = validate_name(request)?;
        let created = self
            .dish_types
            .insert_dish_type(&name)
            .await
            .map_err(map_repository_error)?;
        info!(dish_type_id = %created.id, "dish type created");
        Ok(created.into())
    }

    async fn rename_dish_type(
        &self,
        id: DishTypeId,
        request: NamedRecordRequest,
    ) -> Result<DishTypePayload, Error> {
        let name = validate_name(request)?;
        self.dish_types
            .rename_dish_type(id, &name)
            .await
            .map_err(map_repository_error)?
            .map(DishTypePayload::from)
            .ok_or_else(|| record_not_found("dish type", id))
    }

    async fn delete_dish_type(&self, id: DishTypeId) -> Result<(), Error> {
        let deleted = self
            .dish_types
            .delete_dish_type(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(record_not_found("dish type", id));
        }
        info!(dish_type_id = %id, "dish type deleted with its dishes");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockDishTypeRepository;
    use rstest::rstest;

    fn request(name: &str) -> NamedRecordRequest {
        NamedRecordRequest {
            name: name.to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_trims_and_inserts() {
        let mut repo = MockDishTypeRepository::new();
        repo.expect_insert_dish_type()
            .withf(|name| name.as_ref() == "Soup")
            .times(1)
            .return_once(|name| {
                Ok(DishType {
                    id: DishTypeId::new(1),
                    name: name.clone(),
                })
            });

        let payload = DishTypeService::new(Arc::new(repo))
            .create_dish_type(request("  Soup "))
            .await
            .expect("create succeeds");

        assert_eq!(payload.name, "Soup");
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_blank_names() {
        let mut repo = MockDishTypeRepository::new();
        repo.expect_insert_dish_type().times(0);

        let err = DishTypeService::new(Arc::new(repo))
            .create_dish_type(request(" "))
            .await
            .expect_err("blank name");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().expect("field details")["fields"]["name"][0]["code"],
            "required"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn rename_unknown_type_is_not_found() {
        let mut repo = MockDishTypeRepository::new();
        repo.expect_rename_dish_type().return_once(|_, _| Ok(None));

        let err = DishTypeService::new(Arc::new(repo))
            .rename_dish_type(DishTypeId::new(8), request("Dessert"))
            .await
            .expect_err("unknown type");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_unknown_type_is_not_found() {
        let mut repo = MockDishTypeRepository::new();
        repo.expect_delete_dish_type().return_once(|_| Ok(false));

        let err = DishTypeService::new(Arc::new(repo))
            .delete_dish_type(DishTypeId::new(8))
            .await
            .expect_err("unknown type");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
