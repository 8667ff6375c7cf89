//! Cook screens: listing, detail, registration, experience updates and
//! deletion.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use tracing::info;

use crate::domain::listing::resolve_listing;
use crate::domain::ports::{
    CookCommand, CookDetailPayload, CookPayload, CookQuery, CookRepository,
    KitchenRepositoryError, PasswordHasher, RegisterCookRequest, UpdateCookExperienceRequest,
};
use crate::domain::service_support::{map_repository_error, record_not_found};
use crate::domain::{
    Cook, CookDetail, CookId, Error, FieldErrors, FieldIssue, FieldIssueSource, ListQuery,
    NewCook, NewPassword, PersonName, Required, Username, YearsOfExperience,
};

const DUPLICATE_USERNAME_MESSAGE: &str = "A user with that username already exists.";

/// Cook service implementing the cook query and command ports.
#[derive(Clone)]
pub struct CookService<R: ?Sized> {
    cooks: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> CookService<R> {
    /// Create a service over the cook repository.
    ///
    /// `clock` stamps the join date of new accounts.
    pub fn new(cooks: Arc<R>, hasher: Arc<dyn PasswordHasher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            cooks,
            hasher,
            clock,
        }
    }
}

impl<R> CookService<R>
where
    R: CookRepository + ?Sized,
{
    async fn require_cook(&self, id: CookId) -> Result<Cook, Error> {
        self.cooks
            .find_cook(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| record_not_found("cook", id))
    }
}

struct ValidatedRegistration {
    username: Username,
    first_name: PersonName,
    last_name: PersonName,
    years_of_experience: YearsOfExperience,
    password: NewPassword,
}

fn validate_registration(request: RegisterCookRequest) -> Result<ValidatedRegistration, Error> {
    let mut errors = FieldErrors::new();
    let username = errors.capture("username", Username::new(request.username));
    let first_name = errors.capture("firstName", PersonName::new(request.first_name));
    let last_name = errors.capture("lastName", PersonName::new(request.last_name));
    let years_of_experience = errors.capture(
        "yearsOfExperience",
        YearsOfExperience::new(request.years_of_experience.unwrap_or_default()),
    );
    let password = match NewPassword::confirm(&request.password1, &request.password2) {
        Ok(password) => Some(password),
        Err(err) => {
            errors.push(err.field(), FieldIssue::new(err.code(), err.to_string()));
            None
        }
    };

    let (
        Some(username),
        Some(first_name),
        Some(last_name),
        Some(years_of_experience),
        Some(password),
    ) = (username, first_name, last_name, years_of_experience, password)
    else {
        return Err(errors.into_error());
    };

    Ok(ValidatedRegistration {
        username,
        first_name,
        last_name,
        years_of_experience,
        password,
    })
}

fn duplicate_username_error() -> Error {
    let mut errors = FieldErrors::new();
    errors.push(
        "username",
        FieldIssue::new("unique", DUPLICATE_USERNAME_MESSAGE),
    );
    errors.into_error()
}

#[async_trait]
impl<R> CookQuery for CookService<R>
where
    R: CookRepository + ?Sized,
{
    async fn list_cooks(&self, query: &ListQuery) -> Result<Page<CookPayload>, Error> {
        let page: Page<Cook> = resolve_listing(self.cooks.as_ref(), query).await?;
        Ok(page.map_items(CookPayload::from))
    }

    async fn cook_detail(&self, id: CookId) -> Result<CookDetailPayload, Error> {
        let cook = self.require_cook(id).await?;
        let dishes = self
            .cooks
            .cook_dishes(id)
            .await
            .map_err(map_repository_error)?;
        Ok(CookDetail { cook, dishes }.into())
    }

    async fn get_cook(&self, id: CookId) -> Result<CookPayload, Error> {
        self.require_cook(id).await.map(CookPayload::from)
    }
}

#[async_trait]
impl<R> CookCommand for CookService<R>
where
    R: CookRepository + ?Sized,
{
    async fn register_cook(&self, request: RegisterCookRequest) -> Result<CookPayload, Error> {
        let registration = validate_registration(request)?;
        let password_hash = self
            .hasher
            .hash(registration.password.expose())
            .map_err(|err| Error::internal(err.to_string()))?;

        let new_cook = NewCook {
            username: registration.username,
            first_name: registration.first_name,
            last_name: registration.last_name,
            years_of_experience: registration.years_of_experience,
            password_hash,
            date_joined: self.clock.utc(),
        };

        match self.cooks.insert_cook(&new_cook).await {
            Ok(cook) => {
                info!(cook_id = %cook.id, username = %cook.username, "cook registered");
                Ok(cook.into())
            }
            Err(KitchenRepositoryError::DuplicateUsername { .. }) => {
                Err(duplicate_username_error())
            }
            Err(err) => Err(map_repository_error(err)),
        }
    }

    async fn update_experience(
        &self,
        id: CookId,
        request: UpdateCookExperienceRequest,
    ) -> Result<CookPayload, Error> {
        let mut errors = FieldErrors::new();
        let years = match request.years_of_experience {
            Some(raw) => errors.capture("yearsOfExperience", YearsOfExperience::new(raw)),
            None => errors.capture::<YearsOfExperience, _>("yearsOfExperience", Err(Required)),
        };
        let Some(years) = years else {
            return Err(errors.into_error());
        };

        self.cooks
            .update_experience(id, years)
            .await
            .map_err(map_repository_error)?
            .map(CookPayload::from)
            .ok_or_else(|| record_not_found("cook", id))
    }

    async fn delete_cook(&self, id: CookId) -> Result<(), Error> {
        let deleted = self
            .cooks
            .delete_cook(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(record_not_found("cook", id));
        }
        info!(cook_id = %id, "cook deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "cook_service_tests.rs"]
mod tests;
