//! Driving ports for the cook screens.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Cook, CookDetail, CookId, Error, ListQuery};

use super::DishSummaryPayload;

/// Cook as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CookPayload {
    pub id: CookId,
    #[schema(example = "chef.ann")]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub years_of_experience: i32,
    pub date_joined: DateTime<Utc>,
    /// Canonical display string, `"{username}: ({first} {last})"`.
    pub display: String,
}

impl From<Cook> for CookPayload {
    fn from(cook: Cook) -> Self {
        let display = cook.to_string();
        Self {
            id: cook.id,
            username: cook.username.into(),
            first_name: cook.first_name.into(),
            last_name: cook.last_name.into(),
            years_of_experience: cook.years_of_experience.get(),
            date_joined: cook.date_joined,
            display,
        }
    }
}

/// Cook detail screen: the cook plus the dishes they are credited on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CookDetailPayload {
    #[serde(flatten)]
    pub cook: CookPayload,
    pub dishes: Vec<DishSummaryPayload>,
}

impl From<CookDetail> for CookDetailPayload {
    fn from(detail: CookDetail) -> Self {
        Self {
            cook: detail.cook.into(),
            dishes: detail.dishes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Cook registration form.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterCookRequest {
    #[schema(example = "chef.ann")]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Defaults to zero when omitted.
    pub years_of_experience: Option<i64>,
    #[schema(format = Password)]
    pub password1: String,
    /// Must repeat `password1`.
    #[schema(format = Password)]
    pub password2: String,
}

impl fmt::Debug for RegisterCookRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCookRequest")
            .field("username", &self.username)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("years_of_experience", &self.years_of_experience)
            .finish_non_exhaustive()
    }
}

/// Restricted cook update form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCookExperienceRequest {
    pub years_of_experience: Option<i64>,
}

/// Read side of the cook screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CookQuery: Send + Sync {
    /// Filtered, paginated cooks ordered by username.
    async fn list_cooks(&self, query: &ListQuery) -> Result<Page<CookPayload>, Error>;

    /// One cook with their dishes.
    async fn cook_detail(&self, id: CookId) -> Result<CookDetailPayload, Error>;

    /// One cook, for update and delete screens.
    async fn get_cook(&self, id: CookId) -> Result<CookPayload, Error>;
}

/// Write side of the cook screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CookCommand: Send + Sync {
    /// Validate the registration form and create the account.
    async fn register_cook(&self, request: RegisterCookRequest) -> Result<CookPayload, Error>;

    /// Replace a cook's years of experience.
    async fn update_experience(
        &self,
        id: CookId,
        request: UpdateCookExperienceRequest,
    ) -> Result<CookPayload, Error>;

    /// Delete a cook.
    async fn delete_cook(&self, id: CookId) -> Result<(), Error>;
}
