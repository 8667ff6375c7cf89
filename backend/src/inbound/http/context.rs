//! JSON screen contexts shared by the kitchen handlers.
//!
//! Every screen answers with a context object: list screens with the page
//! and search box, form screens with the form values, and confirmation
//! screens with the record about to be deleted. Successful writes answer
//! `303 See Other` pointing back at the entity's list.

use actix_web::http::header::{CACHE_CONTROL, LOCATION};
use actix_web::{HttpResponse, HttpResponseBuilder};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::domain::{ListQuery, SearchField, SearchForm};

/// Cache policy for per-cook screens.
pub const PRIVATE_NO_CACHE: &str = "private, no-cache, must-revalidate";

/// Query string accepted by the name-searched list screens.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameSearchParams {
    /// Case-insensitive substring of the record name.
    pub name: Option<String>,
    /// 1-based page; invalid values mean page one.
    pub page: Option<String>,
}

impl NameSearchParams {
    /// Parsed list request.
    pub fn to_query(&self) -> ListQuery {
        ListQuery::parse(SearchField::Name, self.name.as_deref(), self.page.as_deref())
    }
}

/// Query string accepted by the cook list screen.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UsernameSearchParams {
    /// Case-insensitive substring of the username.
    pub username: Option<String>,
    /// 1-based page; invalid values mean page one.
    pub page: Option<String>,
}

impl UsernameSearchParams {
    /// Parsed list request.
    pub fn to_query(&self) -> ListQuery {
        ListQuery::parse(
            SearchField::Username,
            self.username.as_deref(),
            self.page.as_deref(),
        )
    }
}

/// `{items, page, searchForm}` list screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContext<T> {
    #[serde(flatten)]
    page: Page<T>,
    search_form: SearchForm,
}

impl<T> ListContext<T> {
    /// Pair a served page with the search box that produced it.
    pub fn new(page: Page<T>, query: &ListQuery) -> Self {
        Self {
            page,
            search_form: query.form().clone(),
        }
    }
}

/// Create or update screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormContext<F, O = ()> {
    pub form: F,
    /// Record being edited; absent on create screens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<O>,
}

/// Delete confirmation screen.
#[derive(Debug, Serialize)]
pub struct ConfirmDeleteContext<O> {
    pub object: O,
}

/// `200 OK` builder for screens that must not be cached by shared caches.
pub fn private_ok() -> HttpResponseBuilder {
    let mut builder = HttpResponse::Ok();
    builder.insert_header((CACHE_CONTROL, PRIVATE_NO_CACHE));
    builder
}

/// Post/redirect/get answer after a successful write.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}
