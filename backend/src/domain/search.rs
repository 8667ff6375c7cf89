//! Search forms shared by the list screens.
//!
//! Every list accepts one optional free-text filter. A missing or blank value
//! means "no filter"; the form never fails on absent input.

use pagination::{PageLinks, PageNumber};
use serde::Serialize;
use utoipa::ToSchema;

/// Record field a list screen searches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// Cooks are searched by username.
    Username,
    /// Dish types, ingredients and dishes are searched by name.
    Name,
}

impl SearchField {
    /// Query-string parameter carrying the filter.
    pub const fn param(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Name => "name",
        }
    }

    /// Placeholder hint shown in the empty search box.
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Username => "Search by username",
            Self::Name => "Search by name",
        }
    }
}

/// Validated filter text; `None` matches every record.
///
/// # Examples
/// ```
/// use kitchen::domain::SearchFilter;
///
/// let filter = SearchFilter::new(Some("  sOuP "));
/// assert_eq!(filter.text(), Some("sOuP"));
/// assert!(filter.matches("Tomato soup"));
/// assert!(SearchFilter::new(Some("   ")).matches("anything"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter(Option<String>);

impl SearchFilter {
    /// Normalise a raw parameter: trimmed, with blank treated as absent.
    pub fn new(raw: Option<&str>) -> Self {
        Self(
            raw.map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned),
        )
    }

    /// Filter that matches everything.
    pub const fn none() -> Self {
        Self(None)
    }

    /// Filter text, if any.
    pub fn text(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Substring test used by in-memory stores. Only ASCII letters fold
    /// case, as with `ILIKE` on the `COLLATE "C"` name columns.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_deref().is_none_or(|needle| {
            candidate
                .to_ascii_lowercase()
                .contains(needle.to_ascii_lowercase().as_str())
        })
    }
}

/// Search box state for a list screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "SearchFormContext")]
pub struct SearchForm {
    field: SearchField,
    submitted: String,
    filter: SearchFilter,
}

/// Serialised search box: `{field, value, placeholder}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SearchFormContext {
    #[schema(example = "name")]
    field: &'static str,
    #[schema(example = "soup")]
    value: String,
    #[schema(example = "Search by name")]
    placeholder: &'static str,
}

impl SearchForm {
    /// Bind the raw query value for `field`.
    pub fn bind(field: SearchField, raw: Option<&str>) -> Self {
        Self {
            field,
            submitted: raw.unwrap_or_default().to_owned(),
            filter: SearchFilter::new(raw),
        }
    }

    /// Searched field.
    pub const fn field(&self) -> SearchField {
        self.field
    }

    /// Value echoed back into the search box.
    pub fn submitted(&self) -> &str {
        &self.submitted
    }

    /// Validated filter.
    pub const fn filter(&self) -> &SearchFilter {
        &self.filter
    }
}

impl From<SearchForm> for SearchFormContext {
    fn from(form: SearchForm) -> Self {
        Self {
            field: form.field.param(),
            value: form.submitted,
            placeholder: form.field.placeholder(),
        }
    }
}

/// Parsed list request: search form plus requested page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    form: SearchForm,
    page: PageNumber,
}

impl ListQuery {
    /// Parse raw query values. Invalid page values fall back to page one.
    ///
    /// # Examples
    /// ```
    /// use kitchen::domain::{ListQuery, SearchField};
    ///
    /// let query = ListQuery::parse(SearchField::Username, Some("ann"), Some("-2"));
    /// assert_eq!(query.page().get(), 1);
    /// assert_eq!(query.filter().text(), Some("ann"));
    /// ```
    pub fn parse(field: SearchField, filter: Option<&str>, page: Option<&str>) -> Self {
        Self {
            form: SearchForm::bind(field, filter),
            page: PageNumber::from_query(page),
        }
    }

    /// Unfiltered request for the first page.
    pub fn first_page(field: SearchField) -> Self {
        Self::parse(field, None, None)
    }

    /// Bound search form.
    pub const fn form(&self) -> &SearchForm {
        &self.form
    }

    /// Validated filter.
    pub const fn filter(&self) -> &SearchFilter {
        self.form.filter()
    }

    /// Requested page before clamping.
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Link builder that carries the filter into page links.
    pub fn links(&self) -> PageLinks {
        match self.filter().text() {
            Some(text) => PageLinks::new().with_param(self.form.field().param(), text),
            None => PageLinks::new(),
        }
    }
}
