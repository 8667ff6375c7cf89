//! Per-field validation reports for create and update forms.
//!
//! Services collect every failing field before answering so a form can show
//! all of its problems at once. The report travels to clients as
//! `details.fields` on an [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode)
//! error.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;

/// Validation failure that can be attached to a form field.
pub trait FieldIssueSource: fmt::Display {
    /// Stable machine-readable code, e.g. `max_length`.
    fn code(&self) -> &'static str;
}

/// A mandatory field was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Required;

impl fmt::Display for Required {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "This field is required.")
    }
}

impl FieldIssueSource for Required {
    fn code(&self) -> &'static str {
        "required"
    }
}

/// One problem reported against a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldIssue {
    #[schema(example = "required")]
    code: &'static str,
    #[schema(example = "This field is required.")]
    message: String,
}

impl FieldIssue {
    /// Build an issue from a code and message.
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Machine-readable code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Accumulated field problems for one form submission.
///
/// # Examples
/// ```
/// use kitchen::domain::{FieldErrors, IngredientName};
///
/// let mut errors = FieldErrors::new();
/// let name = errors.capture("name", IngredientName::new("   "));
/// assert!(name.is_none());
/// let err = errors.finish().expect_err("blank name is rejected");
/// assert_eq!(err.details().unwrap()["fields"]["name"][0]["code"], "required");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<&'static str, Vec<FieldIssue>>,
}

impl FieldErrors {
    /// Start an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue against `field`.
    pub fn push(&mut self, field: &'static str, issue: FieldIssue) {
        self.fields.entry(field).or_default().push(issue);
    }

    /// Keep the value of a successful validation, or record its failure.
    pub fn capture<T, E>(&mut self, field: &'static str, result: Result<T, E>) -> Option<T>
    where
        E: FieldIssueSource,
    {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(field, FieldIssue::new(err.code(), err.to_string()));
                None
            }
        }
    }

    /// Whether no field has failed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Issues recorded for `field`.
    pub fn issues(&self, field: &str) -> &[FieldIssue] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// Convert the report into an invalid-request error.
    pub fn into_error(self) -> Error {
        Error::invalid_request("Form validation failed").with_details(json!({
            "fields": self.fields,
        }))
    }

    /// Succeed when the report is empty.
    pub fn finish(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}
