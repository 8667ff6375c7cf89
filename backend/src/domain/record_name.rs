//! Bounded, trimmed names used by dish types, ingredients and dishes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::FieldIssueSource;

/// Validation errors for [`RecordName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameValidationError {
    /// The name is empty once trimmed.
    Blank,
    /// The name has more than `max` characters.
    TooLong { max: usize },
}

impl fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "This field is required."),
            Self::TooLong { max } => {
                write!(f, "Ensure this value has at most {max} characters.")
            }
        }
    }
}

impl std::error::Error for NameValidationError {}

impl FieldIssueSource for NameValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Blank => "required",
            Self::TooLong { .. } => "max_length",
        }
    }
}

/// Non-blank name of at most `MAX` characters, trimmed of surrounding
/// whitespace.
///
/// # Examples
/// ```
/// use kitchen::domain::{DishTypeName, IngredientName, NameValidationError};
///
/// assert_eq!(DishTypeName::new("  Soup ").unwrap().as_ref(), "Soup");
/// assert_eq!(
///     IngredientName::new("x".repeat(64)),
///     Err(NameValidationError::TooLong { max: 63 })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordName<const MAX: usize>(String);

/// Dish type name, up to 255 characters.
pub type DishTypeName = RecordName<255>;
/// Ingredient name, up to 63 characters.
pub type IngredientName = RecordName<63>;
/// Dish name, up to 255 characters.
pub type DishName = RecordName<255>;

impl<const MAX: usize> RecordName<MAX> {
    /// Validate and construct a name.
    pub fn new(raw: impl Into<String>) -> Result<Self, NameValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NameValidationError::Blank);
        }
        if trimmed.chars().count() > MAX {
            return Err(NameValidationError::TooLong { max: MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl<const MAX: usize> AsRef<str> for RecordName<MAX> {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl<const MAX: usize> fmt::Display for RecordName<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const MAX: usize> From<RecordName<MAX>> for String {
    fn from(value: RecordName<MAX>) -> Self {
        value.0
    }
}

impl<const MAX: usize> TryFrom<String> for RecordName<MAX> {
    type Error = NameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", NameValidationError::Blank)]
    #[case(" \t ", NameValidationError::Blank)]
    fn rejects_blank(#[case] raw: &str, #[case] expected: NameValidationError) {
        assert_eq!(DishName::new(raw), Err(expected));
    }

    #[rstest]
    fn length_counts_characters_not_bytes() {
        let accented = "é".repeat(63);
        assert!(IngredientName::new(accented).is_ok());
    }

    #[rstest]
    fn accepts_limit_and_rejects_one_past() {
        assert!(DishTypeName::new("a".repeat(255)).is_ok());
        assert_eq!(
            DishTypeName::new("a".repeat(256)),
            Err(NameValidationError::TooLong { max: 255 })
        );
    }

    #[rstest]
    fn deserialises_through_validation() {
        let name: IngredientName = serde_json::from_str("\" Salt \"").expect("valid name");
        assert_eq!(name.as_ref(), "Salt");
        assert!(serde_json::from_str::<IngredientName>("\"\"").is_err());
    }
}
