//! Dishes, their prices and their relations to types, cooks and ingredients.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Cook, CookId, DishId, DishName, DishType, FieldIssueSource, Ingredient, IngredientId,
    DishTypeId, RecordName,
};

/// Free-text dish description; required but unbounded.
pub type DishDescription = RecordName<{ usize::MAX }>;

/// Fractional digits kept on every price.
pub const PRICE_DECIMAL_PLACES: u32 = 2;
/// Digits allowed before the decimal point (10 in total, 2 fractional).
pub const PRICE_WHOLE_DIGITS: usize = 8;

const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Validation errors for [`Price`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceValidationError {
    Negative,
    TooManyDecimalPlaces { max: u32 },
    TooManyWholeDigits { max: usize },
}

impl fmt::Display for PriceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => write!(f, "Ensure this value is greater than or equal to 0."),
            Self::TooManyDecimalPlaces { max } => {
                write!(f, "Ensure that there are no more than {max} decimal places.")
            }
            Self::TooManyWholeDigits { max } => write!(
                f,
                "Ensure that there are no more than {max} digits before the decimal point."
            ),
        }
    }
}

impl std::error::Error for PriceValidationError {}

impl FieldIssueSource for PriceValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Negative => "min_value",
            Self::TooManyDecimalPlaces { .. } => "max_decimal_places",
            Self::TooManyWholeDigits { .. } => "max_whole_digits",
        }
    }
}

/// Non-negative price with exactly two fractional digits.
///
/// # Examples
/// ```
/// use kitchen::domain::{Price, PriceValidationError};
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(125, 1)).unwrap();
/// assert_eq!(price.to_string(), "12.50");
/// assert_eq!(
///     Price::new(Decimal::new(1001, 3)),
///     Err(PriceValidationError::TooManyDecimalPlaces { max: 2 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Validate and normalise a price.
    pub fn new(value: Decimal) -> Result<Self, PriceValidationError> {
        let mut normalized = value.normalize();
        if normalized.is_sign_negative() && !normalized.is_zero() {
            return Err(PriceValidationError::Negative);
        }
        if normalized.scale() > PRICE_DECIMAL_PLACES {
            return Err(PriceValidationError::TooManyDecimalPlaces {
                max: PRICE_DECIMAL_PLACES,
            });
        }
        if normalized.abs() >= PRICE_LIMIT {
            return Err(PriceValidationError::TooManyWholeDigits {
                max: PRICE_WHOLE_DIGITS,
            });
        }
        normalized.set_sign_positive(true);
        normalized.rescale(PRICE_DECIMAL_PLACES);
        Ok(Self(normalized))
    }

    /// Decimal value with scale two.
    pub const fn amount(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Dish row as shown in lists, with its type loaded alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishSummary {
    pub id: DishId,
    pub name: DishName,
    pub price: Price,
    pub dish_type: DishType,
}

/// `"{name} (price: {price}, type: {dish_type})"`.
impl fmt::Display for DishSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (price: {}, type: {})",
            self.name, self.price, self.dish_type.name
        )
    }
}

/// A dish with every relation resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishDetail {
    pub summary: DishSummary,
    pub description: DishDescription,
    pub cooks: Vec<Cook>,
    pub ingredients: Vec<Ingredient>,
}

/// Validated dish fields for insertion or replacement.
///
/// Cook and ingredient ids are sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishDraft {
    pub name: DishName,
    pub description: DishDescription,
    pub price: Price,
    pub dish_type: DishTypeId,
    pub cooks: Vec<CookId>,
    pub ingredients: Vec<IngredientId>,
}

/// Validated scalar fields of a [`DishDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishFields {
    pub name: DishName,
    pub description: DishDescription,
    pub price: Price,
    pub dish_type: DishTypeId,
}

impl DishDraft {
    /// Assemble a draft, normalising the relation id sets.
    pub fn new(
        fields: DishFields,
        mut cooks: Vec<CookId>,
        mut ingredients: Vec<IngredientId>,
    ) -> Self {
        cooks.sort_unstable();
        cooks.dedup();
        ingredients.sort_unstable();
        ingredients.dedup();
        let DishFields {
            name,
            description,
            price,
            dish_type,
        } = fields;
        Self {
            name,
            description,
            price,
            dish_type,
            cooks,
            ingredients,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::DishTypeName;
    use rstest::rstest;

    #[rstest]
    #[case(Decimal::new(-1, 2), Err(PriceValidationError::Negative))]
    #[case(Decimal::new(12345, 3), Err(PriceValidationError::TooManyDecimalPlaces { max: 2 }))]
    #[case(Decimal::new(100_000_000, 0), Err(PriceValidationError::TooManyWholeDigits { max: 8 }))]
    #[case(Decimal::new(9_999_999_999, 2), Ok("99999999.99"))]
    #[case(Decimal::new(12_500, 3), Ok("12.50"))]
    #[case(Decimal::new(0, 0), Ok("0.00"))]
    fn price_rules(
        #[case] raw: Decimal,
        #[case] expected: Result<&str, PriceValidationError>,
    ) {
        let rendered = Price::new(raw).map(|price| price.to_string());
        assert_eq!(rendered.as_deref().map_err(|err| *err), expected);
    }

    #[rstest]
    fn negative_zero_is_accepted() {
        let mut negative_zero = Decimal::ZERO;
        negative_zero.set_sign_negative(true);
        let price = Price::new(negative_zero).expect("zero is not negative");
        assert_eq!(price.to_string(), "0.00");
    }

    #[rstest]
    fn summary_display_format() {
        let dish = DishSummary {
            id: DishId::new(1),
            name: DishName::new("test_name").expect("name"),
            price: Price::new(Decimal::new(1050, 2)).expect("price"),
            dish_type: DishType {
                id: DishTypeId::new(1),
                name: DishTypeName::new("test_dish_type").expect("type"),
            },
        };
        assert_eq!(
            dish.to_string(),
            "test_name (price: 10.50, type: test_dish_type)"
        );
    }

    #[rstest]
    fn draft_sorts_and_deduplicates_relations() {
        let fields = DishFields {
            name: DishName::new("Borscht").expect("name"),
            description: DishDescription::new("Beetroot soup").expect("description"),
            price: Price::new(Decimal::new(7, 0)).expect("price"),
            dish_type: DishTypeId::new(2),
        };
        let draft = DishDraft::new(
            fields,
            vec![CookId::new(3), CookId::new(1), CookId::new(3)],
            vec![IngredientId::new(9), IngredientId::new(9)],
        );
        assert_eq!(draft.cooks, vec![CookId::new(1), CookId::new(3)]);
        assert_eq!(draft.ingredients, vec![IngredientId::new(9)]);
    }
}
