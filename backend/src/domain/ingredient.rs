//! Ingredients that dishes are made from.

use std::fmt;

use crate::domain::{IngredientId, IngredientName};

/// Persisted ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: IngredientName,
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
