//! Dish categories such as soups or desserts.

use std::fmt;

use crate::domain::{DishTypeId, DishTypeName};

/// Persisted dish type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishType {
    pub id: DishTypeId,
    pub name: DishTypeName,
}

impl fmt::Display for DishType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
