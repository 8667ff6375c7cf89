//! Surrogate identifiers for persisted kitchen records.

/// Define a `Copy` newtype over the store's `BIGINT` primary key.
macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::utoipa::ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw primary key.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw primary key.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_record_id! {
    /// Identifier of a [`Cook`](crate::domain::Cook).
    CookId
}

define_record_id! {
    /// Identifier of a [`DishType`](crate::domain::DishType).
    DishTypeId
}

define_record_id! {
    /// Identifier of an [`Ingredient`](crate::domain::Ingredient).
    IngredientId
}

define_record_id! {
    /// Identifier of a dish.
    DishId
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn serialises_as_bare_integer() {
        let value = serde_json::to_value(DishId::new(42)).expect("serialise id");
        assert_eq!(value, serde_json::json!(42));
        assert_eq!(CookId::new(7).to_string(), "7");
    }
}
