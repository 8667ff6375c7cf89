//! Diesel table definitions for the kitchen schema.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Staff accounts. `username` is unique.
    cooks (id) {
        id -> Int8,
        username -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        years_of_experience -> Int4,
        /// Argon2id PHC string.
        password_hash -> Text,
        date_joined -> Timestamptz,
    }
}

diesel::table! {
    dish_types (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    ingredients (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Menu dishes; rows cascade away with their dish type.
    dishes (id) {
        id -> Int8,
        name -> Varchar,
        description -> Text,
        price -> Numeric,
        dish_type_id -> Int8,
    }
}

diesel::table! {
    dish_cooks (dish_id, cook_id) {
        dish_id -> Int8,
        cook_id -> Int8,
    }
}

diesel::table! {
    dish_ingredients (dish_id, ingredient_id) {
        dish_id -> Int8,
        ingredient_id -> Int8,
    }
}

diesel::joinable!(dishes -> dish_types (dish_type_id));
diesel::joinable!(dish_cooks -> dishes (dish_id));
diesel::joinable!(dish_cooks -> cooks (cook_id));
diesel::joinable!(dish_ingredients -> dishes (dish_id));
diesel::joinable!(dish_ingredients -> ingredients (ingredient_id));

diesel::allow_tables_to_appear_in_same_query!(
    cooks,
    dish_types,
    ingredients,
    dishes,
    dish_cooks,
    dish_ingredients,
);
