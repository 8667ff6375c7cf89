//! Kitchen domain: records, validation, search, listing and services.
//!
//! Inbound adapters talk to the driving ports in [`ports`]; outbound adapters
//! implement the repository ports. Nothing here depends on HTTP or SQL.

pub mod auth;
pub mod cook;
pub mod cook_service;
pub mod dish;
pub mod dish_service;
pub mod dish_type;
pub mod dish_type_service;
pub mod error;
pub mod ingredient;
pub mod ingredient_service;
pub mod listing;
pub mod login_service;
pub mod overview_service;
pub mod ports;
pub mod record_id;
pub mod record_name;
pub mod search;
mod service_support;
pub mod trace_id;
pub mod validation;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::cook::{
    COOK_NAME_MAX, Cook, CookCredentials, CookDetail, ExperienceValidationError, NewCook,
    NewPassword, PASSWORD_MIN_LENGTH, PasswordValidationError, PersonName, PersonNameTooLong,
    Username, UsernameValidationError, YearsOfExperience,
};
pub use self::cook_service::CookService;
pub use self::dish::{
    DishDescription, DishDetail, DishDraft, DishFields, DishSummary, PRICE_DECIMAL_PLACES,
    PRICE_WHOLE_DIGITS, Price, PriceValidationError,
};
pub use self::dish_service::{DishService, DishServiceRepositories};
pub use self::dish_type::DishType;
pub use self::dish_type_service::DishTypeService;
pub use self::error::{Error, ErrorCode};
pub use self::ingredient::Ingredient;
pub use self::ingredient_service::IngredientService;
pub use self::listing::{LIST_PAGE_SIZE, Listing, resolve_listing};
pub use self::login_service::CookLoginService;
pub use self::overview_service::OverviewService;
pub use self::record_id::{CookId, DishId, DishTypeId, IngredientId};
pub use self::record_name::{
    DishName, DishTypeName, IngredientName, NameValidationError, RecordName,
};
pub use self::search::{ListQuery, SearchField, SearchFilter, SearchForm, SearchFormContext};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{FieldErrors, FieldIssue, FieldIssueSource, Required};
