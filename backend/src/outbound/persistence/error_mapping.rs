//! Shared Diesel error mapping for the kitchen repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::KitchenRepositoryError;

use super::pool::PoolError;

/// Map pool errors into connection failures.
pub(crate) fn map_pool_error(error: PoolError) -> KitchenRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            KitchenRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors into query or connection failures.
///
/// Constraint violations keep the constraint name so logs can tell a stale
/// foreign key from a duplicate key.
pub(crate) fn map_diesel_error(error: DieselError) -> KitchenRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => KitchenRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => KitchenRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            KitchenRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(
            kind @ (DatabaseErrorKind::ForeignKeyViolation | DatabaseErrorKind::UniqueViolation),
            info,
        ) => {
            warn!(
                ?kind,
                constraint = ?info.constraint_name(),
                "constraint violation escaped validation"
            );
            KitchenRepositoryError::query(format!(
                "constraint violation: {}",
                info.constraint_name().unwrap_or("unknown")
            ))
        }
        _ => KitchenRepositoryError::query("database error"),
    }
}

/// Whether `error` is a violation of the unique username constraint.
pub(crate) fn is_duplicate_username(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(USERNAME_CONSTRAINT)
    )
}

const USERNAME_CONSTRAINT: &str = "cooks_username_key";

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PoolError::checkout("timed out"), "timed out")]
    #[case(PoolError::build("bad url"), "bad url")]
    fn pool_errors_become_connection_errors(#[case] error: PoolError, #[case] message: &str) {
        assert_eq!(
            map_pool_error(error),
            KitchenRepositoryError::connection(message)
        );
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(
            map_diesel_error(DieselError::NotFound),
            KitchenRepositoryError::query("record not found")
        );
    }

    #[rstest]
    fn plain_errors_are_not_duplicate_usernames() {
        assert!(!is_duplicate_username(&DieselError::NotFound));
        assert!(!is_duplicate_username(&DieselError::RollbackTransaction));
    }
}
