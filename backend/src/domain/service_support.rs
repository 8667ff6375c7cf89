//! Error mapping shared by the kitchen services.

use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::KitchenRepositoryError;

/// Translate a repository failure into a domain error.
pub(crate) fn map_repository_error(error: KitchenRepositoryError) -> Error {
    match error {
        KitchenRepositoryError::Connection { message } => {
            warn!(%message, "kitchen repository unavailable");
            Error::service_unavailable(format!("kitchen repository unavailable: {message}"))
        }
        KitchenRepositoryError::Query { message } => {
            Error::internal(format!("kitchen repository error: {message}"))
        }
        KitchenRepositoryError::DuplicateUsername { username } => {
            Error::conflict(format!("username {username} is already taken"))
        }
    }
}

/// Not-found error naming the record kind and id.
pub(crate) fn record_not_found(kind: &str, id: impl std::fmt::Display) -> Error {
    Error::not_found(format!("{kind} {id} not found"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(KitchenRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(KitchenRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(KitchenRepositoryError::duplicate_username("ann"), ErrorCode::Conflict)]
    fn maps_repository_errors(#[case] error: KitchenRepositoryError, #[case] expected: ErrorCode) {
        assert_eq!(map_repository_error(error).code(), expected);
    }

    #[rstest]
    fn not_found_names_the_record() {
        let err = record_not_found("dish", 4);
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "dish 4 not found");
    }
}
