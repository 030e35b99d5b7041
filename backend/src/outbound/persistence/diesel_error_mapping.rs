//! Diesel and pool error mapping for the named entity repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::NamedEntityRepositoryError;

use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> NamedEntityRepositoryError {
    match error {
        PoolError::Connect { message } | PoolError::Checkout { message } => {
            NamedEntityRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors, keeping unique violations
/// distinguishable.
pub(crate) fn map_diesel_error(error: DieselError) -> NamedEntityRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let reason = info.details().unwrap_or_else(|| info.message());
            NamedEntityRepositoryError::unique_violation(reason)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            NamedEntityRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => {
            NamedEntityRepositoryError::query("database query error")
        }
        _ => NamedEntityRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violation_is_preserved() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_string()),
        );

        let mapped = map_diesel_error(error);

        assert!(matches!(
            mapped,
            NamedEntityRepositoryError::UniqueViolation { .. }
        ));
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_string()),
        );

        assert_eq!(
            map_diesel_error(error),
            NamedEntityRepositoryError::connection("database connection error")
        );
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    fn other_errors_map_to_query(#[case] error: DieselError) {
        assert_eq!(
            map_diesel_error(error),
            NamedEntityRepositoryError::query("database error")
        );
    }

    #[rstest]
    #[case(PoolError::Checkout { message: "timed out".into() })]
    #[case(PoolError::Connect { message: "bad url".into() })]
    fn pool_errors_map_to_connection(#[case] error: PoolError) {
        assert!(matches!(
            map_pool_error(error),
            NamedEntityRepositoryError::Connection { .. }
        ));
    }
}
