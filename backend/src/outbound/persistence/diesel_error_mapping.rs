//! Diesel and pool error mapping for the order repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::OrderRepositoryError;

use super::pool::PoolError;

/// Which port error a failed statement should surface as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatementKind {
    Read,
    Write,
}

/// Map pool errors into connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> OrderRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    OrderRepositoryError::connection(message)
}

/// Map a Diesel error, logging the database detail at debug level.
///
/// Lost connections become `Connection`; everything else becomes `Query` or
/// `Write` depending on `kind`.
pub(crate) fn map_diesel_error(error: DieselError, kind: StatementKind) -> OrderRepositoryError {
    match &error {
        DieselError::DatabaseError(db_kind, info) => {
            debug!(kind = ?db_kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    let message = error.to_string();
    match (error, kind) {
        (DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _), _)
        | (DieselError::BrokenTransactionManager, _) => OrderRepositoryError::connection(message),
        (_, StatementKind::Write) => OrderRepositoryError::write(message),
        (_, StatementKind::Read) => OrderRepositoryError::query(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatementKind::Read)]
    #[case(StatementKind::Write)]
    fn broken_transactions_are_connection_errors(#[case] kind: StatementKind) {
        let err = map_diesel_error(DieselError::BrokenTransactionManager, kind);
        assert!(matches!(err, OrderRepositoryError::Connection { .. }));
    }

    #[test]
    fn statement_kind_selects_variant() {
        assert!(matches!(
            map_diesel_error(DieselError::NotFound, StatementKind::Read),
            OrderRepositoryError::Query { .. }
        ));
        assert!(matches!(
            map_diesel_error(DieselError::NotFound, StatementKind::Write),
            OrderRepositoryError::Write { .. }
        ));
    }

    #[test]
    fn pool_errors_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(
            err,
            OrderRepositoryError::connection("timed out".to_owned())
        );
    }
}
