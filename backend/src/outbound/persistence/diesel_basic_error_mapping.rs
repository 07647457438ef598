//! Shared Diesel error mapping for the student and course repositories.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Whether the error is a unique-constraint violation.
///
/// Both mutable tables carry exactly one unique constraint besides their
/// primary key (`students.email`, `courses.title`), so callers can map a
/// violation straight to their duplicate variant.
pub fn is_unique_violation(error: &diesel::result::Error) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Details stay in debug logs; the returned messages are generic so driver
/// text never reaches API clients.
pub fn map_basic_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[derive(Debug, PartialEq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(error, Mapped::Query, Mapped::Connection)
    }

    #[rstest]
    #[case(DieselError::NotFound, Mapped::Query("record not found"))]
    #[case(
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, Box::new("gone".to_owned())),
        Mapped::Connection("database connection error")
    )]
    #[case(
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, Box::new("check".to_owned())),
        Mapped::Query("database error")
    )]
    fn maps_diesel_errors(#[case] error: DieselError, #[case] expected: Mapped) {
        assert_eq!(map(error), expected);
    }

    #[test]
    fn detects_unique_violations_only() {
        let unique = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("students_email_key".to_owned()),
        );
        assert!(is_unique_violation(&unique));
        assert!(!is_unique_violation(&DieselError::NotFound));
    }

    #[test]
    fn pool_errors_map_to_connection() {
        let mapped: String =
            map_basic_pool_error(PoolError::checkout("timed out"), |message| message);
        assert_eq!(mapped, "timed out");
    }
}
