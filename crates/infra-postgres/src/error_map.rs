// Storage Error Inspection
//
// Classification of native Postgres failures into the domain taxonomy
// is centralized here and in the per-operation `classify_*` functions
// of each repository. Swapping the storage engine means reimplementing
// only this module.

use plume_core::Error;

/// Uniqueness-constraint violation, regardless of the constraint.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
    )
}

/// Name of the violated constraint, when the driver reports one.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.constraint().map(str::to_owned),
        _ => None,
    }
}

/// Zero rows where exactly one was expected.
pub(crate) fn is_row_not_found(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::RowNotFound)
}

/// Default classification: a database-kind error named after the
/// failed operation, carrying the native error as source.
pub(crate) fn storage_error(op: &str, err: sqlx::Error) -> Error {
    Error::database(format!("{op} failed")).with_source(err)
}

#[cfg(test)]
pub(crate) mod fake {
    //! A stand-in `DatabaseError` carrying Postgres error metadata, so
    //! classification is testable without a live server.

    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    pub(crate) const UNIQUE_VIOLATION: &str = "23505";

    #[derive(Debug)]
    pub(crate) struct FakePgError {
        pub code: &'static str,
        pub constraint: Option<&'static str>,
    }

    impl fmt::Display for FakePgError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "pg error {}", self.code)
        }
    }

    impl StdError for FakePgError {}

    impl sqlx::error::DatabaseError for FakePgError {
        fn message(&self) -> &str {
            "fake postgres error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.code {
                UNIQUE_VIOLATION => sqlx::error::ErrorKind::UniqueViolation,
                _ => sqlx::error::ErrorKind::Other,
            }
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
    }

    pub(crate) fn unique_violation(constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakePgError {
            code: UNIQUE_VIOLATION,
            constraint: Some(constraint),
        }))
    }

    pub(crate) fn other_pg_error() -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakePgError {
            code: "57014", // query_canceled
            constraint: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::ErrorKind;

    #[test]
    fn detects_unique_violations_by_driver_kind() {
        assert!(is_unique_violation(&fake::unique_violation("users_email_key")));
        assert!(!is_unique_violation(&fake::other_pg_error()));
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn reports_the_violated_constraint_name() {
        assert_eq!(
            violated_constraint(&fake::unique_violation("users_email_key")).as_deref(),
            Some("users_email_key")
        );
        assert_eq!(violated_constraint(&sqlx::Error::RowNotFound), None);
    }

    #[test]
    fn row_not_found_is_its_own_shape() {
        assert!(is_row_not_found(&sqlx::Error::RowNotFound));
        assert!(!is_row_not_found(&fake::other_pg_error()));
    }

    #[test]
    fn storage_errors_are_database_kind_with_the_cause_attached() {
        let err = storage_error("get user by id", fake::other_pg_error());
        assert_eq!(err.kind(), ErrorKind::Database);
        assert_eq!(err.message(), "get user by id failed");
        assert!(std::error::Error::source(&err).is_some());
    }
}
