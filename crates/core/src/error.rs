// Domain Error Taxonomy

use std::fmt;

use thiserror::Error;

/// Classification of a failure, independent of the storage technology.
///
/// Callers branch on the kind only; the wrapped source is diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied data violates a model invariant.
    Validation,
    /// Requested entity is absent.
    NotFound,
    /// Uniqueness conflict.
    AlreadyExists,
    /// Malformed transfer object.
    BadRequest,
    /// Any other storage failure (connection loss, syntax, timeout).
    Database,
    /// Programming or invariant violation.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not-found",
            ErrorKind::AlreadyExists => "already-exists",
            ErrorKind::BadRequest => "bad-request",
            ErrorKind::Database => "database",
            ErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// The only failure type repositories and use cases communicate with.
///
/// Carries a kind, a human-readable message and an optional low-level
/// cause. The cause never crosses the API boundary verbatim.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyExists, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Attach the low-level cause for diagnostics.
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;
