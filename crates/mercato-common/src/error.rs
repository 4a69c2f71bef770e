//! Unified error type for mercato.
//!
//! Every crate funnels its failures into [`Error`], which carries enough
//! context for the HTTP layer to derive a status code via
//! [`Error::http_status`].

use std::fmt;

/// Common error type for mercato.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller-supplied data was rejected (empty name, bad extension,
    /// unsafe filename). Never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "item", "image").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A referential or uniqueness rule of the catalog was violated.
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// A database operation failed.
    #[error("Database error: {source}")]
    Database {
        /// The underlying database error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::NotFound { .. } => 404,
            Error::Integrity(_) => 409,
            Error::Database { .. } => 500,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Integrity`].
    pub fn integrity(msg: impl Into<String>) -> Self {
        Error::Integrity(msg.into())
    }

    /// Convenience constructor for [`Error::Database`].
    pub fn database(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Database {
            source: source.into(),
        }
    }

    /// Returns true for the "absent" outcome, as opposed to a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = Error::not_found("item", 9999);
        assert_eq!(err.to_string(), "item not found: 9999");
        assert_eq!(err.http_status(), 404);
        assert!(err.is_not_found());
    }

    #[test]
    fn validation_display() {
        let err = Error::validation("name must not be empty");
        assert_eq!(err.to_string(), "Validation error: name must not be empty");
        assert_eq!(err.http_status(), 400);
        assert!(!err.is_not_found());
    }

    #[test]
    fn integrity_display() {
        let err = Error::integrity("category 3 does not exist");
        assert_eq!(err.to_string(), "Integrity error: category 3 does not exist");
        assert_eq!(err.http_status(), 409);
    }

    #[test]
    fn database_wraps_source() {
        let err = Error::database("disk I/O error");
        assert_eq!(err.to_string(), "Database error: disk I/O error");
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn io_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn internal_display() {
        let err = Error::Internal("oops".into());
        assert_eq!(err.to_string(), "Internal error: oops");
        assert_eq!(err.http_status(), 500);
    }
}
