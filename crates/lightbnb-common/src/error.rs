//! Common error types used throughout lightbnb.
//!
//! Every store operation returns this error so callers can tell a missing
//! row (`Ok(None)` or an empty list) apart from a failed statement.

/// Common error type for lightbnb.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A uniqueness constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new Conflict error.
    pub fn conflict<S: Into<String>>(msg: S) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a new Database error.
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// True when the error came from the store rather than from the caller.
    pub fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::conflict("email taken");
        assert_eq!(err.to_string(), "Conflict: email taken");

        let err = Error::database("connection failed");
        assert_eq!(err.to_string(), "Database error: connection failed");

        let err = Error::invalid_input("bad limit");
        assert_eq!(err.to_string(), "Invalid input: bad limit");

        let err = Error::internal("join failed");
        assert_eq!(err.to_string(), "Internal error: join failed");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_is_database() {
        assert!(Error::database("locked").is_database());
        assert!(!Error::invalid_input("rating").is_database());
        assert!(!Error::conflict("email").is_database());
    }
}
