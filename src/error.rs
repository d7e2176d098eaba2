//! Error types for the batepapo service.

use thiserror::Error;

/// Common error type for the service.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Database error.
    ///
    /// Wraps any failure reported by the MongoDB driver.
    #[error("database error: {0}")]
    Database(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource already exists.
    #[error("{0} already exists")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Requester is not the owner of the resource.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from MongoDB driver errors
impl From<mongodb::error::Error> for ChatError {
    fn from(e: mongodb::error::Error) -> Self {
        ChatError::Database(e.to_string())
    }
}

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ChatError::Validation("name must not be empty".to_string());
        assert_eq!(err.to_string(), "validation error: name must not be empty");
    }

    #[test]
    fn test_conflict_error_display() {
        let err = ChatError::Conflict("participant".to_string());
        assert_eq!(err.to_string(), "participant already exists");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = ChatError::NotFound("message".to_string());
        assert_eq!(err.to_string(), "message not found");
    }

    #[test]
    fn test_unauthorized_error_display() {
        let err = ChatError::Unauthorized("not the message author".to_string());
        assert_eq!(err.to_string(), "not authorized: not the message author");
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(ChatError::NotFound("thing".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
