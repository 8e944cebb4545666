//! Strict error handling with CommandError enum
//!
//! Every fallible operation in the converter returns `CommandResult<T>`.
//! All errors are serializable so a front end can render them directly.

use serde::Serialize;
use thiserror::Error;

/// Command execution errors
///
/// None of these are fatal: callers degrade to an empty result, an empty
/// history, or the unchanged prior state.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum CommandError {
    /// Empty, non-numeric or non-finite value, or an unknown category name
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unit key not recognized for the requested category
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    /// Durable storage could not be read or written
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    /// System I/O error (settings file, data directory)
    #[error("System I/O error: {0}")]
    SystemIO(String),
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::SystemIO(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::StorageFailure(format!("JSON error: {}", err))
    }
}

macro_rules! storage_error_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for CommandError {
                fn from(err: $ty) -> Self {
                    CommandError::StorageFailure(err.to_string())
                }
            }
        )*
    };
}

storage_error_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

// Helper type alias for command results
pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = CommandError::InvalidUnit("parsec".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "InvalidUnit");
        assert_eq!(json["message"], "parsec");
    }

    #[test]
    fn io_errors_map_to_system_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(CommandError::from(io), CommandError::SystemIO(_)));
    }
}
