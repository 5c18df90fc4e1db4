//! File system errors

use super::LocatorError;

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> LocatorError {
    LocatorError::IoError {
        message: message.into(),
    }
}
