//! Bundle-related errors

use super::LocatorError;

/// Creates a bundle not found error
pub fn not_found(name: impl Into<String>) -> LocatorError {
    LocatorError::BundleNotFound { name: name.into() }
}

/// Creates a root inaccessible error
pub fn root_inaccessible(path: impl Into<String>, reason: impl Into<String>) -> LocatorError {
    LocatorError::RootInaccessible {
        path: path.into(),
        reason: reason.into(),
    }
}
