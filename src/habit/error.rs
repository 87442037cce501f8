//! Error types for habit operations.

use thiserror::Error;

use crate::store::StoreError;

/// Error type for habit tracking operations.
#[derive(Error, Debug)]
pub enum HabitError {
    /// Missing or malformed input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No habit with this id in the user's list.
    #[error("Habit not found: {0}")]
    NotFound(String),

    /// Underlying store failure.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for habit operations.
pub type Result<T> = std::result::Result<T, HabitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = HabitError::NotFound("h1".to_string());
        assert_eq!(err.to_string(), "Habit not found: h1");
    }

    #[test]
    fn store_error_converts() {
        let err: HabitError = StoreError::Storage("oops".to_string()).into();
        assert!(matches!(err, HabitError::Store(_)));
    }
}
