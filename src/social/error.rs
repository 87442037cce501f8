//! Error types for social graph operations.

use thiserror::Error;

use crate::habit::HabitError;
use crate::store::StoreError;

/// Error type for follow/unfollow, search and feed operations.
#[derive(Error, Debug)]
pub enum SocialError {
    /// A user tried to follow themselves.
    #[error("Cannot follow yourself")]
    SelfFollow,

    /// Follower or target user does not exist.
    #[error("User not found: {0}")]
    NotFound(String),

    /// Habit lookup for a feed entry failed.
    #[error("Habit error: {0}")]
    Habit(#[from] HabitError),

    /// Underlying store failure.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<crate::account::AccountError> for SocialError {
    fn from(err: crate::account::AccountError) -> Self {
        match err {
            crate::account::AccountError::NotFound(who) => Self::NotFound(who),
            crate::account::AccountError::Store(e) => Self::Store(e),
            other => Self::Store(StoreError::Storage(other.to_string())),
        }
    }
}

/// Result type alias for social operations.
pub type Result<T> = std::result::Result<T, SocialError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_follow_display() {
        assert_eq!(SocialError::SelfFollow.to_string(), "Cannot follow yourself");
    }

    #[test]
    fn account_not_found_maps_to_not_found() {
        let err: SocialError = crate::account::AccountError::NotFound("u1".to_string()).into();
        assert!(matches!(err, SocialError::NotFound(_)));
    }
}
