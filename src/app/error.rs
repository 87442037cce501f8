//! Top-level error type for facade operations.

use thiserror::Error;

use crate::account::AccountError;
use crate::habit::HabitError;
use crate::social::SocialError;
use crate::store::StoreError;

/// Error type for [`HabMate`](super::HabMate) operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// An operation that needs a session was called while logged out.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Account-layer failure.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Habit-layer failure.
    #[error(transparent)]
    Habit(#[from] HabitError),

    /// Social-layer failure.
    #[error(transparent)]
    Social(#[from] SocialError),

    /// Store failure outside any domain layer.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for facade operations.
pub type Result<T> = std::result::Result<T, AppError>;
