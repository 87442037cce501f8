//! Storage key layout.
//!
//! All persisted entities live in one flat key space:
//!
//! | Key pattern          | Value                          |
//! |----------------------|--------------------------------|
//! | `user_<id>`          | User record JSON               |
//! | `habits_<userId>`    | Array of habit records JSON    |
//! | `lastReset_<userId>` | ISO-8601 date string           |
//! | `currentUser`        | Session copy of a user record  |

/// Key prefix for user records.
pub const USER_PREFIX: &str = "user_";

/// Key prefix for per-user habit lists.
pub const HABITS_PREFIX: &str = "habits_";

/// Key prefix for per-user daily-reset markers.
pub const LAST_RESET_PREFIX: &str = "lastReset_";

/// Key holding the session's denormalized copy of the current user.
pub const CURRENT_USER: &str = "currentUser";

/// Key for a user record.
#[must_use]
pub fn user(user_id: &str) -> String {
    format!("{USER_PREFIX}{user_id}")
}

/// Key for a user's habit list.
#[must_use]
pub fn habits(user_id: &str) -> String {
    format!("{HABITS_PREFIX}{user_id}")
}

/// Key for a user's last daily-reset marker.
#[must_use]
pub fn last_reset(user_id: &str) -> String {
    format!("{LAST_RESET_PREFIX}{user_id}")
}
