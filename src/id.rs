//! Identifier generation for users and habits.
//!
//! The original scheme concatenated a timestamp with a random suffix, which
//! leaves a (small) collision window for two ids minted in the same tick.
//! UUID v4 removes that hazard without needing a centralized counter.

use uuid::Uuid;

/// Returns a fresh unique identifier.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
