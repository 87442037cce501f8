//! Habit tracking: per-user habit lists, completion state and daily reset.
//!
//! # Architecture
//!
//! ```text
//! HabitRepository (CRUD over the habits_<userId> record, healing reads)
//! DailyResetScheduler (lastReset_<userId> marker, once per calendar day)
//!     └── KvStore
//! ```
//!
//! # Types
//!
//! - [`Habit`]: a tracked habit with an append-only completion history
//! - [`RawHabit`]: the pre-healing storage shape
//! - [`ProgressSummary`]: completed/total/percent for a list

mod error;
mod repository;
mod reset;
pub mod types;

pub use error::{HabitError, Result};
pub use repository::HabitRepository;
pub use reset::{DailyResetScheduler, ResetOutcome};
pub use types::{Category, Habit, ProgressSummary, RawHabit, TimeOfDay, UNNAMED_HABIT};
