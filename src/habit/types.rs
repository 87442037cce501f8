//! Habit record types and the raw-record healing step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id;

/// Name substituted for habits stored without one.
pub const UNNAMED_HABIT: &str = "Unnamed Habit";

/// When during the day a habit is meant to happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// No particular time.
    #[default]
    Anytime,
    /// Morning habit.
    Morning,
    /// Afternoon habit.
    Afternoon,
    /// Evening habit.
    Evening,
}

impl TimeOfDay {
    /// Converts to the stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anytime => "anytime",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    /// Parses from the stored string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "anytime" => Some(Self::Anytime),
            "morning" => Some(Self::Morning),
            "afternoon" => Some(Self::Afternoon),
            "evening" => Some(Self::Evening),
            _ => None,
        }
    }
}

/// Habit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Health & fitness.
    Health,
    /// Learning.
    Learning,
    /// Productivity.
    Productivity,
    /// Mindfulness.
    Mindfulness,
    /// Everything else.
    #[default]
    Other,
}

impl Category {
    /// Converts to the stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Learning => "learning",
            Self::Productivity => "productivity",
            Self::Mindfulness => "mindfulness",
            Self::Other => "other",
        }
    }

    /// Parses from the stored string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "health" => Some(Self::Health),
            "learning" => Some(Self::Learning),
            "productivity" => Some(Self::Productivity),
            "mindfulness" => Some(Self::Mindfulness),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A tracked habit.
///
/// `completed` is the today-flag cleared by the daily reset; `history` is the
/// append-only log of completion timestamps and is never shortened, not even
/// when a completion is toggled back off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique within the owning user's list.
    pub id: String,
    /// Id of the owning user.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Scheduled time of day.
    pub time_of_day: TimeOfDay,
    /// Category.
    pub category: Category,
    /// Whether the habit is done for the current day.
    pub completed: bool,
    /// When the habit was created.
    pub created_at: DateTime<Utc>,
    /// When the habit was last mutated (toggle or daily reset).
    pub last_updated: DateTime<Utc>,
    /// Completion timestamps, append-only.
    #[serde(default)]
    pub history: Vec<DateTime<Utc>>,
}

/// A habit record as it sits in storage, before healing.
///
/// Every field is optional so records written by earlier schema versions
/// (or edited by hand) still deserialize; [`RawHabit::heal`] is the single
/// place defaults are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawHabit {
    /// Stored id, if any.
    pub id: Option<String>,
    /// Stored owner id, if any.
    pub user_id: Option<String>,
    /// Stored name, if any.
    pub name: Option<String>,
    /// Stored time of day, kept as text so unknown values can default.
    pub time_of_day: Option<String>,
    /// Stored category, kept as text so unknown values can default.
    pub category: Option<String>,
    /// Stored completion flag, if any.
    pub completed: Option<bool>,
    /// Stored creation timestamp, if any.
    pub created_at: Option<DateTime<Utc>>,
    /// Stored last-update timestamp, if any.
    pub last_updated: Option<DateTime<Utc>>,
    /// Stored completion history, if any.
    pub history: Option<Vec<DateTime<Utc>>>,
}

impl RawHabit {
    /// Pure defaulting step from a raw record to a validated [`Habit`].
    ///
    /// Absent fields get defaults: a fresh id, the owning user's id, the
    /// [`UNNAMED_HABIT`] name, `anytime`/`other` enums (unrecognized enum
    /// text also defaults), pending completion, `now` timestamps and an
    /// empty history.
    #[must_use]
    pub fn heal(self, owner_id: &str, now: DateTime<Utc>) -> Habit {
        Habit {
            id: self.id.unwrap_or_else(id::new_id),
            user_id: self.user_id.unwrap_or_else(|| owner_id.to_string()),
            name: self.name.unwrap_or_else(|| UNNAMED_HABIT.to_string()),
            time_of_day: self
                .time_of_day
                .as_deref()
                .and_then(TimeOfDay::parse)
                .unwrap_or_default(),
            category: self
                .category
                .as_deref()
                .and_then(Category::parse)
                .unwrap_or_default(),
            completed: self.completed.unwrap_or(false),
            created_at: self.created_at.unwrap_or(now),
            last_updated: self.last_updated.unwrap_or(now),
            history: self.history.unwrap_or_default(),
        }
    }
}

/// Completion summary for a habit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    /// Habits completed today.
    pub completed: usize,
    /// Total habits.
    pub total: usize,
    /// Rounded completion percentage; 0 for an empty list.
    pub percent: usize,
}

impl ProgressSummary {
    /// Computes the summary for a habit list.
    #[must_use]
    pub fn of(habits: &[Habit]) -> Self {
        let total = habits.len();
        let completed = habits.iter().filter(|h| h.completed).count();
        let percent = if total == 0 {
            0
        } else {
            (completed * 100 + total / 2) / total
        };
        Self {
            completed,
            total,
            percent,
        }
    }
}
