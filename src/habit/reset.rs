//! Daily reset of completion flags.
//!
//! Per user, a `lastReset_<userId>` marker records the calendar date habits
//! were last zeroed. There is no background timer: the check runs on demand
//! at session start, so a user who skips a day simply resets on their next
//! visit, with "today" defined at that visit. Within one calendar day the
//! check is idempotent by construction — once the marker matches today it
//! does nothing.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use super::error::Result;
use super::repository::HabitRepository;
use crate::store::{keys, KvStore};

/// What a reset check did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetOutcome {
    /// Whether a day boundary was crossed and habits were zeroed.
    pub performed: bool,
    /// How many habits had been completed before the reset.
    pub completed_cleared: usize,
}

impl ResetOutcome {
    const fn skipped() -> Self {
        Self {
            performed: false,
            completed_cleared: 0,
        }
    }
}

/// Runs the once-per-calendar-day habit reset.
#[derive(Clone)]
pub struct DailyResetScheduler {
    store: Arc<KvStore>,
    habits: HabitRepository,
}

impl DailyResetScheduler {
    /// Creates a scheduler over the given store.
    #[must_use]
    pub fn new(store: Arc<KvStore>) -> Self {
        Self {
            habits: HabitRepository::new(Arc::clone(&store)),
            store,
        }
    }

    /// Runs the reset check against the current calendar date.
    ///
    /// # Errors
    ///
    /// Returns an error if a store operation fails.
    pub fn check_and_reset(&self, user_id: &str) -> Result<ResetOutcome> {
        self.check_and_reset_on(user_id, Utc::now().date_naive())
    }

    /// Runs the reset check against an explicit date.
    ///
    /// If no marker exists for the user, or the marker's date differs from
    /// `today`, every habit's completion flag is cleared and `today` becomes
    /// the new marker. Date-parameterized so day boundaries can be crossed
    /// deterministically in tests.
    ///
    /// # Errors
    ///
    /// Returns an error if a store operation fails.
    pub fn check_and_reset_on(&self, user_id: &str, today: NaiveDate) -> Result<ResetOutcome> {
        let marker_key = keys::last_reset(user_id);
        let marker: Option<NaiveDate> = self.store.get(&marker_key)?;

        if marker == Some(today) {
            return Ok(ResetOutcome::skipped());
        }

        let completed_cleared = self.habits.reset_all_for_day(user_id)?;
        self.store.set(&marker_key, &today)?;

        debug!(user_id, %today, completed_cleared, "daily reset performed");
        Ok(ResetOutcome {
            performed: true,
            completed_cleared,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{Category, TimeOfDay};

    fn setup() -> (DailyResetScheduler, HabitRepository) {
        let store = Arc::new(KvStore::in_memory().unwrap());
        (
            DailyResetScheduler::new(Arc::clone(&store)),
            HabitRepository::new(store),
        )
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn first_check_writes_marker_and_performs_reset() {
        let (scheduler, _) = setup();
        let outcome = scheduler
            .check_and_reset_on("u1", date("2026-08-23"))
            .unwrap();
        assert!(outcome.performed);
        assert_eq!(outcome.completed_cleared, 0);
    }

    #[test]
    fn second_check_same_day_is_skipped() {
        let (scheduler, repo) = setup();
        let habit = repo
            .add("u1", "Read", TimeOfDay::Anytime, Category::Learning)
            .unwrap();
        repo.toggle_completion("u1", &habit.id).unwrap();

        scheduler
            .check_and_reset_on("u1", date("2026-08-23"))
            .unwrap();
        // Re-complete after the morning reset.
        repo.toggle_completion("u1", &habit.id).unwrap();

        let outcome = scheduler
            .check_and_reset_on("u1", date("2026-08-23"))
            .unwrap();
        assert!(!outcome.performed);
        assert!(repo.list_for_user("u1").unwrap()[0].completed);
    }

    #[test]
    fn double_check_same_day_leaves_list_identical() {
        let (scheduler, repo) = setup();
        repo.add("u1", "Read", TimeOfDay::Anytime, Category::Learning)
            .unwrap();

        scheduler
            .check_and_reset_on("u1", date("2026-08-23"))
            .unwrap();
        let after_first = repo.list_for_user("u1").unwrap();

        scheduler
            .check_and_reset_on("u1", date("2026-08-23"))
            .unwrap();
        let after_second = repo.list_for_user("u1").unwrap();

        assert_eq!(after_first, after_second);
    }

    #[test]
    fn next_day_clears_completion_but_not_history() {
        let (scheduler, repo) = setup();
        let habit = repo
            .add("u1", "Read", TimeOfDay::Anytime, Category::Learning)
            .unwrap();

        scheduler
            .check_and_reset_on("u1", date("2026-08-23"))
            .unwrap();
        repo.toggle_completion("u1", &habit.id).unwrap();

        let outcome = scheduler
            .check_and_reset_on("u1", date("2026-08-24"))
            .unwrap();
        assert!(outcome.performed);
        assert_eq!(outcome.completed_cleared, 1);

        let habits = repo.list_for_user("u1").unwrap();
        assert!(!habits[0].completed);
        assert_eq!(habits[0].history.len(), 1);
    }

    #[test]
    fn markers_are_per_user() {
        let (scheduler, _) = setup();
        scheduler
            .check_and_reset_on("u1", date("2026-08-23"))
            .unwrap();

        let outcome = scheduler
            .check_and_reset_on("u2", date("2026-08-23"))
            .unwrap();
        assert!(outcome.performed);
    }

    #[test]
    fn marker_is_stored_as_iso_date_string() {
        let (scheduler, _) = setup();
        scheduler
            .check_and_reset_on("u1", date("2026-08-23"))
            .unwrap();

        let raw: String = scheduler
            .store
            .get(&keys::last_reset("u1"))
            .unwrap()
            .unwrap();
        assert_eq!(raw, "2026-08-23");
    }
}
