//! Habit list CRUD and completion tracking.
//!
//! Each user owns exactly one habit list, stored whole under a single
//! `habits_<userId>` key; every mutation is read-modify-write on that one
//! record. Reads pass through the [`RawHabit::heal`] defaulting step so
//! records from older schema versions keep working.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::error::{HabitError, Result};
use super::types::{Category, Habit, ProgressSummary, RawHabit, TimeOfDay};
use crate::id;
use crate::store::{keys, KvStore};

/// CRUD over per-user habit lists.
#[derive(Clone)]
pub struct HabitRepository {
    store: Arc<KvStore>,
}

impl HabitRepository {
    /// Creates a repository over the given store.
    #[must_use]
    pub fn new(store: Arc<KvStore>) -> Self {
        Self { store }
    }

    /// Returns the user's habits, healed.
    ///
    /// An absent list reads as empty; individual records get defaults for
    /// any missing field.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<Habit>> {
        let raw: Vec<RawHabit> = self
            .store
            .get(&keys::habits(user_id))?
            .unwrap_or_default();

        let now = Utc::now();
        Ok(raw.into_iter().map(|r| r.heal(user_id, now)).collect())
    }

    /// Appends a new habit to the user's list.
    ///
    /// # Errors
    ///
    /// Returns [`HabitError::Validation`] for an empty name, or a storage
    /// error.
    pub fn add(
        &self,
        user_id: &str,
        name: &str,
        time_of_day: TimeOfDay,
        category: Category,
    ) -> Result<Habit> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HabitError::Validation(
                "habit name must not be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let habit = Habit {
            id: id::new_id(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            time_of_day,
            category,
            completed: false,
            created_at: now,
            last_updated: now,
            history: Vec::new(),
        };

        let mut habits = self.list_for_user(user_id)?;
        habits.push(habit.clone());
        self.save_list(user_id, &habits)?;

        debug!(user_id, habit_id = %habit.id, "added habit");
        Ok(habit)
    }

    /// Flips a habit's completion flag.
    ///
    /// Completing appends the current timestamp to the habit's history;
    /// un-completing does NOT remove it — history only grows.
    ///
    /// # Errors
    ///
    /// Returns [`HabitError::NotFound`] if the habit is not in the user's
    /// list, or a storage error.
    pub fn toggle_completion(&self, user_id: &str, habit_id: &str) -> Result<Habit> {
        let mut habits = self.list_for_user(user_id)?;
        let habit = habits
            .iter_mut()
            .find(|h| h.id == habit_id)
            .ok_or_else(|| HabitError::NotFound(habit_id.to_string()))?;

        let now = Utc::now();
        habit.completed = !habit.completed;
        habit.last_updated = now;
        if habit.completed {
            habit.history.push(now);
        }
        let updated = habit.clone();

        self.save_list(user_id, &habits)?;
        Ok(updated)
    }

    /// Removes a habit from the user's list.
    ///
    /// # Errors
    ///
    /// Returns [`HabitError::NotFound`] if the habit is not in the user's
    /// list, or a storage error.
    pub fn remove(&self, user_id: &str, habit_id: &str) -> Result<()> {
        let mut habits = self.list_for_user(user_id)?;
        let before = habits.len();
        habits.retain(|h| h.id != habit_id);
        if habits.len() == before {
            return Err(HabitError::NotFound(habit_id.to_string()));
        }

        self.save_list(user_id, &habits)?;
        debug!(user_id, habit_id, "removed habit");
        Ok(())
    }

    /// Clears every habit's completion flag for a new day.
    ///
    /// Bumps `last_updated` on each habit, leaves `history` untouched, and
    /// returns how many habits had been completed (so callers can decide
    /// whether a "new day" notice is worth showing). An empty list is left
    /// as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if a store operation fails.
    pub fn reset_all_for_day(&self, user_id: &str) -> Result<usize> {
        let mut habits = self.list_for_user(user_id)?;
        if habits.is_empty() {
            return Ok(0);
        }

        let was_completed = habits.iter().filter(|h| h.completed).count();
        let now = Utc::now();
        for habit in &mut habits {
            habit.completed = false;
            habit.last_updated = now;
        }

        self.save_list(user_id, &habits)?;
        debug!(user_id, cleared = was_completed, "reset habits for new day");
        Ok(was_completed)
    }

    /// Returns the completion summary for the user's list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn progress_for_user(&self, user_id: &str) -> Result<ProgressSummary> {
        Ok(ProgressSummary::of(&self.list_for_user(user_id)?))
    }

    fn save_list(&self, user_id: &str, habits: &[Habit]) -> Result<()> {
        Ok(self.store.set(&keys::habits(user_id), &habits)?)
    }
}
