//! High-level application API.
//!
//! [`HabMate`] wires the entity layers over one shared store and drives the
//! flows a rendering layer calls into: register/login/logout, habit CRUD for
//! the current user, follow/unfollow with the mandatory session re-sync, and
//! the community feed. Every mutating flow reports its outcome through the
//! [`Notifier`], mirroring the original app's toast messages.
//!
//! # Example
//!
//! ```
//! use habmate_core::HabMate;
//!
//! let app = HabMate::in_memory().expect("store");
//! let user = app.register("alice", "alice@x.com", "secret1").expect("register");
//! app.add_habit("Drink water", Default::default(), Default::default()).expect("add");
//! assert_eq!(app.progress().expect("progress").total, 1);
//! # let _ = user;
//! ```

mod error;
mod notify;

use std::path::Path;
use std::sync::Arc;

use crate::account::{SessionManager, User, UserDirectory};
use crate::habit::{
    Category, DailyResetScheduler, Habit, HabitRepository, ProgressSummary, TimeOfDay,
};
use crate::social::{CommunityFeed, FeedEntry, SocialGraph};
use crate::store::KvStore;

pub use error::{AppError, Result};
pub use notify::{Notifier, Severity, TracingNotifier};

/// The assembled habit tracker.
pub struct HabMate {
    users: UserDirectory,
    habits: HabitRepository,
    graph: SocialGraph,
    feed: CommunityFeed,
    scheduler: DailyResetScheduler,
    session: SessionManager,
    notifier: Box<dyn Notifier>,
}

impl HabMate {
    /// Opens (or creates) the app over a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::build(KvStore::open(path)?, Box::new(TracingNotifier)))
    }

    /// Creates an app over an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        Ok(Self::build(
            KvStore::in_memory()?,
            Box::new(TracingNotifier),
        ))
    }

    /// Replaces the notifier, builder-style.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    fn build(store: KvStore, notifier: Box<dyn Notifier>) -> Self {
        let store = Arc::new(store);
        Self {
            users: UserDirectory::new(Arc::clone(&store)),
            habits: HabitRepository::new(Arc::clone(&store)),
            graph: SocialGraph::new(Arc::clone(&store)),
            feed: CommunityFeed::new(Arc::clone(&store)),
            scheduler: DailyResetScheduler::new(Arc::clone(&store)),
            session: SessionManager::new(store),
            notifier,
        }
    }

    // ==================== Accounts & session ====================

    /// Registers a new user and logs them in.
    ///
    /// # Errors
    ///
    /// Returns validation/conflict errors from the directory or a storage
    /// error; failures are also reported through the notifier.
    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let user = self.report_err(self.users.register(username, email, password))?;
        self.session.login(&user)?;
        self.notifier
            .notify("Account created successfully!", Severity::Success);
        Ok(user)
    }

    /// Authenticates, starts a session and runs the daily reset check.
    ///
    /// # Errors
    ///
    /// Returns authentication errors from the directory or a storage error;
    /// failures are also reported through the notifier.
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = self.report_err(self.users.authenticate(email, password))?;
        self.session.login(&user)?;

        let outcome = self.scheduler.check_and_reset(&user.id)?;
        if outcome.performed && outcome.completed_cleared > 0 {
            self.notifier.notify(
                "A new day has started! All habits have been reset.",
                Severity::Info,
            );
        }

        self.notifier
            .notify(&format!("Welcome back, {}!", user.username), Severity::Success);
        Ok(user)
    }

    /// Ends the current session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn logout(&self) -> Result<()> {
        self.session.logout()?;
        self.notifier
            .notify("You have been logged out", Severity::Info);
        Ok(())
    }

    /// Returns the session's copy of the current user, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn current_user(&self) -> Result<Option<User>> {
        Ok(self.session.current()?)
    }

    // ==================== Habits ====================

    /// Adds a habit for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotLoggedIn`] without a session, a validation
    /// error for an empty name, or a storage error.
    pub fn add_habit(
        &self,
        name: &str,
        time_of_day: TimeOfDay,
        category: Category,
    ) -> Result<Habit> {
        let user = self.session_user()?;
        let habit = self.report_err(self.habits.add(&user.id, name, time_of_day, category))?;
        self.notifier
            .notify("Habit added successfully!", Severity::Success);
        Ok(habit)
    }

    /// Lists the current user's habits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotLoggedIn`] without a session, or a storage
    /// error.
    pub fn list_habits(&self) -> Result<Vec<Habit>> {
        let user = self.session_user()?;
        Ok(self.habits.list_for_user(&user.id)?)
    }

    /// Toggles a habit's completion for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotLoggedIn`] without a session,
    /// a not-found error for an unknown habit id, or a storage error.
    pub fn toggle_habit(&self, habit_id: &str) -> Result<Habit> {
        let user = self.session_user()?;
        let habit = self.report_err(self.habits.toggle_completion(&user.id, habit_id))?;

        let status = if habit.completed {
            "completed"
        } else {
            "marked as pending"
        };
        self.notifier.notify(
            &format!("Habit \"{}\" {status}!", habit.name),
            Severity::Success,
        );
        Ok(habit)
    }

    /// Deletes a habit for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotLoggedIn`] without a session,
    /// a not-found error for an unknown habit id, or a storage error.
    pub fn delete_habit(&self, habit_id: &str) -> Result<()> {
        let user = self.session_user()?;
        self.report_err(self.habits.remove(&user.id, habit_id))?;
        self.notifier
            .notify("Habit deleted successfully", Severity::Info);
        Ok(())
    }

    /// Returns today's completion summary for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotLoggedIn`] without a session, or a storage
    /// error.
    pub fn progress(&self) -> Result<ProgressSummary> {
        let user = self.session_user()?;
        Ok(self.habits.progress_for_user(&user.id)?)
    }

    // ==================== Social ====================

    /// Follows `target_id` as the current user and re-syncs the session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotLoggedIn`] without a session, self-follow or
    /// not-found errors from the graph, or a storage error.
    pub fn follow(&self, target_id: &str) -> Result<()> {
        let user = self.session_user()?;
        let target = self.require_user(target_id)?;

        self.report_err(self.graph.follow(&user.id, target_id))?;
        self.session.refresh()?;
        self.notifier.notify(
            &format!("You are now following {}", target.username),
            Severity::Success,
        );
        Ok(())
    }

    /// Unfollows `target_id` as the current user and re-syncs the session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotLoggedIn`] without a session, not-found errors
    /// from the graph, or a storage error.
    pub fn unfollow(&self, target_id: &str) -> Result<()> {
        let user = self.session_user()?;
        let target = self.require_user(target_id)?;

        self.report_err(self.graph.unfollow(&user.id, target_id))?;
        self.session.refresh()?;
        self.notifier.notify(
            &format!("You unfollowed {}", target.username),
            Severity::Info,
        );
        Ok(())
    }

    /// Searches other users by username or email substring.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotLoggedIn`] without a session, or a storage
    /// error.
    pub fn search_users(&self, query: &str) -> Result<Vec<User>> {
        let user = self.session_user()?;
        Ok(self.graph.search_users(query, &user.id)?)
    }

    /// Returns the community feed for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotLoggedIn`] without a session, or a storage
    /// error.
    pub fn feed(&self) -> Result<Vec<FeedEntry>> {
        let user = self.session_user()?;
        Ok(self.feed.feed_for(&user.id)?)
    }

    // ==================== Helpers ====================

    fn session_user(&self) -> Result<User> {
        self.session.current()?.ok_or(AppError::NotLoggedIn)
    }

    fn require_user(&self, user_id: &str) -> Result<User> {
        Ok(self
            .users
            .find_by_id(user_id)?
            .ok_or_else(|| crate::social::SocialError::NotFound(user_id.to_string()))?)
    }

    fn report_err<T, E>(&self, result: std::result::Result<T, E>) -> std::result::Result<T, E>
    where
        E: std::fmt::Display,
    {
        if let Err(e) = &result {
            self.notifier.notify(&e.to_string(), Severity::Error);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::DEMO_EMAIL;

    fn app() -> HabMate {
        HabMate::in_memory().unwrap()
    }

    #[test]
    fn register_logs_the_user_in() {
        let app = app();
        let user = app.register("alice", "alice@x.com", "secret1").unwrap();
        let current = app.current_user().unwrap().unwrap();
        assert_eq!(current.id, user.id);
    }

    #[test]
    fn logout_clears_the_session() {
        let app = app();
        app.register("alice", "alice@x.com", "secret1").unwrap();
        app.logout().unwrap();
        assert!(app.current_user().unwrap().is_none());
    }

    #[test]
    fn habit_ops_require_a_session() {
        let app = app();
        let result = app.add_habit("Read", TimeOfDay::Anytime, Category::Learning);
        assert!(matches!(result, Err(AppError::NotLoggedIn)));
    }

    #[test]
    fn add_toggle_and_progress_flow() {
        let app = app();
        app.register("alice", "alice@x.com", "secret1").unwrap();

        let habit = app
            .add_habit("Drink water", TimeOfDay::Anytime, Category::Health)
            .unwrap();
        app.toggle_habit(&habit.id).unwrap();

        let progress = app.progress().unwrap();
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 1);
        assert_eq!(progress.percent, 100);
    }

    #[test]
    fn follow_re_syncs_the_session_copy() {
        let app = app();
        let bob = app.register("bob", "bob@x.com", "secret2").unwrap();
        app.logout().unwrap();
        app.register("alice", "alice@x.com", "secret1").unwrap();

        app.follow(&bob.id).unwrap();

        let session_copy = app.current_user().unwrap().unwrap();
        assert!(session_copy.is_following(&bob.id));
    }

    #[test]
    fn demo_login_works_out_of_the_box() {
        let app = app();
        let user = app.login(DEMO_EMAIL, "whatever").unwrap();
        assert_eq!(user.username, "Demo User");
        assert_eq!(app.list_habits().unwrap().len(), 3);
    }

    #[test]
    fn feed_reflects_followed_users() {
        let app = app();
        let bob = app.register("bob", "bob@x.com", "secret2").unwrap();
        app.add_habit("Run", TimeOfDay::Morning, Category::Health)
            .unwrap();
        app.logout().unwrap();

        app.register("alice", "alice@x.com", "secret1").unwrap();
        app.follow(&bob.id).unwrap();

        let feed = app.feed().unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].username, "bob");
        assert_eq!(feed[0].progress.total, 1);
    }

    #[test]
    fn search_excludes_current_user() {
        let app = app();
        app.register("bob", "bob@x.com", "secret2").unwrap();
        app.logout().unwrap();
        app.register("alice", "alice@x.com", "secret1").unwrap();

        let results = app.search_users("x.com").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].username, "bob");
    }
}
