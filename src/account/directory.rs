//! User directory: registration, authentication and lookups.
//!
//! Users are stored one record per `user_<id>` key; "all users" queries are
//! built from the store's prefix scan. That keeps every lookup O(n), which
//! is fine for a single local profile but means email/username uniqueness is
//! enforced by scan-then-write rather than by an index.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use super::error::{AccountError, Result};
use super::types::User;
use crate::habit::{Category, Habit, TimeOfDay};
use crate::id;
use crate::store::{keys, KvStore, StoreError};

/// Sentinel email that provisions and logs into the shared demo account.
pub const DEMO_EMAIL: &str = "demo@habmate.com";

/// Fixed id of the demo account.
pub const DEMO_USER_ID: &str = "demo_user";

const DEMO_USERNAME: &str = "Demo User";
const DEMO_PASSWORD: &str = "demo123";

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// CRUD over user records.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<KvStore>,
}

impl UserDirectory {
    /// Creates a directory over the given store.
    #[must_use]
    pub fn new(store: Arc<KvStore>) -> Self {
        Self { store }
    }

    /// Registers a new user.
    ///
    /// Inputs are trimmed. Email and username uniqueness is case-sensitive
    /// exact matching against every stored user. On success the user record
    /// is persisted along with an empty habit list.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Validation`] for empty fields or a short
    /// password, [`AccountError::EmailTaken`] / [`AccountError::UsernameTaken`]
    /// on conflicts, or a storage error.
    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let username = username.trim();
        let email = email.trim();
        let password = password.trim();

        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AccountError::Validation(
                "username, email and password are required".to_string(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AccountError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let existing = self.all_users()?;
        if existing.iter().any(|u| u.email == email) {
            return Err(AccountError::EmailTaken(email.to_string()));
        }
        if existing.iter().any(|u| u.username == username) {
            return Err(AccountError::UsernameTaken(username.to_string()));
        }

        let user = User::new(username, email, password);
        self.save(&user)?;
        self.store
            .set(&keys::habits(&user.id), &Vec::<Habit>::new())?;

        debug!(user_id = %user.id, "registered user");
        Ok(user)
    }

    /// Authenticates a user by email and password.
    ///
    /// The sentinel [`DEMO_EMAIL`] bypasses credential checks: the demo
    /// account (and its seed habits) is provisioned on first use and reused
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if no user has this email,
    /// [`AccountError::WrongPassword`] on a credential mismatch, or a
    /// storage error.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        if email == DEMO_EMAIL {
            return self.ensure_demo_account();
        }

        let user = self
            .find_by_email(email)?
            .ok_or_else(|| AccountError::NotFound(email.to_string()))?;
        if !user.password.verify(password.trim()) {
            return Err(AccountError::WrongPassword);
        }
        Ok(user)
    }

    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.store.get(&keys::user(user_id))?)
    }

    /// Looks up a user by exact email.
    ///
    /// # Errors
    ///
    /// Returns an error if the store scan fails.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.all_users()?.into_iter().find(|u| u.email == email))
    }

    /// Looks up a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns an error if the store scan fails.
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .all_users()?
            .into_iter()
            .find(|u| u.username == username))
    }

    /// Returns every stored user.
    ///
    /// Corrupt user records are skipped (with a diagnostic) rather than
    /// failing the whole scan, so one bad record cannot lock everyone out.
    ///
    /// # Errors
    ///
    /// Returns an error if the store scan fails.
    pub fn all_users(&self) -> Result<Vec<User>> {
        let mut users = Vec::new();
        for key in self.store.keys_with_prefix(keys::USER_PREFIX)? {
            match self.store.get::<User>(&key) {
                Ok(Some(user)) => users.push(user),
                Ok(None) => {}
                Err(StoreError::Corrupt { .. }) => {
                    warn!(key, "skipping corrupt user record");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(users)
    }

    /// Upserts a user record by id.
    ///
    /// Used for profile updates and by the social graph when adjacency
    /// lists change.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn save(&self, user: &User) -> Result<()> {
        Ok(self.store.set(&keys::user(&user.id), user)?)
    }

    /// Provisions the demo account if absent and returns it.
    fn ensure_demo_account(&self) -> Result<User> {
        if let Some(existing) = self.find_by_id(DEMO_USER_ID)? {
            return Ok(existing);
        }

        let mut user = User::new(DEMO_USERNAME, DEMO_EMAIL, DEMO_PASSWORD);
        user.id = DEMO_USER_ID.to_string();
        self.save(&user)?;
        self.store
            .set(&keys::habits(DEMO_USER_ID), &demo_habits())?;

        debug!("provisioned demo account");
        Ok(user)
    }
}

fn demo_habits() -> Vec<Habit> {
    let now = Utc::now();
    let habit = |name: &str, time_of_day, category, completed| Habit {
        id: id::new_id(),
        user_id: DEMO_USER_ID.to_string(),
        name: name.to_string(),
        time_of_day,
        category,
        completed,
        created_at: now,
        last_updated: now,
        history: Vec::new(),
    };

    vec![
        habit(
            "Drink 8 glasses of water",
            TimeOfDay::Anytime,
            Category::Health,
            false,
        ),
        habit(
            "30 minutes of exercise",
            TimeOfDay::Morning,
            Category::Health,
            true,
        ),
        habit("Read 20 pages", TimeOfDay::Evening, Category::Learning, false),
    ]
}
