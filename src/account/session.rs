//! Session state: the current-user pointer.
//!
//! The session holds a full denormalized *copy* of the user record under the
//! `currentUser` key, not a live reference. Any mutation of the underlying
//! `user_<id>` record (a follow, for instance) leaves the session stale until
//! [`SessionManager::refresh`] re-reads it; callers that mutate the record
//! are expected to refresh afterwards.

use std::sync::Arc;

use tracing::debug;

use super::directory::UserDirectory;
use super::error::Result;
use super::types::User;
use crate::store::{keys, KvStore};

/// Tracks the currently authenticated user.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<KvStore>,
}

impl SessionManager {
    /// Creates a session manager over the given store.
    #[must_use]
    pub fn new(store: Arc<KvStore>) -> Self {
        Self { store }
    }

    /// Stores a copy of `user` as the current session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn login(&self, user: &User) -> Result<()> {
        self.store.set(keys::CURRENT_USER, user)?;
        debug!(user_id = %user.id, "session started");
        Ok(())
    }

    /// Clears the current session.
    ///
    /// Logging out with no active session succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn logout(&self) -> Result<()> {
        self.store.remove(keys::CURRENT_USER)?;
        debug!("session cleared");
        Ok(())
    }

    /// Returns the session's copy of the current user, if logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn current(&self) -> Result<Option<User>> {
        Ok(self.store.get(keys::CURRENT_USER)?)
    }

    /// Re-reads the persisted user record and rewrites the session copy.
    ///
    /// Returns the refreshed user, or `None` when there is no session or the
    /// underlying record has disappeared (the stale copy is left in place in
    /// that case).
    ///
    /// # Errors
    ///
    /// Returns an error if a store operation fails.
    pub fn refresh(&self) -> Result<Option<User>> {
        let Some(session) = self.current()? else {
            return Ok(None);
        };
        let directory = UserDirectory::new(Arc::clone(&self.store));
        let Some(fresh) = directory.find_by_id(&session.id)? else {
            return Ok(None);
        };
        self.login(&fresh)?;
        Ok(Some(fresh))
    }
}
