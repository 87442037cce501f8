//! Follow/unfollow over adjacency lists embedded in user records.
//!
//! A follow edge lives in two places: `target_id` in the follower's
//! `following` list and `follower_id` in the target's `followers` list. Both
//! records are persisted in one store transaction, so the symmetry invariant
//! cannot be broken by a failure between the two writes.

use std::sync::Arc;

use tracing::debug;

use super::error::{Result, SocialError};
use crate::account::{User, UserDirectory};
use crate::store::{keys, KvStore};

/// Maintains the symmetric following/followers relation.
#[derive(Clone)]
pub struct SocialGraph {
    store: Arc<KvStore>,
    users: UserDirectory,
}

impl SocialGraph {
    /// Creates a graph over the given store.
    #[must_use]
    pub fn new(store: Arc<KvStore>) -> Self {
        Self {
            users: UserDirectory::new(Arc::clone(&store)),
            store,
        }
    }

    /// Adds a follow edge from `follower_id` to `target_id`.
    ///
    /// Following a user twice is a success no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::SelfFollow`] when the ids match,
    /// [`SocialError::NotFound`] when either user is missing, or a storage
    /// error.
    pub fn follow(&self, follower_id: &str, target_id: &str) -> Result<()> {
        if follower_id == target_id {
            return Err(SocialError::SelfFollow);
        }

        let (mut follower, mut target) = self.load_pair(follower_id, target_id)?;
        if follower.is_following(target_id) {
            return Ok(());
        }

        follower.following.push(target_id.to_string());
        target.followers.push(follower_id.to_string());
        self.save_pair(&follower, &target)?;

        debug!(follower_id, target_id, "follow edge added");
        Ok(())
    }

    /// Removes the follow edge from `follower_id` to `target_id`.
    ///
    /// Unfollowing a user who is not followed is a success no-op; since no
    /// user can follow themselves, that covers `follower_id == target_id`
    /// too.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::NotFound`] when either user is missing, or a
    /// storage error.
    pub fn unfollow(&self, follower_id: &str, target_id: &str) -> Result<()> {
        let (mut follower, mut target) = self.load_pair(follower_id, target_id)?;
        if !follower.is_following(target_id) {
            return Ok(());
        }

        follower.following.retain(|id| id != target_id);
        target.followers.retain(|id| id != follower_id);
        self.save_pair(&follower, &target)?;

        debug!(follower_id, target_id, "follow edge removed");
        Ok(())
    }

    /// Resolves the users `user_id` follows.
    ///
    /// Ids that no longer resolve to a record are silently dropped rather
    /// than failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::NotFound`] when `user_id` itself is missing,
    /// or a storage error.
    pub fn following_of(&self, user_id: &str) -> Result<Vec<User>> {
        let user = self.require(user_id)?;
        self.resolve(&user.following)
    }

    /// Resolves the users following `user_id`.
    ///
    /// Dangling ids are dropped, as in [`SocialGraph::following_of`].
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::NotFound`] when `user_id` itself is missing,
    /// or a storage error.
    pub fn followers_of(&self, user_id: &str) -> Result<Vec<User>> {
        let user = self.require(user_id)?;
        self.resolve(&user.followers)
    }

    /// Searches users by username or email substring, case-insensitively.
    ///
    /// The searching user is excluded from results. A blank query matches
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the store scan fails.
    pub fn search_users(&self, query: &str, searcher_id: &str) -> Result<Vec<User>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .users
            .all_users()?
            .into_iter()
            .filter(|u| u.id != searcher_id)
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
            })
            .collect())
    }

    fn require(&self, user_id: &str) -> Result<User> {
        self.users
            .find_by_id(user_id)?
            .ok_or_else(|| SocialError::NotFound(user_id.to_string()))
    }

    fn load_pair(&self, follower_id: &str, target_id: &str) -> Result<(User, User)> {
        Ok((self.require(follower_id)?, self.require(target_id)?))
    }

    fn save_pair(&self, follower: &User, target: &User) -> Result<()> {
        self.store.set_many(&[
            (keys::user(&follower.id), follower),
            (keys::user(&target.id), target),
        ])?;
        Ok(())
    }

    fn resolve(&self, ids: &[String]) -> Result<Vec<User>> {
        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(user) = self.users.find_by_id(id)? {
                users.push(user);
            }
        }
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (SocialGraph, UserDirectory, User, User) {
        let store = Arc::new(KvStore::in_memory().unwrap());
        let users = UserDirectory::new(Arc::clone(&store));
        let alice = users.register("alice", "alice@x.com", "secret1").unwrap();
        let bob = users.register("bob", "bob@x.com", "secret2").unwrap();
        (SocialGraph::new(store), users, alice, bob)
    }

    #[test]
    fn follow_updates_both_sides() {
        let (graph, users, alice, bob) = setup();
        graph.follow(&alice.id, &bob.id).unwrap();

        let alice = users.find_by_id(&alice.id).unwrap().unwrap();
        let bob = users.find_by_id(&bob.id).unwrap().unwrap();
        assert!(alice.following.contains(&bob.id));
        assert!(bob.followers.contains(&alice.id));
    }

    #[test]
    fn follow_shows_up_in_following_of() {
        let (graph, _, alice, bob) = setup();
        graph.follow(&alice.id, &bob.id).unwrap();

        let following = graph.following_of(&alice.id).unwrap();
        assert_eq!(following.len(), 1);
        assert_eq!(following[0].id, bob.id);
    }

    #[test]
    fn follow_twice_is_a_no_op() {
        let (graph, users, alice, bob) = setup();
        graph.follow(&alice.id, &bob.id).unwrap();
        graph.follow(&alice.id, &bob.id).unwrap();

        let alice = users.find_by_id(&alice.id).unwrap().unwrap();
        assert_eq!(alice.following.len(), 1);
    }

    #[test]
    fn self_follow_is_rejected() {
        let (graph, _, alice, _) = setup();
        let result = graph.follow(&alice.id, &alice.id);
        assert!(matches!(result, Err(SocialError::SelfFollow)));
    }

    #[test]
    fn follow_unknown_target_is_not_found() {
        let (graph, _, alice, _) = setup();
        let result = graph.follow(&alice.id, "ghost");
        assert!(matches!(result, Err(SocialError::NotFound(_))));
    }

    #[test]
    fn unfollow_removes_both_sides() {
        let (graph, users, alice, bob) = setup();
        graph.follow(&alice.id, &bob.id).unwrap();
        graph.unfollow(&alice.id, &bob.id).unwrap();

        let alice = users.find_by_id(&alice.id).unwrap().unwrap();
        let bob = users.find_by_id(&bob.id).unwrap().unwrap();
        assert!(alice.following.is_empty());
        assert!(bob.followers.is_empty());
    }

    #[test]
    fn unfollow_when_not_following_is_a_no_op() {
        let (graph, _, alice, bob) = setup();
        graph.unfollow(&alice.id, &bob.id).unwrap();
        assert!(graph.following_of(&alice.id).unwrap().is_empty());
    }

    #[test]
    fn unfollow_self_is_a_no_op() {
        let (graph, users, alice, _) = setup();
        graph.unfollow(&alice.id, &alice.id).unwrap();

        let alice = users.find_by_id(&alice.id).unwrap().unwrap();
        assert!(alice.following.is_empty());
        assert!(alice.followers.is_empty());
    }

    #[test]
    fn following_of_drops_dangling_ids() {
        let (graph, users, mut alice, bob) = setup();
        graph.follow(&alice.id, &bob.id).unwrap();

        // Plant a dangling id alongside the real one.
        alice = users.find_by_id(&alice.id).unwrap().unwrap();
        alice.following.push("ghost".to_string());
        users.save(&alice).unwrap();

        let following = graph.following_of(&alice.id).unwrap();
        assert_eq!(following.len(), 1);
        assert_eq!(following[0].id, bob.id);
    }

    #[test]
    fn search_matches_username_case_insensitively() {
        let (graph, _, alice, bob) = setup();
        let results = graph.search_users("BOB", &alice.id).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, bob.id);
    }

    #[test]
    fn search_matches_email_substring() {
        let (graph, _, alice, _) = setup();
        let results = graph.search_users("bob@", &alice.id).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn search_excludes_the_searcher() {
        let (graph, _, alice, _) = setup();
        // Both emails contain "x.com"; only bob should come back.
        let results = graph.search_users("x.com", &alice.id).unwrap();
        assert_eq!(results.len(), 1);
        assert_ne!(results[0].id, alice.id);
    }

    #[test]
    fn blank_search_matches_nothing() {
        let (graph, _, alice, _) = setup();
        assert!(graph.search_users("   ", &alice.id).unwrap().is_empty());
    }
}
