//! User record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::password::PasswordHash;
use crate::id;

/// A registered user.
///
/// Field names serialize in the persisted `camelCase` layout
/// (`user_<id>` keys). The `followers`/`following` adjacency lists embed
/// the social graph directly in the record; the symmetry invariant
/// (`b ∈ a.following ⟺ a ∈ b.followers`) is maintained by the graph layer's
/// transactional dual-record writes.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: String,
    /// Unique display name.
    pub username: String,
    /// Unique email address; the login key. Matched case-sensitively.
    pub email: String,
    /// Salted password digest.
    pub password: PasswordHash,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Ids of users following this user.
    #[serde(default)]
    pub followers: Vec<String>,
    /// Ids of users this user follows.
    #[serde(default)]
    pub following: Vec<String>,
}

impl User {
    /// Creates a new user record with a fresh id and hashed password.
    #[must_use]
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            id: id::new_id(),
            username: username.to_string(),
            email: email.to_string(),
            password: PasswordHash::new(password),
            created_at: Utc::now(),
            followers: Vec::new(),
            following: Vec::new(),
        }
    }

    /// Returns whether this user follows `target_id`.
    #[must_use]
    pub fn is_following(&self, target_id: &str) -> bool {
        self.following.iter().any(|id| id == target_id)
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("followers", &self.followers)
            .field("following", &self.following)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_unique_ids() {
        let a = User::new("alice", "alice@x.com", "secret1");
        let b = User::new("bob", "bob@x.com", "secret2");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn new_starts_with_empty_social_lists() {
        let user = User::new("alice", "alice@x.com", "secret1");
        assert!(user.followers.is_empty());
        assert!(user.following.is_empty());
    }

    #[test]
    fn is_following_checks_adjacency_list() {
        let mut user = User::new("alice", "alice@x.com", "secret1");
        assert!(!user.is_following("bob-id"));
        user.following.push("bob-id".to_string());
        assert!(user.is_following("bob-id"));
    }

    #[test]
    fn serializes_in_camel_case_layout() {
        let user = User::new("alice", "alice@x.com", "secret1");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("followers").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn deserializes_record_without_social_lists() {
        // Records written before the social feature lack both lists.
        let json = r#"{
            "id": "u1",
            "username": "alice",
            "email": "alice@x.com",
            "password": "00$00",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.followers.is_empty());
        assert!(user.following.is_empty());
    }

    #[test]
    fn debug_redacts_password() {
        let user = User::new("alice", "alice@x.com", "secret1");
        let debug_str = format!("{user:?}");
        assert!(debug_str.contains("<redacted>"));
        assert!(!debug_str.contains("secret1"));
    }
}
