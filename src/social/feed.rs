//! Community feed: followed users' daily progress.

use std::sync::Arc;

use super::error::Result;
use super::graph::SocialGraph;
use crate::account::User;
use crate::habit::{Habit, HabitRepository, ProgressSummary};
use crate::store::KvStore;

/// Maximum habits shown per feed entry; the rest is a count.
pub const HABIT_PREVIEW_LIMIT: usize = 5;

/// A single habit line in a feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitPreview {
    /// Habit name.
    pub name: String,
    /// Whether it is done today.
    pub completed: bool,
}

/// One followed user's progress card.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    /// Followed user's id.
    pub user_id: String,
    /// Followed user's username.
    pub username: String,
    /// Followed user's email.
    pub email: String,
    /// Today's completion summary.
    pub progress: ProgressSummary,
    /// Up to [`HABIT_PREVIEW_LIMIT`] habits.
    pub habits: Vec<HabitPreview>,
    /// How many habits were cut off by the preview limit.
    pub more_habits: usize,
}

impl FeedEntry {
    fn build(user: User, habits: &[Habit]) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            email: user.email,
            progress: ProgressSummary::of(habits),
            habits: habits
                .iter()
                .take(HABIT_PREVIEW_LIMIT)
                .map(|h| HabitPreview {
                    name: h.name.clone(),
                    completed: h.completed,
                })
                .collect(),
            more_habits: habits.len().saturating_sub(HABIT_PREVIEW_LIMIT),
        }
    }
}

/// Builds feed entries from the graph and habit lists.
#[derive(Clone)]
pub struct CommunityFeed {
    graph: SocialGraph,
    habits: HabitRepository,
}

impl CommunityFeed {
    /// Creates a feed over the given store.
    #[must_use]
    pub fn new(store: Arc<KvStore>) -> Self {
        Self {
            graph: SocialGraph::new(Arc::clone(&store)),
            habits: HabitRepository::new(store),
        }
    }

    /// Returns one entry per user `user_id` follows, in follow order.
    ///
    /// # Errors
    ///
    /// Returns [`super::SocialError::NotFound`] when `user_id` is missing,
    /// or a storage error.
    pub fn feed_for(&self, user_id: &str) -> Result<Vec<FeedEntry>> {
        let following = self.graph.following_of(user_id)?;
        let mut entries = Vec::with_capacity(following.len());
        for user in following {
            let habits = self.habits.list_for_user(&user.id)?;
            entries.push(FeedEntry::build(user, &habits));
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::UserDirectory;
    use crate::habit::{Category, TimeOfDay};
    use crate::store::KvStore;

    struct Fixture {
        feed: CommunityFeed,
        graph: SocialGraph,
        habits: HabitRepository,
        alice: User,
        bob: User,
    }

    fn setup() -> Fixture {
        let store = Arc::new(KvStore::in_memory().unwrap());
        let users = UserDirectory::new(Arc::clone(&store));
        let alice = users.register("alice", "alice@x.com", "secret1").unwrap();
        let bob = users.register("bob", "bob@x.com", "secret2").unwrap();
        Fixture {
            feed: CommunityFeed::new(Arc::clone(&store)),
            graph: SocialGraph::new(Arc::clone(&store)),
            habits: HabitRepository::new(store),
            alice,
            bob,
        }
    }

    #[test]
    fn feed_is_empty_when_following_nobody() {
        let f = setup();
        assert!(f.feed.feed_for(&f.alice.id).unwrap().is_empty());
    }

    #[test]
    fn feed_shows_followed_users_progress() {
        let f = setup();
        f.graph.follow(&f.alice.id, &f.bob.id).unwrap();
        let habit = f
            .habits
            .add(&f.bob.id, "Run", TimeOfDay::Morning, Category::Health)
            .unwrap();
        f.habits
            .add(&f.bob.id, "Read", TimeOfDay::Evening, Category::Learning)
            .unwrap();
        f.habits.toggle_completion(&f.bob.id, &habit.id).unwrap();

        let entries = f.feed.feed_for(&f.alice.id).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.username, "bob");
        assert_eq!(entry.progress.completed, 1);
        assert_eq!(entry.progress.total, 2);
        assert_eq!(entry.progress.percent, 50);
        assert_eq!(entry.habits.len(), 2);
        assert_eq!(entry.more_habits, 0);
    }

    #[test]
    fn feed_previews_at_most_five_habits() {
        let f = setup();
        f.graph.follow(&f.alice.id, &f.bob.id).unwrap();
        for i in 0..7 {
            f.habits
                .add(
                    &f.bob.id,
                    &format!("Habit {i}"),
                    TimeOfDay::Anytime,
                    Category::Other,
                )
                .unwrap();
        }

        let entries = f.feed.feed_for(&f.alice.id).unwrap();
        assert_eq!(entries[0].habits.len(), HABIT_PREVIEW_LIMIT);
        assert_eq!(entries[0].more_habits, 2);
    }

    #[test]
    fn feed_entry_for_user_without_habits() {
        let f = setup();
        f.graph.follow(&f.alice.id, &f.bob.id).unwrap();

        let entries = f.feed.feed_for(&f.alice.id).unwrap();
        assert_eq!(entries[0].progress.total, 0);
        assert_eq!(entries[0].progress.percent, 0);
        assert!(entries[0].habits.is_empty());
    }
}
