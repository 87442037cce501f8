//! Social features: follow graph, user search and the community feed.
//!
//! # Architecture
//!
//! ```text
//! SocialGraph (symmetric adjacency lists in user records)
//!     └── KvStore::set_many (both sides of an edge in one transaction)
//! CommunityFeed (graph × habit lists → progress cards)
//! ```
//!
//! # Types
//!
//! - [`SocialGraph`]: follow/unfollow and resolution of adjacency lists
//! - [`CommunityFeed`] / [`FeedEntry`]: followed users' daily progress

mod error;
mod feed;
mod graph;

pub use error::{Result, SocialError};
pub use feed::{CommunityFeed, FeedEntry, HabitPreview, HABIT_PREVIEW_LIMIT};
pub use graph::SocialGraph;
