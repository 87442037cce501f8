//! HabMate Core Library
//!
//! Local-first data layer for HabMate, a habit tracker with lightweight
//! social features. All state lives in a single string-keyed JSON store
//! (one `SQLite` file standing in for a browser storage profile); user
//! records, habit lists, the session pointer and the follow graph are all
//! documents in that one key space.
//!
//! Everything is synchronous: each operation reads, mutates and persists
//! before returning. There is no background work and no observer system —
//! callers re-render after each mutating call.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

pub mod account;
pub mod app;
pub mod habit;
pub mod id;
pub mod social;
pub mod store;

pub use app::{AppError, HabMate, Notifier, Severity, TracingNotifier};
