//! User accounts: records, registration, authentication and session state.
//!
//! # Architecture
//!
//! ```text
//! UserDirectory (CRUD + uniqueness over user_<id> records)
//!     └── KvStore (prefix scan for "all users")
//! SessionManager (denormalized currentUser copy)
//! ```
//!
//! Passwords are stored as salted digests (see [`password`]); the original
//! plaintext scheme is deliberately not reproduced.
//!
//! # Types
//!
//! - [`User`]: a registered user with embedded social adjacency lists
//! - [`UserDirectory`]: registration, authentication and lookups
//! - [`SessionManager`]: the current-user pointer

mod directory;
mod error;
mod password;
mod session;
pub mod types;

pub use directory::{UserDirectory, DEMO_EMAIL, DEMO_USER_ID, MIN_PASSWORD_LEN};
pub use error::{AccountError, Result};
pub use password::PasswordHash;
pub use session::SessionManager;
pub use types::User;
