//! In-memory persistence - used when no database is configured, and in tests.
//!
//! Both repositories share one [`InMemoryStore`] so that deleting a user can
//! cascade to their posts. Data is lost on process restart.

mod store;

pub use store::{InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};
