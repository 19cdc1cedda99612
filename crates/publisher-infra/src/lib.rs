//! # Publisher Infrastructure
//!
//! Concrete implementations of the ports defined in `publisher-core`.
//! This crate contains the password hasher, persistence backends and mail transports.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory store and console mail only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `smtp` - SMTP mail delivery via lettre

pub mod auth;
pub mod clock;
pub mod database;
pub mod mail;
pub mod memory;

// Re-exports - always available
pub use auth::Argon2PasswordService;
pub use clock::{RandomIdGenerator, SystemClock};
pub use database::{DatabaseConfig, DatabaseConnections};
pub use mail::{ConsoleMailer, InMemoryMailer};
pub use memory::{InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};

// Re-exports - external services
#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresUserRepository};
#[cfg(feature = "smtp")]
pub use mail::{SmtpConfig, SmtpMailer};
