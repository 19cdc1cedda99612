//! # Publisher Core
//!
//! The domain layer of the QuickPublisher backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! posts, user accounts, and the verification workflow that runs on account saves.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
