//! Time and identity sources, injected so services stay deterministic under test.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh identifiers and tokens.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Uuid;
}
