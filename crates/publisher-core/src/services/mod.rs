//! Domain services - orchestrate entities and ports.

mod accounts;
mod notifier;
mod posts;

pub use accounts::UserAccounts;
pub use notifier::{
    VERIFICATION_PATH, VERIFICATION_SUBJECT, VerificationConfig, VerificationNotifier,
};
pub use posts::{PostCatalog, PostSummary};
