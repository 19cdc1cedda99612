//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod clock;
mod mailer;
mod repository;

pub use auth::{AuthError, PasswordService};
pub use clock::{Clock, IdGenerator};
pub use mailer::{MailError, Mailer, OutgoingMail};
pub use repository::{BaseRepository, PostRepository, UserRepository};
