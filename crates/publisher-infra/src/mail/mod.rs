//! Mail backends - SMTP, console and in-memory.

mod console;
mod memory;

#[cfg(feature = "smtp")]
mod smtp;

pub use console::ConsoleMailer;
pub use memory::InMemoryMailer;

#[cfg(feature = "smtp")]
pub use smtp::{SmtpConfig, SmtpMailer};
