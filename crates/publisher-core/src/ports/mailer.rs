//! Outbound mail port.

use async_trait::async_trait;

/// A plain-text message handed to a mail backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub recipients: Vec<String>,
    /// When `true` the backend logs delivery failures instead of returning them.
    pub fail_silently: bool,
}

/// Mail sending trait - abstraction over delivery backends (SMTP, console, in-memory).
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message. Returns once the backend accepted or rejected it.
    async fn send_mail(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

/// Mail delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Message(String),

    #[error("Transport error: {0}")]
    Transport(String),
}
