//! Console mail backend for development. Messages are written to the log.

use async_trait::async_trait;

use publisher_core::ports::{MailError, Mailer, OutgoingMail};

/// Logs every message at INFO level instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send_mail(&self, mail: OutgoingMail) -> Result<(), MailError> {
        tracing::info!(
            from = %mail.from,
            to = %mail.recipients.join(", "),
            subject = %mail.subject,
            body = %mail.body,
            "Email (console backend)"
        );
        Ok(())
    }
}
