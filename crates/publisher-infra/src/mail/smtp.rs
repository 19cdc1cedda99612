//! SMTP mail backend built on lettre.

use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use publisher_core::domain::mask_email;
use publisher_core::ports::{MailError, Mailer, OutgoingMail};

/// SMTP connection settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Upgrade the connection with STARTTLS. Disable only for local relays.
    pub starttls: bool,
}

impl SmtpConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
            starttls: true,
        }
    }
}

/// Delivers mail through an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| MailError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        builder = builder.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        tracing::info!(host = %config.host, port = config.port, "SMTP mailer configured");

        Ok(Self {
            transport: builder.build(),
        })
    }
}

/// Build the MIME message for an outgoing mail.
fn build_message(mail: &OutgoingMail) -> Result<Message, MailError> {
    let from: Mailbox = mail
        .from
        .parse()
        .map_err(|_| MailError::InvalidAddress(mail.from.clone()))?;

    let mut builder = Message::builder()
        .from(from)
        .subject(mail.subject.clone())
        .header(ContentType::TEXT_PLAIN);

    for recipient in &mail.recipients {
        let to: Mailbox = recipient
            .parse()
            .map_err(|_| MailError::InvalidAddress(mask_email(recipient)))?;
        builder = builder.to(to);
    }

    builder
        .body(mail.body.clone())
        .map_err(|e| MailError::Message(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_mail(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let result = match build_message(&mail) {
            Ok(message) => self
                .transport
                .send(message)
                .await
                .map(|_| ())
                .map_err(|e| MailError::Transport(e.to_string())),
            Err(e) => Err(e),
        };

        match result {
            Err(e) if mail.fail_silently => {
                tracing::warn!(error = %e, "Mail delivery failed (suppressed)");
                Ok(())
            }
            other => other,
        }
    }
}
