//! Verification mail sent after an unverified account is saved.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{User, mask_email};
use crate::error::DomainError;
use crate::ports::{Mailer, OutgoingMail};

pub const VERIFICATION_SUBJECT: &str = "Verify your QuickPublisher account";

/// Path under which the verification endpoint is mounted.
pub const VERIFICATION_PATH: &str = "/api/accounts/verify";

/// Where verification links point and who sends them.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Scheme and host prepended to the verification path, without a trailing slash.
    pub base_url: String,
    pub from_address: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            from_address: "from@quickpublisher.dev".to_string(),
        }
    }
}

impl VerificationConfig {
    pub fn link_for(&self, token: Uuid) -> String {
        format!(
            "{}{}/{}",
            self.base_url.trim_end_matches('/'),
            VERIFICATION_PATH,
            token
        )
    }
}

/// Sends a verification link to every unverified user it is shown.
///
/// There is no record of earlier sends: each save of an unverified account
/// produces a new mail.
pub struct VerificationNotifier {
    mailer: Arc<dyn Mailer>,
    config: VerificationConfig,
}

impl VerificationNotifier {
    pub fn new(mailer: Arc<dyn Mailer>, config: VerificationConfig) -> Self {
        Self { mailer, config }
    }

    /// Called with the stored record after every successful user save.
    pub async fn user_saved(&self, user: &User) -> Result<(), DomainError> {
        if user.is_verified {
            return Ok(());
        }

        let link = self.config.link_for(user.verification_uuid);
        let mail = OutgoingMail {
            subject: VERIFICATION_SUBJECT.to_string(),
            body: format!("Follow this link to verify your account: {link}"),
            from: self.config.from_address.clone(),
            recipients: vec![user.email.clone()],
            fail_silently: false,
        };

        tracing::debug!(user_id = %user.id, email = %mask_email(&user.email), "Sending verification email");

        self.mailer.send_mail(mail).await.map_err(|e| {
            tracing::warn!(user_id = %user.id, error = %e, "Verification email failed");
            DomainError::Mail(e)
        })
    }
}
