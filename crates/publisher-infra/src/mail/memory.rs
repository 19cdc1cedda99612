//! In-memory mail backend. Keeps an outbox that tests can inspect.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use publisher_core::ports::{MailError, Mailer, OutgoingMail};

/// Collects sent messages. Can be switched into a failing mode to exercise
/// delivery errors.
///
/// A bounded mailer keeps only the newest `capacity` messages.
#[derive(Clone, Default)]
pub struct InMemoryMailer {
    outbox: Arc<Mutex<VecDeque<OutgoingMail>>>,
    failure: Arc<Mutex<Option<String>>>,
    capacity: Option<usize>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Messages held in the outbox, oldest first.
    pub async fn outbox(&self) -> Vec<OutgoingMail> {
        self.outbox.lock().await.iter().cloned().collect()
    }

    pub async fn sent_count(&self) -> usize {
        self.outbox.lock().await.len()
    }

    /// Make every following send fail with a transport error.
    pub async fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.lock().await = Some(reason.into());
    }

    pub async fn recover(&self) {
        *self.failure.lock().await = None;
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send_mail(&self, mail: OutgoingMail) -> Result<(), MailError> {
        if let Some(reason) = self.failure.lock().await.clone() {
            if mail.fail_silently {
                tracing::warn!(reason = %reason, "Dropping mail after failed delivery");
                return Ok(());
            }
            return Err(MailError::Transport(reason));
        }

        let mut outbox = self.outbox.lock().await;
        outbox.push_back(mail);
        if let Some(capacity) = self.capacity {
            while outbox.len() > capacity {
                outbox.pop_front();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(fail_silently: bool) -> OutgoingMail {
        OutgoingMail {
            subject: "Hi".to_string(),
            body: "Body".to_string(),
            from: "from@example.com".to_string(),
            recipients: vec!["to@example.com".to_string()],
            fail_silently,
        }
    }

    #[tokio::test]
    async fn test_outbox_records_messages() {
        let mailer = InMemoryMailer::new();
        mailer.send_mail(mail(false)).await.unwrap();
        mailer.send_mail(mail(false)).await.unwrap();

        assert_eq!(mailer.sent_count().await, 2);
        assert_eq!(mailer.outbox().await[0].subject, "Hi");
    }

    #[tokio::test]
    async fn test_bounded_outbox_drops_oldest() {
        let mailer = InMemoryMailer::bounded(2);
        for subject in ["one", "two", "three"] {
            let mut m = mail(false);
            m.subject = subject.to_string();
            mailer.send_mail(m).await.unwrap();
        }

        let subjects: Vec<String> = mailer.outbox().await.into_iter().map(|m| m.subject).collect();
        assert_eq!(subjects, vec!["two", "three"]);
    }

    #[tokio::test]
    async fn test_failure_surfaces_unless_silent() {
        let mailer = InMemoryMailer::new();
        mailer.fail_with("connection refused").await;

        let loud = mailer.send_mail(mail(false)).await;
        assert!(matches!(loud, Err(MailError::Transport(_))));

        assert!(mailer.send_mail(mail(true)).await.is_ok());
        assert_eq!(mailer.sent_count().await, 0);

        mailer.recover().await;
        mailer.send_mail(mail(false)).await.unwrap();
        assert_eq!(mailer.sent_count().await, 1);
    }
}
