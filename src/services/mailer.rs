use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use thiserror::Error;

use crate::config::SmtpConfig;

/// Subject applied inside the relay when no usable subject reaches it.
const DEFAULT_SUBJECT: &str = "New Portfolio Contact Message";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("SMTP relay is not configured")]
    NotConfigured,
    #[error("Invalid mailbox: {0}")]
    InvalidMailbox(String),
    #[error("Failed to build message: {0}")]
    BuildFailed(String),
    #[error("Failed to reach SMTP relay: {0}")]
    Transport(String),
    #[error("Failed to send message: {0}")]
    SendFailed(String),
}

/// A contact notification addressed to the site owner.
#[derive(Debug, Clone)]
pub struct ContactEmail {
    pub sender_name: String,
    pub sender_email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactEmail {
    /// The subject actually sent: the supplied one when non-empty, otherwise
    /// the relay fallback.
    pub fn effective_subject(&self) -> &str {
        self.subject
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SUBJECT)
    }

    /// Plain-text body embedding the submission verbatim.
    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.sender_name, self.sender_email, self.message
        )
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &ContactEmail) -> Result<(), MailerError>;
}

/// Relays contact notifications over authenticated STARTTLS SMTP.
///
/// The transport is built per send, and a missing configuration is reported
/// as [`MailerError::NotConfigured`] before any network activity. Callers
/// decide what a failed notification means; this type never panics the
/// request path.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &ContactEmail) -> Result<(), MailerError> {
        if !self.config.is_configured() {
            return Err(MailerError::NotConfigured);
        }

        // The envelope sender is the relay account; the visitor's name is kept
        // as the display name so replies read naturally in a mail client.
        let sender_address = self.config.user.parse().map_err(|e| {
            MailerError::InvalidMailbox(format!("sender {}: {}", self.config.user, e))
        })?;
        let from = Mailbox::new(Some(email.sender_name.clone()), sender_address);
        let to: Mailbox = self.config.to.parse().map_err(|e| {
            MailerError::InvalidMailbox(format!("recipient {}: {}", self.config.to, e))
        })?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(email.effective_subject())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body())
            .map_err(|e| MailerError::BuildFailed(e.to_string()))?;

        let credentials = Credentials::new(self.config.user.clone(), self.config.password.clone());
        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
                .map_err(|e| MailerError::Transport(e.to_string()))?
                .port(self.config.port)
                .credentials(credentials)
                .build();

        transport
            .send(message)
            .await
            .map_err(|e| MailerError::SendFailed(e.to_string()))?;

        tracing::info!(subject = %email.effective_subject(), "Contact notification sent");
        Ok(())
    }
}

enum MockMode {
    Succeed,
    FailSend,
    NotConfigured,
}

/// Mock mailer for tests. Counts every invocation, records delivered
/// notifications, and can be forced into either failure mode.
pub struct MockMailer {
    mode: MockMode,
    send_count: AtomicU64,
    sent: Mutex<Vec<ContactEmail>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::with_mode(MockMode::Succeed)
    }

    /// A mailer whose transport always reports failure.
    pub fn failing() -> Self {
        Self::with_mode(MockMode::FailSend)
    }

    /// A mailer that reports the relay as unconfigured.
    pub fn not_configured() -> Self {
        Self::with_mode(MockMode::NotConfigured)
    }

    fn with_mode(mode: MockMode) -> Self {
        Self {
            mode,
            send_count: AtomicU64::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Number of times `send` was invoked, successful or not.
    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<ContactEmail> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: &ContactEmail) -> Result<(), MailerError> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            MockMode::Succeed => {
                self.sent
                    .lock()
                    .expect("mailer mutex poisoned")
                    .push(email.clone());
                tracing::info!(
                    sender = %email.sender_email,
                    subject = %email.effective_subject(),
                    "[MOCK] Contact notification recorded"
                );
                Ok(())
            }
            MockMode::FailSend => Err(MailerError::SendFailed(
                "simulated transport failure".to_string(),
            )),
            MockMode::NotConfigured => Err(MailerError::NotConfigured),
        }
    }
}
