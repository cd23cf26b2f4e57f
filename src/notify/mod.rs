//! Outbound e-mail for the contact form.
//!
//! Earlier versions of the site sent synchronously with no timeout and let
//! any SMTP failure fall through to the generic error boundary. Here
//! delivery gets an explicit per-attempt timeout and a bounded retry, and
//! exhaustion surfaces as [`NotifyError`] so the HTTP layer can answer with
//! a distinct delivery-failed response instead of a 500.

use std::time::Duration;

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::stub::AsyncStubTransport;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;
use thiserror::Error;

/// A contact-form submission. Fields default to empty strings so a partial
/// form deserializes and can be rejected with a useful message instead of a
/// 422 from the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// Required fields: name, email, message. Returns the first missing
    /// field's name.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name");
        }
        if self.email.trim().is_empty() {
            return Err("email");
        }
        if self.message.trim().is_empty() {
            return Err("message");
        }
        Ok(())
    }

    /// The plain-text e-mail body, with every submitted field verbatim.
    pub fn body(&self) -> String {
        format!(
            "\nNew contact form submission:\n\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Role: {}\n\
             Message:\n{}\n\n",
            self.name, self.email, self.phone, self.role, self.message
        )
    }
}

/// SMTP settings, from process-wide configuration.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// RFC 5322 mailbox the mail is sent from.
    pub sender: String,
    /// Mailbox contact submissions are delivered to.
    pub recipient: String,
    /// Per-attempt deadline.
    pub timeout: Duration,
    /// Total send attempts before giving up.
    pub max_attempts: u32,
}

impl MailConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;
}

/// Failures while formatting or delivering a contact e-mail.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("no mail transport configured")]
    Unconfigured,

    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("stub transport error: {0}")]
    Stub(#[from] lettre::transport::stub::Error),

    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Clone)]
enum Transport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    Stub(AsyncStubTransport),
}

/// Formats contact submissions into e-mail and delivers them.
#[derive(Clone)]
pub struct Mailer {
    transport: Transport,
    sender: Mailbox,
    recipient: Mailbox,
    timeout: Duration,
    max_attempts: u32,
}

impl Mailer {
    /// A mailer over an implicit-TLS SMTP relay (the SMTPS flow the source
    /// sites used), authenticating with the configured credentials.
    pub fn smtp(config: &MailConfig) -> Result<Self, NotifyError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self {
            transport: Transport::Smtp(transport),
            sender: config.sender.parse()?,
            recipient: config.recipient.parse()?,
            timeout: config.timeout,
            max_attempts: config.max_attempts.max(1),
        })
    }

    /// A mailer over lettre's recording stub transport, for tests.
    pub fn stub(transport: AsyncStubTransport, sender: &str, recipient: &str) -> Result<Self, NotifyError> {
        Ok(Self {
            transport: Transport::Stub(transport),
            sender: sender.parse()?,
            recipient: recipient.parse()?,
            timeout: MailConfig::DEFAULT_TIMEOUT,
            max_attempts: 1,
        })
    }

    /// Deliver one submission as a single plain-text e-mail.
    ///
    /// Attempts are bounded and each gets its own deadline; the last error
    /// is returned once attempts are exhausted.
    pub async fn deliver(&self, kind: &str, submission: &ContactSubmission) -> Result<(), NotifyError> {
        let message = Message::builder()
            .subject(format!("New Contact Form \"{kind}\""))
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .body(submission.body())?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let err = match tokio::time::timeout(self.timeout, self.send(message.clone())).await {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(err)) => err,
                Err(_) => NotifyError::Timeout(self.timeout),
            };

            if attempt >= self.max_attempts {
                return Err(err);
            }
            tracing::warn!(attempt, error = %err, "mail delivery failed, retrying");
        }
    }

    async fn send(&self, message: Message) -> Result<(), NotifyError> {
        match &self.transport {
            Transport::Smtp(transport) => {
                transport.send(message).await?;
            }
            Transport::Stub(transport) => {
                transport.send(message).await?;
            }
        }
        Ok(())
    }
}
