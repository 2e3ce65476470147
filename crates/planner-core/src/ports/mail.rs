//! Mail port - abstraction over mail transports (SMTP, sandbox).

use std::sync::Arc;

use async_trait::async_trait;

/// A display name plus address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub name: String,
    pub address: String,
}

impl Mailbox {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// An HTML message ready to be handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub html: String,
}

/// Descriptor of a message accepted by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    /// Transport-assigned message identifier.
    pub message_id: String,
    /// Web preview of the message, when the transport is a test inbox.
    pub preview_url: Option<String>,
}

/// Produces connected mail clients. Acquisition may involve network I/O.
#[async_trait]
pub trait MailClientFactory: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn MailClient>, MailError>;
}

/// A connected mail client.
#[async_trait]
pub trait MailClient: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<SentMail, MailError>;
}

/// Mail errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail transport unavailable: {0}")]
    Connection(String),

    #[error("Failed to send mail: {0}")]
    Send(String),

    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),
}
