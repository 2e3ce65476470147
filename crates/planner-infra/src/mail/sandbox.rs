//! Sandbox mail transport - keeps messages in process instead of delivering them.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use planner_core::ports::{MailClient, MailClientFactory, MailError, MailMessage, SentMail};

use super::{DEFAULT_PREVIEW_BASE_URL, preview_url};

/// A message accepted by the sandbox.
#[derive(Debug, Clone)]
pub struct DeliveredMail {
    pub message_id: String,
    pub message: MailMessage,
}

/// Test transport that records every message in a shared outbox.
///
/// Clones share the same outbox, so a handle kept by a test observes
/// what the application sent.
#[derive(Clone)]
pub struct SandboxMailer {
    outbox: Arc<RwLock<Vec<DeliveredMail>>>,
    preview_base_url: String,
}

impl SandboxMailer {
    pub fn new() -> Self {
        Self::with_preview_base(DEFAULT_PREVIEW_BASE_URL)
    }

    pub fn with_preview_base(preview_base_url: impl Into<String>) -> Self {
        Self {
            outbox: Arc::new(RwLock::new(Vec::new())),
            preview_base_url: preview_base_url.into(),
        }
    }

    /// Snapshot of every message sent so far, oldest first.
    pub async fn outbox(&self) -> Vec<DeliveredMail> {
        self.outbox.read().await.clone()
    }
}

impl Default for SandboxMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailClientFactory for SandboxMailer {
    async fn connect(&self) -> Result<Arc<dyn MailClient>, MailError> {
        Ok(Arc::new(self.clone()))
    }
}

#[async_trait]
impl MailClient for SandboxMailer {
    async fn send(&self, message: &MailMessage) -> Result<SentMail, MailError> {
        if !message.to.address.contains('@') {
            return Err(MailError::InvalidAddress(message.to.address.clone()));
        }

        let message_id = Uuid::new_v4().simple().to_string();
        let mut outbox = self.outbox.write().await;
        outbox.push(DeliveredMail {
            message_id: message_id.clone(),
            message: message.clone(),
        });

        tracing::debug!(%message_id, to = %message.to.address, "Sandbox accepted message");

        Ok(SentMail {
            preview_url: Some(preview_url(&self.preview_base_url, &message_id)),
            message_id,
        })
    }
}
