//! SMTP mail transport via lettre.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use planner_core::ports::{
    MailClient, MailClientFactory, MailError, MailMessage, Mailbox, SentMail,
};

use super::preview_url;

/// SMTP relay settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Mail client factory delivering through an authenticated STARTTLS relay.
pub struct SmtpMailer {
    config: SmtpConfig,
    preview_base_url: Option<String>,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig, preview_base_url: Option<String>) -> Self {
        Self {
            config,
            preview_base_url,
        }
    }
}

#[async_trait]
impl MailClientFactory for SmtpMailer {
    async fn connect(&self) -> Result<Arc<dyn MailClient>, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
            .map_err(|e| MailError::Connection(e.to_string()))?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();

        let reachable = transport
            .test_connection()
            .await
            .map_err(|e| MailError::Connection(e.to_string()))?;
        if !reachable {
            return Err(MailError::Connection(format!(
                "{}:{} refused the connection",
                self.config.host, self.config.port
            )));
        }

        tracing::debug!(
            host = %self.config.host,
            port = self.config.port,
            "SMTP relay connected"
        );

        Ok(Arc::new(SmtpClient {
            transport,
            preview_base_url: self.preview_base_url.clone(),
        }))
    }
}

struct SmtpClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    preview_base_url: Option<String>,
}

#[async_trait]
impl MailClient for SmtpClient {
    async fn send(&self, message: &MailMessage) -> Result<SentMail, MailError> {
        let email = Message::builder()
            .message_id(None)
            .from(to_lettre_mailbox(&message.from)?)
            .to(to_lettre_mailbox(&message.to)?)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(message.html.clone())
            .map_err(|e| MailError::Send(e.to_string()))?;

        let header_id = email
            .headers()
            .get_raw("Message-ID")
            .map(|id| id.trim_matches(|c| c == '<' || c == '>').to_string())
            .unwrap_or_default();

        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| MailError::Send(e.to_string()))?;

        let relay_id = response.message().find_map(relay_message_id);
        let preview_url = match (&self.preview_base_url, &relay_id) {
            (Some(base), Some(id)) => Some(preview_url(base, id)),
            _ => None,
        };

        Ok(SentMail {
            message_id: relay_id.unwrap_or(header_id),
            preview_url,
        })
    }
}

fn to_lettre_mailbox(mailbox: &Mailbox) -> Result<lettre::message::Mailbox, MailError> {
    let address: Address = mailbox
        .address
        .parse()
        .map_err(|_| MailError::InvalidAddress(mailbox.address.clone()))?;

    Ok(lettre::message::Mailbox::new(Some(mailbox.name.clone()), address))
}

/// Extract the id a test relay reports as `[STATUS=new MSGID=<id>]`.
fn relay_message_id(line: &str) -> Option<String> {
    let start = line.rfind('[')?;
    let end = line[start..].find(']')? + start;

    line[start + 1..end]
        .split_whitespace()
        .find_map(|token| token.strip_prefix("MSGID="))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
