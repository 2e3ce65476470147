//! Mail transports - SMTP delivery and the in-process sandbox.

mod sandbox;

#[cfg(feature = "smtp")]
mod smtp;

pub use sandbox::SandboxMailer;

#[cfg(feature = "smtp")]
pub use smtp::{SmtpConfig, SmtpMailer};

/// Default web inbox used to build message preview links.
pub const DEFAULT_PREVIEW_BASE_URL: &str = "https://ethereal.email";

/// Mail delivery configuration.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP relay; `None` selects the sandbox transport.
    #[cfg(feature = "smtp")]
    pub smtp: Option<SmtpConfig>,
    /// Base URL of the web inbox that renders message previews.
    pub preview_base_url: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            #[cfg(feature = "smtp")]
            smtp: None,
            preview_base_url: DEFAULT_PREVIEW_BASE_URL.to_string(),
        }
    }
}

pub(crate) fn preview_url(base: &str, message_id: &str) -> String {
    format!("{}/message/{}", base.trim_end_matches('/'), message_id)
}
