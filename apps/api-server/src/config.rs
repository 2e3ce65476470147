//! Application configuration loaded from environment variables.

use std::env;

use planner_infra::database::DatabaseConfig;
use planner_infra::mail::{DEFAULT_PREVIEW_BASE_URL, MailConfig};

#[cfg(feature = "smtp")]
use planner_infra::mail::SmtpConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub mail: MailConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(3333),
            database,
            mail: Self::mail_from_env(),
        }
    }

    /// SMTP settings are only used when SMTP_HOST is present.
    // The `smtp` field may exist without this crate's feature when features unify.
    #[allow(clippy::needless_update)]
    fn mail_from_env() -> MailConfig {
        let preview_base_url = env::var("MAIL_PREVIEW_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_PREVIEW_BASE_URL.to_string());

        MailConfig {
            #[cfg(feature = "smtp")]
            smtp: env::var("SMTP_HOST").ok().map(|host| SmtpConfig {
                host,
                port: parse_var("SMTP_PORT").unwrap_or(587),
                username: env::var("SMTP_USERNAME").unwrap_or_default(),
                password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            }),
            preview_base_url,
            ..MailConfig::default()
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
