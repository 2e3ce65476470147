//! Application state - shared across all handlers.

use std::sync::Arc;

use planner_core::TripService;
use planner_core::ports::{MailClientFactory, TripRepository};
use planner_infra::{InMemoryTripRepository, SandboxMailer};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use planner_infra::PostgresTripRepository;

#[cfg(feature = "smtp")]
use planner_infra::SmtpMailer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub trips: Arc<TripService>,
}

impl AppState {
    /// Build the state around explicitly provided collaborators.
    pub fn from_parts(
        trip_repo: Arc<dyn TripRepository>,
        mailer: Arc<dyn MailClientFactory>,
    ) -> Self {
        Self {
            trips: Arc::new(TripService::new(trip_repo, mailer)),
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let trip_repo = Self::trip_repository(config).await;
        let mailer = Self::mailer(config);

        tracing::info!("Application state initialized");

        Self::from_parts(trip_repo, mailer)
    }

    #[cfg(feature = "postgres")]
    async fn trip_repository(config: &AppConfig) -> Arc<dyn TripRepository> {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryTripRepository::new());
        };

        match planner_infra::database::connect(db_config).await {
            Ok(conn) => Arc::new(PostgresTripRepository::new(conn)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryTripRepository::new())
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn trip_repository(_config: &AppConfig) -> Arc<dyn TripRepository> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Arc::new(InMemoryTripRepository::new())
    }

    fn mailer(config: &AppConfig) -> Arc<dyn MailClientFactory> {
        if let Some(mailer) = Self::smtp_mailer(config) {
            return mailer;
        }

        tracing::warn!("SMTP_HOST not set. Confirmation mails go to the in-process sandbox.");
        Arc::new(SandboxMailer::with_preview_base(
            config.mail.preview_base_url.clone(),
        ))
    }

    #[cfg(feature = "smtp")]
    fn smtp_mailer(config: &AppConfig) -> Option<Arc<dyn MailClientFactory>> {
        let smtp = config.mail.smtp.clone()?;
        tracing::info!(host = %smtp.host, port = smtp.port, "Mail delivery via SMTP");

        Some(Arc::new(SmtpMailer::new(
            smtp,
            Some(config.mail.preview_base_url.clone()),
        )))
    }

    #[cfg(not(feature = "smtp"))]
    fn smtp_mailer(_config: &AppConfig) -> Option<Arc<dyn MailClientFactory>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use planner_core::domain::{CreateTrip, Owner};
    use planner_infra::mail::MailConfig;

    use super::*;

    #[actix_web::test]
    async fn test_state_without_database_or_smtp_creates_trips() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            database: None,
            mail: MailConfig::default(),
        };

        let state = AppState::new(&config).await;

        let starts_at = Utc::now() + Duration::days(1);
        let trip = state
            .trips
            .create_trip(CreateTrip {
                destination: "Florianópolis".to_string(),
                starts_at,
                ends_at: starts_at + Duration::days(5),
                owner: Owner::new("Ana", "ana@example.com"),
            })
            .await
            .unwrap();

        assert_eq!(trip.destination, "Florianópolis");
    }
}
