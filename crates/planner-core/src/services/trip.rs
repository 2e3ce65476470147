//! Trip creation flow.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{CreateTrip, Owner, Trip};
use crate::error::DomainError;
use crate::ports::{MailClientFactory, MailMessage, Mailbox, TripRepository};

const SENDER_NAME: &str = "Equipe plann.er";
const SENDER_ADDRESS: &str = "oi@planner.com";
const CONFIRMATION_SUBJECT: &str = "Testanto envio de e-mail";
const CONFIRMATION_HTML: &str = "<p>Teste de envio de e-mail</p>";

/// Creates trips and notifies their owners.
///
/// Storage and mail are injected so tests can substitute them. The write and
/// the notification are not atomic: a trip stays persisted when the mail fails.
pub struct TripService {
    trips: Arc<dyn TripRepository>,
    mailer: Arc<dyn MailClientFactory>,
}

impl TripService {
    pub fn new(trips: Arc<dyn TripRepository>, mailer: Arc<dyn MailClientFactory>) -> Self {
        Self { trips, mailer }
    }

    /// Create a trip, evaluating the start-date rule against the current time.
    pub async fn create_trip(&self, command: CreateTrip) -> Result<Trip, DomainError> {
        self.create_trip_at(command, Utc::now()).await
    }

    /// Create a trip, evaluating the start-date rule against `now`.
    pub async fn create_trip_at(
        &self,
        command: CreateTrip,
        now: DateTime<Utc>,
    ) -> Result<Trip, DomainError> {
        let CreateTrip {
            destination,
            starts_at,
            ends_at,
            owner,
        } = command;

        if starts_at < now {
            return Err(DomainError::InvalidStartDate);
        }

        if ends_at < starts_at {
            return Err(DomainError::InvalidEndDate);
        }

        let trip = self
            .trips
            .insert(Trip::new(destination, starts_at, ends_at))
            .await?;
        tracing::debug!(trip_id = %trip.id, "Trip persisted");

        let client = self.mailer.connect().await?;
        let sent = client.send(&confirmation_message(&owner)).await?;

        match &sent.preview_url {
            Some(url) => tracing::info!(
                trip_id = %trip.id,
                message_id = %sent.message_id,
                preview_url = %url,
                "Confirmation mail sent"
            ),
            None => tracing::info!(
                trip_id = %trip.id,
                message_id = %sent.message_id,
                "Confirmation mail sent (no preview available)"
            ),
        }

        Ok(trip)
    }
}

/// The confirmation mail carries fixed content, not the trip details.
fn confirmation_message(owner: &Owner) -> MailMessage {
    MailMessage {
        from: Mailbox::new(SENDER_NAME, SENDER_ADDRESS),
        to: Mailbox::new(owner.name.clone(), owner.email.clone()),
        subject: CONFIRMATION_SUBJECT.to_string(),
        html: CONFIRMATION_HTML.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Duration;
    use tracing_test::traced_test;
    use uuid::Uuid;

    use super::*;
    use crate::error::{ErrorKind, RepoError};
    use crate::ports::{BaseRepository, MailClient, MailError, SentMail};

    #[derive(Default)]
    struct FakeTrips {
        rows: Mutex<HashMap<Uuid, Trip>>,
        fail: bool,
    }

    impl FakeTrips {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl BaseRepository<Trip, Uuid> for FakeTrips {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Trip>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn insert(&self, trip: Trip) -> Result<Trip, RepoError> {
            if self.fail {
                return Err(RepoError::Connection("database down".into()));
            }
            self.rows.lock().unwrap().insert(trip.id, trip.clone());
            Ok(trip)
        }
    }

    impl TripRepository for FakeTrips {}

    #[derive(Default)]
    struct FakeMailer {
        sent: Arc<Mutex<Vec<MailMessage>>>,
        refuse_connection: bool,
        preview_base: Option<String>,
    }

    struct FakeClient {
        sent: Arc<Mutex<Vec<MailMessage>>>,
        preview_base: Option<String>,
    }

    #[async_trait]
    impl MailClientFactory for FakeMailer {
        async fn connect(&self) -> Result<Arc<dyn MailClient>, MailError> {
            if self.refuse_connection {
                return Err(MailError::Connection("smtp unreachable".into()));
            }
            Ok(Arc::new(FakeClient {
                sent: self.sent.clone(),
                preview_base: self.preview_base.clone(),
            }))
        }
    }

    #[async_trait]
    impl MailClient for FakeClient {
        async fn send(&self, message: &MailMessage) -> Result<SentMail, MailError> {
            let mut sent = self.sent.lock().unwrap();
            sent.push(message.clone());
            let message_id = format!("fake-{}", sent.len());
            Ok(SentMail {
                preview_url: self
                    .preview_base
                    .as_ref()
                    .map(|base| format!("{base}/message/{message_id}")),
                message_id,
            })
        }
    }

    fn command(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> CreateTrip {
        CreateTrip {
            destination: "Florianópolis".to_string(),
            starts_at,
            ends_at,
            owner: Owner::new("Ana", "ana@example.com"),
        }
    }

    #[tokio::test]
    async fn test_create_trip_persists_and_notifies() {
        let trips = Arc::new(FakeTrips::default());
        let mailer = Arc::new(FakeMailer::default());
        let service = TripService::new(trips.clone(), mailer.clone());

        let now = Utc::now();
        let starts_at = now + Duration::days(1);
        let ends_at = starts_at + Duration::days(5);

        let trip = service
            .create_trip_at(command(starts_at, ends_at), now)
            .await
            .unwrap();

        let stored = trips.find_by_id(trip.id).await.unwrap().unwrap();
        assert_eq!(stored.destination, "Florianópolis");
        assert_eq!(stored.starts_at, starts_at);
        assert_eq!(stored.ends_at, ends_at);
        assert_eq!(trips.count(), 1);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, Mailbox::new("Equipe plann.er", "oi@planner.com"));
        assert_eq!(sent[0].to, Mailbox::new("Ana", "ana@example.com"));
        assert_eq!(sent[0].subject, "Testanto envio de e-mail");
        assert_eq!(sent[0].html, "<p>Teste de envio de e-mail</p>");
        assert!(!sent[0].html.contains("Florianópolis"));
    }

    #[tokio::test]
    async fn test_start_in_the_past_is_rejected_before_persisting() {
        let trips = Arc::new(FakeTrips::default());
        let mailer = Arc::new(FakeMailer::default());
        let service = TripService::new(trips.clone(), mailer.clone());

        let now = Utc::now();
        let result = service
            .create_trip_at(command(now - Duration::days(1), now + Duration::days(2)), now)
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, DomainError::InvalidStartDate));
        assert_eq!(err.to_string(), "Invalid trip start date");
        assert_eq!(trips.count(), 0);
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_end_before_start_is_rejected_before_persisting() {
        let trips = Arc::new(FakeTrips::default());
        let service = TripService::new(trips.clone(), Arc::new(FakeMailer::default()));

        let now = Utc::now();
        let result = service
            .create_trip_at(command(now + Duration::days(1), now), now)
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, DomainError::InvalidEndDate));
        assert_eq!(err.to_string(), "Invalid trip end date");
        assert_eq!(trips.count(), 0);
    }

    #[tokio::test]
    async fn test_boundaries_are_inclusive() {
        let trips = Arc::new(FakeTrips::default());
        let service = TripService::new(trips.clone(), Arc::new(FakeMailer::default()));

        let now = Utc::now();
        let trip = service.create_trip_at(command(now, now), now).await.unwrap();

        assert_eq!(trip.starts_at, trip.ends_at);
        assert_eq!(trips.count(), 1);
    }

    #[tokio::test]
    async fn test_same_payload_twice_creates_two_trips() {
        let trips = Arc::new(FakeTrips::default());
        let service = TripService::new(trips.clone(), Arc::new(FakeMailer::default()));

        let now = Utc::now();
        let starts_at = now + Duration::days(1);
        let first = service
            .create_trip_at(command(starts_at, starts_at), now)
            .await
            .unwrap();
        let second = service
            .create_trip_at(command(starts_at, starts_at), now)
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(trips.count(), 2);
    }

    #[tokio::test]
    async fn test_storage_failure_is_a_dependency_error() {
        let mailer = Arc::new(FakeMailer::default());
        let service = TripService::new(Arc::new(FakeTrips::failing()), mailer.clone());

        let now = Utc::now();
        let err = service
            .create_trip_at(command(now + Duration::hours(1), now + Duration::days(1)), now)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Dependency);
        assert!(matches!(err, DomainError::Repository(RepoError::Connection(_))));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mail_failure_leaves_trip_persisted() {
        let trips = Arc::new(FakeTrips::default());
        let mailer = Arc::new(FakeMailer {
            refuse_connection: true,
            ..Default::default()
        });
        let service = TripService::new(trips.clone(), mailer);

        let now = Utc::now();
        let err = service
            .create_trip_at(command(now + Duration::hours(1), now + Duration::days(1)), now)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Mail(MailError::Connection(_))));
        assert_eq!(trips.count(), 1);
    }

    fn count_info_lines(lines: &[&str], needles: &[&str]) -> usize {
        lines
            .iter()
            .filter(|line| line.contains("INFO") && needles.iter().all(|n| line.contains(n)))
            .count()
    }

    #[tokio::test]
    #[traced_test]
    async fn test_sent_mail_preview_url_is_logged() {
        let mailer = Arc::new(FakeMailer {
            preview_base: Some("https://inbox.test".to_string()),
            ..Default::default()
        });
        let service = TripService::new(Arc::new(FakeTrips::default()), mailer);

        let now = Utc::now();
        let trip = service
            .create_trip_at(command(now + Duration::hours(1), now + Duration::days(1)), now)
            .await
            .unwrap();

        let trip_id = format!("trip_id={}", trip.id);
        logs_assert(|lines: &[&str]| {
            match count_info_lines(
                lines,
                &[
                    "Confirmation mail sent",
                    "preview_url=https://inbox.test/message/fake-1",
                    trip_id.as_str(),
                ],
            ) {
                1 => Ok(()),
                n => Err(format!("expected one preview log line, found {n}")),
            }
        });
    }

    #[tokio::test]
    #[traced_test]
    async fn test_missing_preview_is_logged() {
        let service = TripService::new(
            Arc::new(FakeTrips::default()),
            Arc::new(FakeMailer::default()),
        );

        let now = Utc::now();
        service
            .create_trip_at(command(now + Duration::hours(1), now + Duration::days(1)), now)
            .await
            .unwrap();

        assert!(logs_contain("no preview available"));
        assert!(!logs_contain("preview_url="));
        logs_assert(|lines: &[&str]| {
            match count_info_lines(lines, &["Confirmation mail sent", "message_id=fake-1"]) {
                1 => Ok(()),
                n => Err(format!("expected one mail log line, found {n}")),
            }
        });
    }
}
