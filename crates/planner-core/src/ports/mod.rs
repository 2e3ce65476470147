//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod mail;
mod repository;

pub use mail::{MailClient, MailClientFactory, MailError, MailMessage, Mailbox, SentMail};
pub use repository::{BaseRepository, TripRepository};
