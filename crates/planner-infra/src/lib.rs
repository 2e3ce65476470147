//! # Planner Infrastructure
//!
//! Concrete implementations of the ports defined in `planner-core`.
//! This crate contains the database and mail integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `smtp` - SMTP mail delivery via lettre

pub mod database;
pub mod mail;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryTripRepository};
pub use mail::{MailConfig, SandboxMailer};

#[cfg(feature = "postgres")]
pub use database::PostgresTripRepository;

#[cfg(feature = "smtp")]
pub use mail::{SmtpConfig, SmtpMailer};
