//! # Planner Core
//!
//! The domain layer of the plann.er trip service.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, ErrorKind};
pub use services::TripService;
