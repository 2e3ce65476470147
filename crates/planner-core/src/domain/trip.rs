use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Owner;

/// Trip entity - a planned journey with a destination and date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl Trip {
    /// Create a new trip with a generated ID.
    pub fn new(destination: String, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            destination,
            starts_at,
            ends_at,
        }
    }
}

/// Command to create a trip on behalf of its owner.
#[derive(Debug, Clone)]
pub struct CreateTrip {
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub owner: Owner,
}
