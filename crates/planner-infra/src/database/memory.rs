//! In-memory trip repository - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use planner_core::domain::Trip;
use planner_core::error::RepoError;
use planner_core::ports::{BaseRepository, TripRepository};

/// Trip store backed by a HashMap with an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryTripRepository {
    store: RwLock<HashMap<Uuid, Trip>>,
}

impl InMemoryTripRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored trips.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryTripRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Trip, Uuid> for InMemoryTripRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Trip>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, trip: Trip) -> Result<Trip, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&trip.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        store.insert(trip.id, trip.clone());
        Ok(trip)
    }
}

impl TripRepository for InMemoryTripRepository {}
