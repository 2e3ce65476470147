use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Trip;
use crate::error::RepoError;

/// Generic repository trait defining the storage operations the domain needs.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity and return the stored version.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// Trip repository.
#[async_trait]
pub trait TripRepository: BaseRepository<Trip, Uuid> {}
