//! PostgreSQL repository implementations.

use planner_core::ports::TripRepository;

use super::entity::trip::Entity as TripEntity;
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL trip repository.
pub type PostgresTripRepository = PostgresBaseRepository<TripEntity>;

impl TripRepository for PostgresTripRepository {}
