//! Trip entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub destination: String,
    pub starts_at: DateTimeWithTimeZone,
    pub ends_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Trip.
impl From<Model> for planner_core::domain::Trip {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            destination: model.destination,
            starts_at: model.starts_at.into(),
            ends_at: model.ends_at.into(),
        }
    }
}

/// Conversion from Domain Trip to SeaORM ActiveModel.
impl From<planner_core::domain::Trip> for ActiveModel {
    fn from(trip: planner_core::domain::Trip) -> Self {
        Self {
            id: Set(trip.id),
            destination: Set(trip.destination),
            starts_at: Set(trip.starts_at.into()),
            ends_at: Set(trip.ends_at.into()),
        }
    }
}
