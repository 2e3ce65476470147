//! SeaORM entities.

pub mod trip;
