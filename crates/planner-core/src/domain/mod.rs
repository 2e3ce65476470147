//! Domain entities - the core business objects.

mod owner;
mod trip;

pub use owner::Owner;
pub use trip::{CreateTrip, Trip};
