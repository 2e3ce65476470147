//! Application services - orchestrate domain rules over the ports.

mod trip;

pub use trip::TripService;
