//! Passengers and their arrival ordering
//!
//! - **Passenger**: one trip from an origin floor to a destination floor
//! - **ArrivalQueue**: the single source of truth for processing order

pub mod arrival_queue;
#[allow(clippy::module_inception)]
pub mod passenger;

// Re-export all public types for convenience
pub use arrival_queue::ArrivalQueue;
pub use passenger::{Passenger, PassengerSpec, DEFAULT_PASSENGER_WEIGHT};
