//! The physical building: floors, elevators and parking
//!
//! # Overview
//!
//! - **FloorPlan**: the valid floors (never floor 0) and their story heights
//! - **Elevator**: a car with capacity, speed, manifest and its own clock
//! - **parking_floors**: where an idle fleet waits before the first call
//! - **Building**: owns everything above plus the passengers, and runs once
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dispatch_simulator::facility::*;
//! use elevator_dispatch_simulator::types::*;
//!
//! let mut building = Building::from_scenario(&ScenarioConfig::default()).unwrap();
//! let events = building.execute(DispatchPolicy::Fcfs).unwrap();
//!
//! assert_eq!(events.first().unwrap().kind, EventKind::Start);
//! assert_eq!(events.last().unwrap().kind, EventKind::End);
//! assert!(building.passengers().iter().all(|p| p.is_processed()));
//! ```

pub mod building;
pub mod elevator;
pub mod floor;
pub mod parking;

// Re-export all public types for convenience
pub use building::Building;
pub use elevator::{Elevator, ElevatorSpec, DEFAULT_IDLE_THRESHOLD_SECS};
pub use floor::{Floor, FloorPlan, DEFAULT_FLOOR_HEIGHT};
pub use parking::parking_floors;
