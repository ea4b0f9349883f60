//! Event records, construction and rendering
//!
//! This module contains the event log produced by a simulation run.
//!
//! # Overview
//!
//! - **ElevatorEvent**: an immutable record anchored to an entity's clock
//! - **EventFactory**: typed constructors, one per event kind, plus a checked
//!   generic entry point
//! - **EventRenderer**: one human-readable line per event
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dispatch_simulator::events::*;
//! use elevator_dispatch_simulator::simulation::{SimClock, SimInstant};
//! use elevator_dispatch_simulator::types::*;
//!
//! let start = SimInstant::parse("2023/01/01 08:00:00").unwrap();
//! let factory = EventFactory::new(BuildingId(0), start);
//! let clock = SimClock::new(start);
//!
//! let event = factory.elevator_arrive(&clock, ElevatorId(0), FloorId(1));
//! assert_eq!(event.kind, EventKind::ElevatorArrive);
//!
//! // Missing references are rejected by the generic entry point
//! assert!(factory.create(EventKind::ElevatorArrive, &clock, EventRefs::none()).is_err());
//! ```

pub mod elevator_event;
pub mod factory;
pub mod renderer;

// Re-export all public types for convenience
pub use elevator_event::*;
pub use factory::*;
pub use renderer::*;
