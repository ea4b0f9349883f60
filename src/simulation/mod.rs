//! Simulation time, dispatch and reporting
//!
//! This module contains the simulated clock, the FCFS dispatch engine,
//! replay verification, statistics collection and error handling.
//!
//! # Overview
//!
//! - **SimClock**: a per-entity clock that only ever moves forward
//! - **FcfsDispatcher**: serves passengers in arrival order and records events
//! - **verify**: replays a finished log and checks ordering and capacity
//! - **FleetStatistics**: per-elevator utilization and run totals
//! - **ScenarioGenerator**: random but valid scenarios, optionally seeded
//! - **SimulationError**: error handling for every simulation operation
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dispatch_simulator::facility::Building;
//! use elevator_dispatch_simulator::simulation::*;
//! use elevator_dispatch_simulator::types::DispatchPolicy;
//!
//! let scenario = ScenarioGenerator::with_seed(7).generate(20).unwrap();
//! let mut building = Building::from_scenario(&scenario).unwrap();
//! let events = building.execute(DispatchPolicy::Fcfs).unwrap();
//!
//! let report = verify(&events, &building).unwrap();
//! assert_eq!(report.events_checked, events.len());
//!
//! let stats = FleetStatistics::from_run(&events, &building);
//! assert_eq!(stats.processed_passengers, 20);
//! ```

pub mod clock;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod replay;
pub mod scenario_generator;
pub mod statistics;

// Re-export all public types for convenience
pub use clock::*;
pub use dispatcher::*;
pub use error::*;
pub use logging::*;
pub use replay::*;
pub use scenario_generator::*;
pub use statistics::*;
