//! Elevator Dispatch Simulator
//!
//! A discrete-event simulation of a building's elevator fleet serving a
//! stream of passengers, producing an ordered and auditable event log.
//!
//! # Overview
//!
//! A building has a contiguous range of floors (there is no floor 0), each
//! with its own story height, and a fleet of elevators with a weight
//! capacity and a constant speed. Passengers appear at a floor at a given
//! instant, call a specific elevator and ride to their destination. Every
//! elevator and passenger keeps its own clock; the dispatcher brings them
//! together whenever they interact, and each recorded event is stamped with
//! the clock of the entity it describes.
//!
//! ## Key Features
//!
//! - **Deterministic Replay**: the same scenario always produces the same log
//! - **Travel Law**: travel time is the summed story height divided by speed
//! - **Capacity Enforcement**: overweight passengers are refused, never carried
//! - **Idle Tracking**: cars idle past their threshold report it before moving
//! - **Multiple Outputs**: text, JSON array or JSON lines, plus statistics
//!
//! ## Quick Start
//!
//! ```rust
//! use elevator_dispatch_simulator::*;
//!
//! let mut building = Building::from_scenario(&ScenarioConfig::default())?;
//! let events = building.execute(DispatchPolicy::Fcfs)?;
//!
//! let renderer = EventRenderer::new(&building);
//! for event in &events {
//!     println!("{}", renderer.render(event));
//! }
//!
//! let stats = FleetStatistics::from_run(&events, &building);
//! assert_eq!(stats.served_passengers, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, enums, scenarios and run configuration
//! - [`facility`]: floors, elevators, parking and the building
//! - [`passenger`]: passengers and the arrival queue
//! - [`events`]: event records, the event factory and rendering
//! - [`simulation`]: clocks, dispatch, replay, statistics and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Passenger  │    │   Events    │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Passenger   │◄───┤ Factory     │
//! │ Scenario    │    │ Arrivals    │    │ Renderer    │
//! │ Config      │    │             │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Facility   │    │ Simulation  │    │   Binary    │
//! │             │    │             │    │             │
//! │ Floors      │◄───┤ Clock       │◄───┤ CLI        │
//! │ Elevators   │    │ Dispatcher  │    │ Output      │
//! │ Building    │    │ Statistics  │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod events;
pub mod facility;
pub mod passenger;
pub mod simulation;

pub mod types;

// Core types and identifiers
pub use types::{
    BuildingConfig,
    BuildingId,
    ConfigValidationError,
    // Enums
    DispatchPolicy,
    // Identifiers
    ElevatorId,
    EventKind,
    FloorId,
    OutputFormat,
    PassengerId,
    PassengerOutcome,
    // Configuration
    ScenarioConfig,
    SimulationConfig,
};

// Facility types and functionality
pub use facility::{parking_floors, Building, Elevator, ElevatorSpec, Floor, FloorPlan};

// Passenger types and functionality
pub use passenger::{ArrivalQueue, Passenger, PassengerSpec};

// Event types and functionality
pub use events::{ElevatorEvent, EventFactory, EventRefs, EventRenderer};

// Simulation types and functionality
pub use simulation::{
    verify, FcfsDispatcher, FleetStatistics, ReplayReport, ScenarioGenerator, SimClock,
    SimDuration, SimInstant, SimulationError, SimulationResult, TimeHost,
};
