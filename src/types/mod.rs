//! Core types and identifiers for the dispatch simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: small copyable id handles for floors, elevators, passengers and buildings
//! - **Enums**: event kinds, dispatch policies, passenger outcomes and output formats
//! - **Scenario**: the building, fleet and passengers to simulate
//! - **Configuration**: run configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dispatch_simulator::types::*;
//!
//! let lobby = FloorId::LOBBY;
//! assert!(lobby.is_valid());
//! assert_eq!(FloorId(-2).to_string(), "B2");
//!
//! let policy: DispatchPolicy = "fcfs".parse().unwrap();
//! assert!(policy.is_supported());
//!
//! let config = SimulationConfig {
//!     passenger_count: 25,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;
pub mod scenario;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
pub use scenario::*;
