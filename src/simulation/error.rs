//! Error types and handling
//!
//! This module contains error types and error handling for the simulation.

use thiserror::Error;

use crate::types::{DispatchPolicy, ElevatorId, PassengerId};

/// Errors that can occur while building or running a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Construction input was rejected; no run can take place
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A boarding would have pushed an elevator over its rated capacity
    #[error("Elevator {elevator} cannot carry passenger {passenger}: {load} kg would exceed capacity {capacity} kg")]
    CapacityExceeded {
        /// Elevator that refused the boarding
        elevator: ElevatorId,
        /// Passenger that was refused
        passenger: PassengerId,
        /// Load the elevator would have carried
        load: u32,
        /// Rated capacity of the elevator
        capacity: u32,
    },

    /// A state transition was attempted that the entity's state forbids
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// An event was requested without a reference its kind requires
    #[error("Event contract violation: {0}")]
    ContractViolation(String),

    /// The requested dispatch policy has no implementation
    #[error("Dispatch policy {0} is not supported")]
    UnsupportedPolicy(DispatchPolicy),

    /// The building already ran its simulation
    #[error("Simulation has already been executed for this building")]
    AlreadyExecuted,

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<anyhow::Error> for SimulationError {
    fn from(error: anyhow::Error) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an invalid transition error
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    /// Create an event contract violation
    pub fn contract_violation(msg: impl Into<String>) -> Self {
        Self::ContractViolation(msg.into())
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::CapacityExceeded { .. } => true,
            SimulationError::InvalidTransition(_) => true,
            SimulationError::ContractViolation(_) => false,
            SimulationError::UnsupportedPolicy(_) => false,
            SimulationError::AlreadyExecuted => false,
            SimulationError::IoError(_) => true,
            SimulationError::SerializationError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::CapacityExceeded { .. } => "Capacity",
            SimulationError::InvalidTransition(_) => "Transition",
            SimulationError::ContractViolation(_) => "Contract",
            SimulationError::UnsupportedPolicy(_) => "Policy",
            SimulationError::AlreadyExecuted => "Lifecycle",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_error = SimulationError::configuration_error("floor 0 in range");
        assert!(matches!(config_error, SimulationError::ConfigurationError(_)));
        assert_eq!(config_error.to_string(), "Configuration error: floor 0 in range");

        let transition = SimulationError::invalid_transition("passenger not aboard");
        assert!(matches!(transition, SimulationError::InvalidTransition(_)));
    }

    #[test]
    fn test_error_recoverability() {
        let capacity = SimulationError::CapacityExceeded {
            elevator: ElevatorId(0),
            passenger: PassengerId(3),
            load: 150,
            capacity: 100,
        };
        assert!(capacity.is_recoverable());
        assert!(capacity.to_string().contains("150 kg"));

        assert!(!SimulationError::configuration_error("bad").is_recoverable());
        assert!(!SimulationError::contract_violation("missing elevator").is_recoverable());
        assert!(!SimulationError::UnsupportedPolicy(DispatchPolicy::Sstf).is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(SimulationError::configuration_error("x").category(), "Configuration");
        assert_eq!(SimulationError::AlreadyExecuted.category(), "Lifecycle");
        assert_eq!(SimulationError::UnsupportedPolicy(DispatchPolicy::Look).category(), "Policy");
    }

    #[test]
    fn test_anyhow_conversion() {
        let error: SimulationError = anyhow::anyhow!("scenario missing").into();
        assert!(matches!(error, SimulationError::ConfigurationError(_)));
    }
}
