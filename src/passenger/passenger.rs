//! Passenger entity

use serde::{Deserialize, Serialize};

use crate::simulation::clock::{SimClock, SimInstant, TimeHost};
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::{ElevatorId, FloorId, PassengerId, PassengerOutcome};

/// Default passenger weight in kilograms
pub const DEFAULT_PASSENGER_WEIGHT: u32 = 70;

/// Static description of a passenger, as read from a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerSpec {
    /// Unique identifier
    pub id: PassengerId,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Weight in kilograms
    #[serde(default = "default_weight")]
    pub weight: u32,
    /// Floor the passenger calls from
    pub origin: FloorId,
    /// Floor the passenger wants to reach
    pub destination: FloorId,
    /// When the passenger shows up at the origin floor
    pub appear_time: SimInstant,
    /// Elevator the passenger calls
    #[serde(default = "default_elevator")]
    pub elevator: ElevatorId,
}

fn default_weight() -> u32 {
    DEFAULT_PASSENGER_WEIGHT
}

fn default_elevator() -> ElevatorId {
    ElevatorId(0)
}

impl PassengerSpec {
    /// Describe a passenger trip
    pub fn new(
        id: impl Into<PassengerId>,
        weight: u32,
        origin: impl Into<FloorId>,
        destination: impl Into<FloorId>,
        appear_time: SimInstant,
        elevator: impl Into<ElevatorId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            weight,
            origin: origin.into(),
            destination: destination.into(),
            appear_time,
            elevator: elevator.into(),
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A passenger taking one trip through the building
#[derive(Debug, Clone)]
pub struct Passenger {
    id: PassengerId,
    name: String,
    weight: u32,
    origin: FloorId,
    destination: FloorId,
    appear_time: SimInstant,
    elevator: ElevatorId,
    on_board: bool,
    outcome: Option<PassengerOutcome>,
    clock: SimClock,
}

impl Passenger {
    /// Create a passenger whose clock starts at the appearance time
    pub fn new(spec: &PassengerSpec) -> SimulationResult<Self> {
        for floor in [spec.origin, spec.destination] {
            if !floor.is_valid() {
                return Err(SimulationError::configuration_error(format!(
                    "Passenger {} references floor 0",
                    spec.id
                )));
            }
        }

        Ok(Self {
            id: spec.id,
            name: spec.name.clone().unwrap_or_else(|| "anonymous".to_string()),
            weight: spec.weight,
            origin: spec.origin,
            destination: spec.destination,
            appear_time: spec.appear_time,
            elevator: spec.elevator,
            on_board: false,
            outcome: None,
            clock: SimClock::new(spec.appear_time),
        })
    }

    /// Unique identifier
    pub fn id(&self) -> PassengerId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Weight in kilograms
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Floor the passenger calls from
    pub fn origin(&self) -> FloorId {
        self.origin
    }

    /// Floor the passenger wants to reach
    pub fn destination(&self) -> FloorId {
        self.destination
    }

    /// When the passenger appeared
    pub fn appear_time(&self) -> SimInstant {
        self.appear_time
    }

    /// Elevator the passenger called
    pub fn requested_elevator(&self) -> ElevatorId {
        self.elevator
    }

    /// Whether the passenger is inside a car
    pub fn is_on_board(&self) -> bool {
        self.on_board
    }

    pub(crate) fn set_on_board(&mut self, on_board: bool) {
        self.on_board = on_board;
    }

    /// Whether the passenger reached a terminal state
    pub fn is_processed(&self) -> bool {
        self.outcome.is_some()
    }

    /// Terminal outcome, once processed
    pub fn outcome(&self) -> Option<PassengerOutcome> {
        self.outcome
    }

    /// Record the terminal outcome. A passenger is processed exactly once.
    pub fn finish(&mut self, outcome: PassengerOutcome) -> SimulationResult<()> {
        if let Some(previous) = self.outcome {
            return Err(SimulationError::invalid_transition(format!(
                "Passenger {} already processed as {}",
                self.id, previous
            )));
        }
        self.outcome = Some(outcome);
        Ok(())
    }

    /// Mutable access to the passenger's clock
    pub fn clock_mut(&mut self) -> &mut SimClock {
        &mut self.clock
    }
}

impl TimeHost for Passenger {
    fn clock(&self) -> &SimClock {
        &self.clock
    }
}
