//! Event records on the simulation timeline
//!
//! Records are immutable once produced. They carry id handles only, never
//! references into the building.

use serde::{Deserialize, Serialize};

use crate::simulation::clock::{SimDuration, SimInstant};
use crate::types::{BuildingId, ElevatorId, EventKind, FloorId, PassengerId};

/// Optional references attached to an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRefs {
    /// Elevator the event concerns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevator: Option<ElevatorId>,
    /// Passenger the event concerns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger: Option<PassengerId>,
    /// Floor the event happens at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<FloorId>,
}

impl EventRefs {
    /// No references
    pub fn none() -> Self {
        Self::default()
    }

    /// Attach an elevator
    pub fn elevator(mut self, id: ElevatorId) -> Self {
        self.elevator = Some(id);
        self
    }

    /// Attach a passenger
    pub fn passenger(mut self, id: PassengerId) -> Self {
        self.passenger = Some(id);
        self
    }

    /// Attach a floor
    pub fn floor(mut self, id: FloorId) -> Self {
        self.floor = Some(id);
        self
    }
}

/// A single event in the simulation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevatorEvent {
    /// What happened
    pub kind: EventKind,
    /// Absolute simulated time
    pub time: SimInstant,
    /// Time since the simulation start
    pub elapsed: SimDuration,
    /// Building the event belongs to
    pub building: BuildingId,
    /// Elevator, passenger and floor involved
    #[serde(flatten)]
    pub refs: EventRefs,
}

impl ElevatorEvent {
    /// Elevator involved, if any
    pub fn elevator(&self) -> Option<ElevatorId> {
        self.refs.elevator
    }

    /// Passenger involved, if any
    pub fn passenger(&self) -> Option<PassengerId> {
        self.refs.passenger
    }

    /// Floor involved, if any
    pub fn floor(&self) -> Option<FloorId> {
        self.refs.floor
    }

    /// Check if this event concerns the given elevator
    pub fn involves_elevator(&self, id: ElevatorId) -> bool {
        self.refs.elevator == Some(id)
    }

    /// Check if this event concerns the given passenger
    pub fn involves_passenger(&self, id: PassengerId) -> bool {
        self.refs.passenger == Some(id)
    }

    /// Check if this is a timeline bracket (start or end)
    pub fn is_bracket(&self) -> bool {
        matches!(self.kind, EventKind::Start | EventKind::End)
    }
}
