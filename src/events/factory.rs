//! Event construction
//!
//! The factory turns "what happened" plus a time host into an
//! [`ElevatorEvent`]. It never mutates anything: the dispatcher commits state
//! changes first and only then asks for the event describing them.

use crate::events::elevator_event::{ElevatorEvent, EventRefs};
use crate::simulation::clock::{SimInstant, TimeHost};
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::{BuildingId, ElevatorId, EventKind, FloorId, PassengerId};

/// Builds events for one building, relative to its simulation start
#[derive(Debug, Clone, Copy)]
pub struct EventFactory {
    building: BuildingId,
    start: SimInstant,
}

impl EventFactory {
    /// Create a factory for `building` whose run starts at `start`
    pub fn new(building: BuildingId, start: SimInstant) -> Self {
        Self { building, start }
    }

    /// Simulation start instant
    pub fn start_time(&self) -> SimInstant {
        self.start
    }

    /// Generic entry point. Fails when `refs` lacks a reference `kind` requires.
    pub fn create(
        &self,
        kind: EventKind,
        host: &impl TimeHost,
        refs: EventRefs,
    ) -> SimulationResult<ElevatorEvent> {
        let missing = [
            (kind.requires_elevator() && refs.elevator.is_none(), "elevator"),
            (kind.requires_passenger() && refs.passenger.is_none(), "passenger"),
            (kind.requires_floor() && refs.floor.is_none(), "floor"),
        ];
        if let Some((_, what)) = missing.iter().find(|(is_missing, _)| *is_missing) {
            return Err(SimulationError::contract_violation(format!(
                "{} event requires a {} reference",
                kind, what
            )));
        }
        Ok(self.record(kind, host, refs))
    }

    /// Simulation started
    pub fn start(&self, host: &impl TimeHost) -> ElevatorEvent {
        self.record(EventKind::Start, host, EventRefs::none())
    }

    /// Simulation finished
    pub fn end(&self, host: &impl TimeHost) -> ElevatorEvent {
        self.record(EventKind::End, host, EventRefs::none())
    }

    /// A passenger called an elevator from `floor`
    pub fn call_elevator(
        &self,
        host: &impl TimeHost,
        elevator: ElevatorId,
        passenger: PassengerId,
        floor: FloorId,
    ) -> ElevatorEvent {
        let refs = EventRefs::none().elevator(elevator).passenger(passenger).floor(floor);
        self.record(EventKind::CallElevator, host, refs)
    }

    /// An elevator arrived at `floor`
    pub fn elevator_arrive(&self, host: &impl TimeHost, elevator: ElevatorId, floor: FloorId) -> ElevatorEvent {
        let refs = EventRefs::none().elevator(elevator).floor(floor);
        self.record(EventKind::ElevatorArrive, host, refs)
    }

    /// A passenger boarded at `floor`
    pub fn passenger_board(
        &self,
        host: &impl TimeHost,
        elevator: ElevatorId,
        passenger: PassengerId,
        floor: FloorId,
    ) -> ElevatorEvent {
        let refs = EventRefs::none().elevator(elevator).passenger(passenger).floor(floor);
        self.record(EventKind::PassengerBoard, host, refs)
    }

    /// A passenger alighted at `floor`
    pub fn passenger_alight(
        &self,
        host: &impl TimeHost,
        elevator: ElevatorId,
        passenger: PassengerId,
        floor: FloorId,
    ) -> ElevatorEvent {
        let refs = EventRefs::none().elevator(elevator).passenger(passenger).floor(floor);
        self.record(EventKind::PassengerAlight, host, refs)
    }

    /// An elevator went idle
    pub fn elevator_idle(&self, host: &impl TimeHost, elevator: ElevatorId) -> ElevatorEvent {
        self.record(EventKind::ElevatorIdle, host, EventRefs::none().elevator(elevator))
    }

    /// A boarding was refused for overload
    pub fn elevator_outweight(
        &self,
        host: &impl TimeHost,
        elevator: ElevatorId,
        passenger: PassengerId,
    ) -> ElevatorEvent {
        let refs = EventRefs::none().elevator(elevator).passenger(passenger);
        self.record(EventKind::ElevatorOutweight, host, refs)
    }

    /// An inconsistent transition was attempted
    pub fn invalid(&self, host: &impl TimeHost, refs: EventRefs) -> ElevatorEvent {
        self.record(EventKind::Invalid, host, refs)
    }

    fn record(&self, kind: EventKind, host: &impl TimeHost, refs: EventRefs) -> ElevatorEvent {
        let time = host.now();
        ElevatorEvent {
            kind,
            time,
            elapsed: time.since(self.start),
            building: self.building,
            refs,
        }
    }
}
