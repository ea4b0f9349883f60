//! Replay verification of a finished event log
//!
//! Walks the log in order, rebuilding each elevator's manifest from board and
//! alight events, and checks the timeline against the building it came from.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, instrument};

use crate::events::ElevatorEvent;
use crate::facility::{Building, Elevator};
use crate::passenger::Passenger;
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::{ElevatorId, EventKind, PassengerId, PassengerOutcome};

/// What a successful replay observed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Events replayed
    pub events_checked: usize,
    /// Passengers whose recorded outcome matches their single terminal event
    pub passengers_checked: usize,
    /// Heaviest manifest seen per elevator, in kilograms
    pub peak_load: BTreeMap<ElevatorId, u32>,
}

/// Replay `events` against `building` and check the run's invariants.
///
/// Fails with [`SimulationError::InvalidTransition`] describing the first
/// violation found.
#[instrument(skip_all, fields(events = events.len()))]
pub fn verify(events: &[ElevatorEvent], building: &Building) -> SimulationResult<ReplayReport> {
    check_bracketing(events)?;

    let mut report = ReplayReport {
        events_checked: events.len(),
        ..ReplayReport::default()
    };
    let mut loads: HashMap<ElevatorId, u32> = HashMap::new();
    let mut aboard: HashSet<PassengerId> = HashSet::new();
    let mut alighted: HashSet<PassengerId> = HashSet::new();
    let mut refused: HashSet<PassengerId> = HashSet::new();

    for (position, event) in events.iter().enumerate() {
        match event.kind {
            EventKind::PassengerBoard => {
                let (elevator, passenger) = resolve(event, building, position)?;
                if !aboard.insert(passenger.id()) {
                    return Err(violation(position, format!("{} boarded twice", passenger.id())));
                }
                let load = loads.entry(elevator.id()).or_insert(0);
                *load += passenger.weight();
                if *load > elevator.capacity() {
                    return Err(violation(
                        position,
                        format!(
                            "{} carries {} kg, over its capacity of {} kg",
                            elevator.id(),
                            load,
                            elevator.capacity()
                        ),
                    ));
                }
                let peak = report.peak_load.entry(elevator.id()).or_insert(0);
                *peak = (*peak).max(*load);
            }
            EventKind::PassengerAlight => {
                let (elevator, passenger) = resolve(event, building, position)?;
                if !aboard.remove(&passenger.id()) {
                    return Err(violation(
                        position,
                        format!("{} alighted without boarding", passenger.id()),
                    ));
                }
                if let Some(load) = loads.get_mut(&elevator.id()) {
                    *load = load.saturating_sub(passenger.weight());
                }
                alighted.insert(passenger.id());
            }
            EventKind::ElevatorOutweight => {
                let (_, passenger) = resolve(event, building, position)?;
                refused.insert(passenger.id());
            }
            _ => {}
        }
    }

    if let Some(stranded) = aboard.iter().next() {
        return Err(SimulationError::invalid_transition(format!(
            "Replay ended with {} still aboard",
            stranded
        )));
    }

    for passenger in building.passengers() {
        let id = passenger.id();
        let expected = match (alighted.contains(&id), refused.contains(&id)) {
            (true, false) => Some(PassengerOutcome::Served),
            (false, true) => Some(PassengerOutcome::Unserved),
            (false, false) => {
                return Err(SimulationError::invalid_transition(format!(
                    "{} has no terminal event in the log",
                    id
                )))
            }
            (true, true) => {
                return Err(SimulationError::invalid_transition(format!(
                    "{} was both delivered and refused",
                    id
                )))
            }
        };
        if passenger.outcome() != expected {
            return Err(SimulationError::invalid_transition(format!(
                "{} recorded as {:?} but the log says {:?}",
                id,
                passenger.outcome(),
                expected
            )));
        }
        report.passengers_checked += 1;
    }

    debug!(
        "Replay verified {} events and {} passengers",
        report.events_checked, report.passengers_checked
    );
    Ok(report)
}

fn check_bracketing(events: &[ElevatorEvent]) -> SimulationResult<()> {
    match (events.first(), events.last()) {
        (Some(first), Some(last)) if first.kind == EventKind::Start && last.kind == EventKind::End => {
            if let Some(position) = events.windows(2).position(|w| w[0].elapsed > w[1].elapsed) {
                return Err(violation(position + 1, "event is earlier than its predecessor".to_string()));
            }
            let latest = events.iter().map(|e| e.elapsed).max().unwrap_or(last.elapsed);
            if last.elapsed != latest {
                return Err(violation(events.len() - 1, "end event is not the latest event".to_string()));
            }
            let inner_brackets = events[1..events.len() - 1].iter().filter(|e| e.is_bracket()).count();
            if inner_brackets > 0 {
                return Err(SimulationError::invalid_transition(
                    "Log must contain exactly one start and one end event",
                ));
            }
            Ok(())
        }
        _ => Err(SimulationError::invalid_transition(
            "Log must begin with a start event and finish with an end event",
        )),
    }
}

fn resolve<'b>(
    event: &ElevatorEvent,
    building: &'b Building,
    position: usize,
) -> SimulationResult<(&'b Elevator, &'b Passenger)> {
    let elevator = event
        .elevator()
        .and_then(|id| building.elevator(id))
        .ok_or_else(|| violation(position, format!("{} event names no known elevator", event.kind)))?;
    let passenger = event
        .passenger()
        .and_then(|id| building.passenger(id))
        .ok_or_else(|| violation(position, format!("{} event names no known passenger", event.kind)))?;
    Ok((elevator, passenger))
}

fn violation(position: usize, detail: String) -> SimulationError {
    SimulationError::invalid_transition(format!("Event #{}: {}", position, detail))
}
