//! Statistics collection and reporting
//!
//! This module reduces a finished event log into per-elevator and run-level
//! figures. It never feeds back into dispatching.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::events::ElevatorEvent;
use crate::facility::Building;
use crate::simulation::clock::SimDuration;
use crate::types::{ElevatorId, EventKind, FloorId, PassengerOutcome};

/// Figures for a single elevator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElevatorStatistics {
    /// Elevator the figures describe
    pub elevator: ElevatorId,
    /// Events referencing this elevator other than idle events
    pub active_events: usize,
    /// Idle events for this elevator
    pub idle_events: usize,
    /// Share of active events among active and idle events (0 when none)
    pub utilization: f64,
    /// Passengers that alighted from this elevator
    pub passengers_served: usize,
    /// Floor the elevator ended the run at
    pub final_floor: FloorId,
}

/// Run-level statistics for a finished simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetStatistics {
    /// Passengers added to the building
    pub total_passengers: usize,
    /// Passengers that reached a terminal state
    pub processed_passengers: usize,
    /// Passengers delivered to their destination
    pub served_passengers: usize,
    /// Passengers refused for overload
    pub unserved_passengers: usize,
    /// Events in the log, including start and end
    pub total_events: usize,
    /// Events per kind
    pub event_counts: BTreeMap<EventKind, usize>,
    /// Simulated time between start and end
    pub simulated_duration: SimDuration,
    /// Per-elevator figures in fleet order
    pub elevators: Vec<ElevatorStatistics>,
}

impl FleetStatistics {
    /// Reduce an event log produced by `building`
    pub fn from_run(events: &[ElevatorEvent], building: &Building) -> Self {
        let mut event_counts = BTreeMap::new();
        for event in events {
            *event_counts.entry(event.kind).or_insert(0) += 1;
        }

        let elevators = building
            .elevators()
            .iter()
            .map(|elevator| {
                let id = elevator.id();
                let (mut active_events, mut idle_events, mut passengers_served) = (0, 0, 0);
                for event in events.iter().filter(|e| e.involves_elevator(id)) {
                    match event.kind {
                        EventKind::ElevatorIdle => idle_events += 1,
                        EventKind::PassengerAlight => {
                            active_events += 1;
                            passengers_served += 1;
                        }
                        _ => active_events += 1,
                    }
                }
                let observed = active_events + idle_events;
                let utilization = if observed == 0 {
                    0.0
                } else {
                    active_events as f64 / observed as f64
                };
                ElevatorStatistics {
                    elevator: id,
                    active_events,
                    idle_events,
                    utilization,
                    passengers_served,
                    final_floor: elevator.current_floor(),
                }
            })
            .collect();

        let passengers = building.passengers();
        let count_outcome =
            |outcome: PassengerOutcome| passengers.iter().filter(|p| p.outcome() == Some(outcome)).count();

        let simulated_duration = events.iter().map(|e| e.elapsed).max().unwrap_or(SimDuration::ZERO);

        Self {
            total_passengers: passengers.len(),
            processed_passengers: passengers.iter().filter(|p| p.is_processed()).count(),
            served_passengers: count_outcome(PassengerOutcome::Served),
            unserved_passengers: count_outcome(PassengerOutcome::Unserved),
            total_events: events.len(),
            event_counts,
            simulated_duration,
            elevators,
        }
    }

    /// Number of events of `kind`
    pub fn count(&self, kind: EventKind) -> usize {
        self.event_counts.get(&kind).copied().unwrap_or(0)
    }

    /// Figures for one elevator
    pub fn elevator(&self, id: ElevatorId) -> Option<&ElevatorStatistics> {
        self.elevators.iter().find(|e| e.elevator == id)
    }

    /// Percentage of passengers that were served
    pub fn served_percentage(&self) -> f64 {
        if self.total_passengers == 0 {
            0.0
        } else {
            (self.served_passengers as f64 / self.total_passengers as f64) * 100.0
        }
    }

    /// One-line summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Run Summary: {} events over {} | Passengers: {} total, {} served ({:.1}%), {} unserved",
            self.total_events,
            self.simulated_duration,
            self.total_passengers,
            self.served_passengers,
            self.served_percentage(),
            self.unserved_passengers
        )
    }

    /// Multi-line breakdown per event kind and per elevator
    pub fn detailed_breakdown(&self) -> String {
        let mut breakdown = String::new();
        breakdown.push_str("=== Event Breakdown ===\n");
        breakdown.push_str(&format!("Total Events: {}\n", self.total_events));
        for (kind, count) in &self.event_counts {
            breakdown.push_str(&format!("  - {}: {}\n", kind, count));
        }

        breakdown.push_str("\n=== Elevators ===\n");
        for elevator in &self.elevators {
            breakdown.push_str(&format!(
                "  - {}: utilization {:.1}% ({} active / {} idle), {} served, final floor {}\n",
                elevator.elevator,
                elevator.utilization * 100.0,
                elevator.active_events,
                elevator.idle_events,
                elevator.passengers_served,
                elevator.final_floor
            ));
        }
        breakdown
    }
}

impl fmt::Display for FleetStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        write!(f, "{}", self.detailed_breakdown())
    }
}
