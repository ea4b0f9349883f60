//! Human-readable rendering of the event log

use std::io::{self, Write};

use crate::events::elevator_event::ElevatorEvent;
use crate::facility::Building;
use crate::types::{ElevatorId, EventKind, PassengerId};

/// Renders events as one English line each, resolving ids through a building
#[derive(Debug, Clone, Copy)]
pub struct EventRenderer<'a> {
    building: &'a Building,
}

impl<'a> EventRenderer<'a> {
    /// Create a renderer for events produced by `building`
    pub fn new(building: &'a Building) -> Self {
        Self { building }
    }

    /// Render a single event
    pub fn render(&self, event: &ElevatorEvent) -> String {
        format!("[{}] {}", event.time, self.describe(event))
    }

    /// Write every event on its own line
    pub fn write_all<W: Write>(&self, events: &[ElevatorEvent], out: &mut W) -> io::Result<()> {
        for event in events {
            writeln!(out, "{}", self.render(event))?;
        }
        Ok(())
    }

    fn describe(&self, event: &ElevatorEvent) -> String {
        let building = self.building;
        match event.kind {
            EventKind::Start => format!(
                "{} ({}) simulation started, floors {} to {} (no floor 0)",
                building.name(),
                building.id(),
                building.floors().lowest().0,
                building.floors().highest().0
            ),
            EventKind::End => format!(
                "{} ({}) simulation finished after {} seconds",
                building.name(),
                building.id(),
                event.elapsed.as_secs_f64()
            ),
            EventKind::ElevatorIdle => format!("Elevator {} is idle", self.elevator_label(event.elevator())),
            EventKind::ElevatorArrive => {
                let speed = event
                    .elevator()
                    .and_then(|id| building.elevator(id))
                    .map(|e| format!(" (average speed {} m/s)", e.speed()))
                    .unwrap_or_default();
                format!(
                    "Elevator {} arrived at floor {}{}",
                    self.elevator_label(event.elevator()),
                    floor_label(event),
                    speed
                )
            }
            EventKind::CallElevator => {
                let trip = event
                    .passenger()
                    .and_then(|id| building.passenger(id))
                    .map(|p| format!(", heading to floor {}, weight {} kg", p.destination().0, p.weight()))
                    .unwrap_or_default();
                format!(
                    "Passenger {} called elevator {} at floor {}{}",
                    self.passenger_label(event.passenger()),
                    self.elevator_label(event.elevator()),
                    floor_label(event),
                    trip
                )
            }
            EventKind::PassengerBoard => format!(
                "Passenger {} boarded elevator {}",
                self.passenger_label(event.passenger()),
                self.elevator_label(event.elevator())
            ),
            EventKind::PassengerAlight => format!(
                "Passenger {} left elevator {} at floor {}",
                self.passenger_label(event.passenger()),
                self.elevator_label(event.elevator()),
                floor_label(event)
            ),
            EventKind::ElevatorOutweight => {
                let capacity = event
                    .elevator()
                    .and_then(|id| building.elevator(id))
                    .map(|e| format!(" Capacity is {} kg,", e.capacity()))
                    .unwrap_or_default();
                format!(
                    "Elevator {} overloaded!{} passenger {} cannot board",
                    self.elevator_label(event.elevator()),
                    capacity,
                    self.passenger_label(event.passenger())
                )
            }
            EventKind::Invalid => format!(
                "Invalid event (elevator: {:?}, passenger: {:?}, floor: {:?})",
                event.elevator().map(|id| id.0),
                event.passenger().map(|id| id.0),
                event.floor().map(|id| id.0)
            ),
        }
    }

    fn elevator_label(&self, id: Option<ElevatorId>) -> String {
        match id {
            Some(id) => match self.building.elevator(id) {
                Some(elevator) => format!("{} (eid: {})", elevator.name(), id.0),
                None => format!("(eid: {})", id.0),
            },
            None => "<unknown>".to_string(),
        }
    }

    fn passenger_label(&self, id: Option<PassengerId>) -> String {
        match id {
            Some(id) => match self.building.passenger(id) {
                Some(passenger) => format!("{} (pid: {})", passenger.name(), id.0),
                None => format!("(pid: {})", id.0),
            },
            None => "<unknown>".to_string(),
        }
    }
}

fn floor_label(event: &ElevatorEvent) -> String {
    event
        .floor()
        .map(|id| id.0.to_string())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DispatchPolicy, ScenarioConfig};

    #[test]
    fn test_demo_scenario_renders_every_event() {
        let mut building = Building::from_scenario(&ScenarioConfig::default()).unwrap();
        let events = building.execute(DispatchPolicy::Fcfs).unwrap();
        let renderer = EventRenderer::new(&building);

        let lines: Vec<String> = events.iter().map(|e| renderer.render(e)).collect();
        assert_eq!(lines.len(), events.len());
        assert_eq!(
            lines[0],
            "[2023/01/01 08:00:00] Building (BLD_0) simulation started, floors -4 to 101 (no floor 0)"
        );
        assert!(lines[1].contains("arrived at floor 1 (average speed 2.5 m/s)"));
        assert!(lines
            .iter()
            .any(|l| l.contains("Passenger Alice (pid: 1) called elevator 0 (eid: 0) at floor 1")));
        assert!(lines.last().unwrap().contains("simulation finished after"));
    }

    #[test]
    fn test_write_all_one_line_per_event() {
        let mut building = Building::from_scenario(&ScenarioConfig::default()).unwrap();
        let events = building.execute(DispatchPolicy::Fcfs).unwrap();

        let mut out = Vec::new();
        EventRenderer::new(&building).write_all(&events, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), events.len());
    }
}
