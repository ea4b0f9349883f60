//! Enumeration types for the dispatch simulator
//!
//! This module contains the event kinds, dispatch policies, passenger
//! outcomes and output formats used throughout the simulation system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of events recorded on the simulation timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Simulation started
    Start,
    /// A passenger called an elevator
    CallElevator,
    /// An elevator arrived at a floor
    ElevatorArrive,
    /// A passenger boarded an elevator
    PassengerBoard,
    /// A passenger left an elevator
    PassengerAlight,
    /// An elevator went idle
    ElevatorIdle,
    /// A boarding was refused because it would exceed capacity
    ElevatorOutweight,
    /// Simulation finished
    End,
    /// An inconsistent transition was attempted
    Invalid,
}

impl EventKind {
    /// Every kind, in declaration order
    pub const ALL: [EventKind; 9] = [
        EventKind::Start,
        EventKind::CallElevator,
        EventKind::ElevatorArrive,
        EventKind::PassengerBoard,
        EventKind::PassengerAlight,
        EventKind::ElevatorIdle,
        EventKind::ElevatorOutweight,
        EventKind::End,
        EventKind::Invalid,
    ];

    /// Wire name of the kind, as used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::CallElevator => "call_elevator",
            EventKind::ElevatorArrive => "elevator_arrive",
            EventKind::PassengerBoard => "passenger_board",
            EventKind::PassengerAlight => "passenger_alight",
            EventKind::ElevatorIdle => "elevator_idle",
            EventKind::ElevatorOutweight => "elevator_outweight",
            EventKind::End => "end",
            EventKind::Invalid => "invalid",
        }
    }

    /// Whether an event of this kind must reference an elevator
    pub fn requires_elevator(&self) -> bool {
        matches!(
            self,
            EventKind::CallElevator
                | EventKind::ElevatorArrive
                | EventKind::PassengerBoard
                | EventKind::PassengerAlight
                | EventKind::ElevatorIdle
                | EventKind::ElevatorOutweight
        )
    }

    /// Whether an event of this kind must reference a passenger
    pub fn requires_passenger(&self) -> bool {
        matches!(
            self,
            EventKind::CallElevator
                | EventKind::PassengerBoard
                | EventKind::PassengerAlight
                | EventKind::ElevatorOutweight
        )
    }

    /// Whether an event of this kind must reference a floor
    pub fn requires_floor(&self) -> bool {
        matches!(
            self,
            EventKind::CallElevator
                | EventKind::ElevatorArrive
                | EventKind::PassengerBoard
                | EventKind::PassengerAlight
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace([' ', '-'], "_");
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("Unknown event kind: {}", s))
    }
}

/// Dispatch policies the building can be asked to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchPolicy {
    /// First-come-first-served
    #[default]
    Fcfs,
    /// Shortest seek time first (not implemented)
    Sstf,
    /// Directional scan (not implemented)
    Look,
}

impl DispatchPolicy {
    /// Whether the dispatcher has an implementation for this policy
    pub fn is_supported(&self) -> bool {
        matches!(self, DispatchPolicy::Fcfs)
    }
}

impl fmt::Display for DispatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchPolicy::Fcfs => write!(f, "FCFS"),
            DispatchPolicy::Sstf => write!(f, "SSTF"),
            DispatchPolicy::Look => write!(f, "LOOK"),
        }
    }
}

impl FromStr for DispatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" | "first-come-first-served" => Ok(DispatchPolicy::Fcfs),
            "sstf" | "shortest-seek-time-first" => Ok(DispatchPolicy::Sstf),
            "look" | "scan" => Ok(DispatchPolicy::Look),
            _ => Err(format!("Unknown dispatch policy: {}", s)),
        }
    }
}

/// Terminal state of a processed passenger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassengerOutcome {
    /// Boarded and alighted at the destination
    Served,
    /// Refused at boarding because of overload
    Unserved,
}

impl fmt::Display for PassengerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassengerOutcome::Served => write!(f, "Served"),
            PassengerOutcome::Unserved => write!(f, "Unserved"),
        }
    }
}

/// Output format options for the event timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per event
    #[default]
    Text,
    /// A single JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSON Lines"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" | "json-lines" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
