//! Identifier handles for the dispatch simulator
//!
//! Entities never hold references to each other. They hold these small
//! copyable handles and resolve them through the owning [`Building`].
//!
//! [`Building`]: crate::facility::Building

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a floor. Negative ids are underground, zero never exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorId(pub i32);

impl FloorId {
    /// The ground-level lobby floor
    pub const LOBBY: FloorId = FloorId(1);

    /// Whether this id can name a real floor (zero is always excluded)
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Whether the floor lies below ground
    pub fn is_underground(self) -> bool {
        self.0 < 0
    }
}

impl From<i32> for FloorId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for FloorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_underground() {
            write!(f, "B{}", -self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Identifier of an elevator in the building's fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElevatorId(pub u32);

impl From<u32> for ElevatorId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ElevatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ELV_{}", self.0)
    }
}

/// Identifier of a passenger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassengerId(pub u32);

impl From<u32> for PassengerId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PAX_{}", self.0)
    }
}

/// Identifier of a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(pub u32);

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BLD_{}", self.0)
    }
}
