//! Scenario descriptions
//!
//! A [`ScenarioConfig`] is everything needed to construct a building and run
//! it: the floors, the fleet and the passengers. It is plain data and loads
//! from JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::facility::elevator::ElevatorSpec;
use crate::facility::floor::DEFAULT_FLOOR_HEIGHT;
use crate::passenger::PassengerSpec;
use crate::simulation::clock::{SimDuration, SimInstant};
use crate::types::config::ConfigError;
use crate::types::BuildingId;

/// Building layout and simulation start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingConfig {
    /// Building identifier
    #[serde(default)]
    pub id: BuildingId,
    /// Display name
    #[serde(default = "default_building_name")]
    pub name: String,
    /// Lowest floor number (inclusive)
    pub lowest_floor: i32,
    /// Highest floor number (inclusive)
    pub highest_floor: i32,
    /// Story height used for floors without an override
    #[serde(default = "default_floor_height")]
    pub default_floor_height: f64,
    /// Per-floor story height overrides
    #[serde(default)]
    pub floor_heights: BTreeMap<i32, f64>,
    /// Simulation start
    pub start_time: SimInstant,
}

fn default_building_name() -> String {
    "Building".to_string()
}

fn default_floor_height() -> f64 {
    DEFAULT_FLOOR_HEIGHT
}

impl Default for BuildingConfig {
    fn default() -> Self {
        let mut floor_heights = BTreeMap::new();
        floor_heights.insert(1, 5.0);
        Self {
            id: BuildingId(0),
            name: default_building_name(),
            lowest_floor: -4,
            highest_floor: 101,
            default_floor_height: DEFAULT_FLOOR_HEIGHT,
            floor_heights,
            // 2023/01/01 08:00:00 UTC
            start_time: SimInstant::from_micros(1_672_560_000_000_000),
        }
    }
}

/// A complete scenario: building, fleet and passengers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Building layout
    pub building: BuildingConfig,
    /// Elevator fleet in fleet order
    pub elevators: Vec<ElevatorSpec>,
    /// Passengers in insertion order
    #[serde(default)]
    pub passengers: Vec<PassengerSpec>,
}

impl Default for ScenarioConfig {
    /// The demonstration scenario: two fast cars in a tall building and two
    /// morning trips
    fn default() -> Self {
        let building = BuildingConfig::default();
        let start = building.start_time;
        let elevators = (0..2)
            .map(|id| ElevatorSpec::new(id).with_speed(2.5).with_capacity(1000))
            .collect();
        let passengers = vec![
            PassengerSpec::new(1, 70, 1, 5, start + SimDuration::from_secs(10), 0).with_name("Alice"),
            PassengerSpec::new(2, 80, 2, 6, start + SimDuration::from_secs(320), 1).with_name("Bob"),
        ];
        Self {
            building,
            elevators,
            passengers,
        }
    }
}

impl ScenarioConfig {
    /// Load a scenario from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the scenario to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.print_json()?)?;
        Ok(())
    }

    /// Print the scenario as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
