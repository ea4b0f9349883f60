//! Random scenario generation
//!
//! Produces valid [`ScenarioConfig`]s for demonstrations and load testing: a
//! building with a basement, a two-car fleet and a day of passengers. Seeded
//! generators are fully reproducible.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

use crate::facility::elevator::ElevatorSpec;
use crate::passenger::PassengerSpec;
use crate::simulation::clock::{SimDuration, SimInstant};
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::{BuildingConfig, BuildingId, FloorId, ScenarioConfig};

const NAMES: [&str; 12] = [
    "Peter", "Dick", "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi", "Ivan", "Judy",
];

/// Seconds between the 08:00 start and the last possible appearance
const DAY_SPAN_SECS: i64 = 16 * 3600;

/// Share of passengers heavy enough to overload a car
const HEAVY_PASSENGER_CHANCE: f64 = 0.05;

/// Generator for random but valid scenarios
pub struct ScenarioGenerator {
    rng: Box<dyn rand::RngCore>,
}

impl fmt::Debug for ScenarioGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioGenerator").finish()
    }
}

impl Default for ScenarioGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioGenerator {
    /// Create a new scenario generator
    pub fn new() -> Self {
        Self { rng: Box::new(rand::thread_rng()) }
    }

    /// Create a new scenario generator with a specific seed for reproducible results
    pub fn with_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self { rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)) }
    }

    /// Generate a scenario with `passenger_count` passengers
    pub fn generate(&mut self, passenger_count: usize) -> SimulationResult<ScenarioConfig> {
        let building = self.generate_building()?;
        let elevators = self.generate_elevators();

        let floors: Vec<FloorId> = (building.lowest_floor..=building.highest_floor)
            .filter(|&n| n != 0)
            .map(FloorId)
            .collect();
        let passengers = (1..=passenger_count)
            .map(|id| self.generate_passenger(id as u32, building.start_time, &floors, &elevators))
            .collect::<SimulationResult<Vec<_>>>()?;

        info!(
            "Generated scenario: floors {}..={}, {} elevators, {} passengers",
            building.lowest_floor,
            building.highest_floor,
            elevators.len(),
            passengers.len()
        );

        Ok(ScenarioConfig {
            building,
            elevators,
            passengers,
        })
    }

    fn generate_building(&mut self) -> SimulationResult<BuildingConfig> {
        let (year, month, day) = (
            self.rng.gen_range(2000..=2025),
            self.rng.gen_range(1..=9),
            self.rng.gen_range(1..=9),
        );
        let start_time = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(8, 0, 0))
            .map(SimInstant::from_naive)
            .ok_or_else(|| {
                SimulationError::configuration_error(format!(
                    "Generated an invalid start date {}/{}/{}",
                    year, month, day
                ))
            })?;

        let mut floor_heights = BTreeMap::new();
        floor_heights.insert(1, f64::from(self.rng.gen_range(3_u32..=6)));

        let building = BuildingConfig {
            id: BuildingId(0),
            name: "random_test_building".to_string(),
            lowest_floor: self.rng.gen_range(-5..=-1),
            highest_floor: self.rng.gen_range(27..=101),
            default_floor_height: f64::from(self.rng.gen_range(3_u32..=5)),
            floor_heights,
            start_time,
        };
        debug!("Generated building starting at {}", building.start_time);
        Ok(building)
    }

    fn generate_elevators(&mut self) -> Vec<ElevatorSpec> {
        vec![
            ElevatorSpec::new(0)
                .with_name("Left")
                .with_capacity(self.rng.gen_range(800..=2000))
                .with_speed(f64::from(self.rng.gen_range(1_u32..=3))),
            ElevatorSpec::new(1)
                .with_name("Right")
                .with_capacity(self.rng.gen_range(1000..=2500))
                .with_speed(f64::from(self.rng.gen_range(1_u32..=3))),
        ]
    }

    fn generate_passenger(
        &mut self,
        id: u32,
        start: SimInstant,
        floors: &[FloorId],
        elevators: &[ElevatorSpec],
    ) -> SimulationResult<PassengerSpec> {
        let origin = *floors
            .choose(&mut self.rng)
            .ok_or_else(|| SimulationError::configuration_error("Building has no floors"))?;
        let destination = if floors.len() > 1 {
            loop {
                let candidate = floors[self.rng.gen_range(0..floors.len())];
                if candidate != origin {
                    break candidate;
                }
            }
        } else {
            origin
        };

        let weight = if self.rng.gen_bool(HEAVY_PASSENGER_CHANCE) {
            self.rng.gen_range(1500..=7000)
        } else {
            self.rng.gen_range(45..=140)
        };
        let appear_time = start + SimDuration::from_secs(self.rng.gen_range(0..DAY_SPAN_SECS));
        let elevator = elevators
            .choose(&mut self.rng)
            .map(|spec| spec.id)
            .ok_or_else(|| SimulationError::configuration_error("Scenario has no elevators"))?;
        let name = NAMES[self.rng.gen_range(0..NAMES.len())];

        Ok(PassengerSpec::new(id, weight, origin, destination, appear_time, elevator).with_name(name))
    }
}
