//! Building ownership and lifecycle
//!
//! The [`Building`] exclusively owns its floors, elevator fleet and
//! passengers. Structure is fixed at construction; passengers are appended
//! before the single run and never removed.

use tracing::{debug, info, instrument};

use crate::events::ElevatorEvent;
use crate::facility::elevator::{Elevator, ElevatorSpec};
use crate::facility::floor::FloorPlan;
use crate::passenger::{ArrivalQueue, Passenger, PassengerSpec};
use crate::simulation::clock::{SimClock, SimInstant, TimeHost};
use crate::simulation::dispatcher::FcfsDispatcher;
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::{BuildingConfig, BuildingId, DispatchPolicy, ElevatorId, FloorId, PassengerId, ScenarioConfig};

/// A building with its fleet and passengers
#[derive(Debug, Clone)]
pub struct Building {
    id: BuildingId,
    name: String,
    floors: FloorPlan,
    elevators: Vec<Elevator>,
    passengers: Vec<Passenger>,
    arrivals: ArrivalQueue,
    start: SimInstant,
    clock: SimClock,
    executed: bool,
}

impl Building {
    /// Create an empty building from its layout
    pub fn new(config: &BuildingConfig) -> SimulationResult<Self> {
        let mut floors = FloorPlan::from_range(
            config.lowest_floor,
            config.highest_floor,
            config.default_floor_height,
        )?;
        for (&floor, &height) in &config.floor_heights {
            floors.set_height(FloorId(floor), height)?;
        }

        Ok(Self {
            id: config.id,
            name: config.name.clone(),
            floors,
            elevators: Vec::new(),
            passengers: Vec::new(),
            arrivals: ArrivalQueue::new(),
            start: config.start_time,
            clock: SimClock::new(config.start_time),
            executed: false,
        })
    }

    /// Construct a building, its fleet and its passengers in one go
    #[instrument(skip(scenario), fields(building = %scenario.building.name))]
    pub fn from_scenario(scenario: &ScenarioConfig) -> SimulationResult<Self> {
        let mut building = Self::new(&scenario.building)?;
        for spec in &scenario.elevators {
            building.add_elevator(spec)?;
        }
        for spec in &scenario.passengers {
            building.add_passenger(spec)?;
        }
        info!(
            "Constructed {} with {} floors, {} elevators and {} passengers",
            building.name,
            building.floors.len(),
            building.elevators.len(),
            building.passengers.len()
        );
        Ok(building)
    }

    /// Add an elevator to the fleet
    pub fn add_elevator(&mut self, spec: &ElevatorSpec) -> SimulationResult<()> {
        self.ensure_not_executed()?;
        if self.elevator(spec.id).is_some() {
            return Err(SimulationError::configuration_error(format!(
                "Duplicate elevator id {}",
                spec.id
            )));
        }
        self.elevators.push(Elevator::new(spec, self.start)?);
        debug!("Added elevator {}", spec.id);
        Ok(())
    }

    /// Add a passenger and queue its arrival
    pub fn add_passenger(&mut self, spec: &PassengerSpec) -> SimulationResult<()> {
        self.ensure_not_executed()?;
        if self.passenger(spec.id).is_some() {
            return Err(SimulationError::configuration_error(format!(
                "Duplicate passenger id {}",
                spec.id
            )));
        }
        if spec.appear_time < self.start {
            return Err(SimulationError::configuration_error(format!(
                "Passenger {} appears at {}, before the simulation start {}",
                spec.id, spec.appear_time, self.start
            )));
        }
        if self.elevator(spec.elevator).is_none() {
            return Err(SimulationError::configuration_error(format!(
                "Passenger {} calls unknown elevator {}",
                spec.id, spec.elevator
            )));
        }
        for floor in [spec.origin, spec.destination] {
            if !self.floors.contains(floor) {
                return Err(SimulationError::configuration_error(format!(
                    "Passenger {} references floor {} outside the building",
                    spec.id, floor.0
                )));
            }
        }

        let passenger = Passenger::new(spec)?;
        self.arrivals.push(passenger.appear_time(), self.passengers.len());
        self.passengers.push(passenger);
        Ok(())
    }

    /// Run the simulation once and return the ordered event log
    #[instrument(skip(self), fields(building = %self.id))]
    pub fn execute(&mut self, policy: DispatchPolicy) -> SimulationResult<Vec<ElevatorEvent>> {
        self.ensure_not_executed()?;
        if !policy.is_supported() {
            return Err(SimulationError::UnsupportedPolicy(policy));
        }
        self.executed = true;

        info!(
            "Executing {} dispatch for {} passengers on {} elevators",
            policy,
            self.passengers.len(),
            self.elevators.len()
        );

        let order = self.arrivals.drain_ordered();
        let mut dispatcher = FcfsDispatcher::new(
            self.id,
            self.start,
            &self.floors,
            &mut self.elevators,
            &mut self.passengers,
        );
        dispatcher.open(&self.clock);
        dispatcher.park()?;
        for index in order {
            dispatcher.serve(index)?;
        }
        let events = dispatcher.close(&mut self.clock);

        info!("Simulation produced {} events", events.len());
        Ok(events)
    }

    fn ensure_not_executed(&self) -> SimulationResult<()> {
        if self.executed {
            Err(SimulationError::AlreadyExecuted)
        } else {
            Ok(())
        }
    }

    /// Building identifier
    pub fn id(&self) -> BuildingId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Simulation start instant
    pub fn start_time(&self) -> SimInstant {
        self.start
    }

    /// Whether the building already ran
    pub fn is_executed(&self) -> bool {
        self.executed
    }

    /// Floor layout
    pub fn floors(&self) -> &FloorPlan {
        &self.floors
    }

    /// Fleet in fleet order
    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    /// Passengers in insertion order
    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    /// Look up an elevator by id
    pub fn elevator(&self, id: ElevatorId) -> Option<&Elevator> {
        self.elevators.iter().find(|e| e.id() == id)
    }

    /// Look up a passenger by id
    pub fn passenger(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.iter().find(|p| p.id() == id)
    }
}

impl TimeHost for Building {
    fn clock(&self) -> &SimClock {
        &self.clock
    }
}
