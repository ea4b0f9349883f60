//! Elevator cars and their local invariants
//!
//! An [`Elevator`] only knows its own state. It never looks at the building;
//! the dispatcher resolves floors and distances and then asks the elevator to
//! commit a transition.

use serde::{Deserialize, Serialize};

use crate::facility::floor::DEFAULT_FLOOR_HEIGHT;
use crate::passenger::Passenger;
use crate::simulation::clock::{SimClock, SimDuration, SimInstant, TimeHost};
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::{ElevatorId, FloorId, PassengerId};

/// Default idle threshold in seconds
pub const DEFAULT_IDLE_THRESHOLD_SECS: f64 = 300.0;

/// Static description of an elevator, as read from a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevatorSpec {
    /// Fleet-unique identifier
    pub id: ElevatorId,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Rated capacity in kilograms
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    /// Average travel speed in meters per second
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Seconds without activity before the car counts as parked
    #[serde(default = "default_idle_threshold")]
    pub idle_threshold_secs: f64,
    /// Car height in meters (informational)
    #[serde(default = "default_car_height")]
    pub car_height: f64,
}

fn default_capacity() -> u32 {
    1000
}

fn default_speed() -> f64 {
    1.0
}

fn default_idle_threshold() -> f64 {
    DEFAULT_IDLE_THRESHOLD_SECS
}

fn default_car_height() -> f64 {
    DEFAULT_FLOOR_HEIGHT
}

impl ElevatorSpec {
    /// Create a spec with default speed, capacity and thresholds
    pub fn new(id: impl Into<ElevatorId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            capacity: default_capacity(),
            speed: default_speed(),
            idle_threshold_secs: default_idle_threshold(),
            car_height: default_car_height(),
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the rated capacity
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the travel speed
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Set the idle threshold
    pub fn with_idle_threshold_secs(mut self, secs: f64) -> Self {
        self.idle_threshold_secs = secs;
        self
    }

    /// Reject specs the dispatcher could not run
    pub fn validate(&self) -> SimulationResult<()> {
        if self.capacity == 0 {
            return Err(SimulationError::configuration_error(format!(
                "Elevator {} must have a positive capacity",
                self.id
            )));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(SimulationError::configuration_error(format!(
                "Elevator {} must have a positive speed, got {}",
                self.id, self.speed
            )));
        }
        if !(self.idle_threshold_secs.is_finite() && self.idle_threshold_secs >= 0.0) {
            return Err(SimulationError::configuration_error(format!(
                "Elevator {} has an invalid idle threshold {}",
                self.id, self.idle_threshold_secs
            )));
        }
        Ok(())
    }
}

/// An elevator car with its manifest and clock
#[derive(Debug, Clone)]
pub struct Elevator {
    id: ElevatorId,
    name: String,
    capacity: u32,
    speed: f64,
    car_height: f64,
    idle_threshold: SimDuration,
    current_floor: FloorId,
    current_weight: u32,
    manifest: Vec<(PassengerId, u32)>,
    waiting: Vec<PassengerId>,
    last_active: SimInstant,
    idle: bool,
    clock: SimClock,
}

impl Elevator {
    /// Create an idle elevator in the lobby, its clock anchored at `anchor`
    pub fn new(spec: &ElevatorSpec, anchor: SimInstant) -> SimulationResult<Self> {
        spec.validate()?;
        Ok(Self {
            id: spec.id,
            name: spec.name.clone().unwrap_or_else(|| spec.id.0.to_string()),
            capacity: spec.capacity,
            speed: spec.speed,
            car_height: spec.car_height,
            idle_threshold: SimDuration::from_secs_f64(spec.idle_threshold_secs),
            current_floor: FloorId::LOBBY,
            current_weight: 0,
            manifest: Vec::new(),
            waiting: Vec::new(),
            last_active: anchor,
            idle: true,
            clock: SimClock::new(anchor),
        })
    }

    /// Fleet-unique identifier
    pub fn id(&self) -> ElevatorId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rated capacity in kilograms
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Travel speed in meters per second
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Car height in meters
    pub fn car_height(&self) -> f64 {
        self.car_height
    }

    /// Idle threshold
    pub fn idle_threshold(&self) -> SimDuration {
        self.idle_threshold
    }

    /// Floor the car is currently at
    pub fn current_floor(&self) -> FloorId {
        self.current_floor
    }

    /// Total weight of the manifest
    pub fn current_weight(&self) -> u32 {
        self.current_weight
    }

    /// Passengers aboard, in boarding order
    pub fn manifest(&self) -> impl Iterator<Item = PassengerId> + '_ {
        self.manifest.iter().map(|(id, _)| *id)
    }

    /// Whether the passenger is aboard
    pub fn is_aboard(&self, passenger: PassengerId) -> bool {
        self.manifest.iter().any(|(id, _)| *id == passenger)
    }

    /// Passengers assigned but not yet boarded
    pub fn waiting(&self) -> &[PassengerId] {
        &self.waiting
    }

    /// When the car last became empty
    pub fn last_active(&self) -> SimInstant {
        self.last_active
    }

    /// Whether the car is idle
    pub fn is_idle(&self) -> bool {
        self.idle
    }

    /// Mutable access to the car's clock
    pub fn clock_mut(&mut self) -> &mut SimClock {
        &mut self.clock
    }

    /// Travel time for a vertical distance at this car's speed
    pub fn travel_time(&self, distance: f64) -> SimDuration {
        SimDuration::from_secs_f64(distance / self.speed)
    }

    /// Whether `weight` more kilograms fit within capacity
    pub fn can_carry(&self, weight: u32) -> bool {
        self.current_weight.saturating_add(weight) <= self.capacity
    }

    /// Whether `now` is at least one idle threshold past the last activity
    pub fn idle_timeout_elapsed(&self, now: SimInstant) -> bool {
        now.since(self.last_active) >= self.idle_threshold
    }

    /// Place the car at `floor` (parking and travel both end here)
    pub fn move_to(&mut self, floor: FloorId) {
        self.current_floor = floor;
    }

    /// Clear the idle flag after an idle timeout has been reported
    pub fn wake(&mut self) {
        self.idle = false;
    }

    /// Board `passenger` if it fits; otherwise change nothing
    pub fn try_board(&mut self, passenger: &mut Passenger) -> SimulationResult<()> {
        if self.is_aboard(passenger.id()) {
            return Err(SimulationError::invalid_transition(format!(
                "Passenger {} is already aboard elevator {}",
                passenger.id(),
                self.id
            )));
        }
        if !self.can_carry(passenger.weight()) {
            return Err(SimulationError::CapacityExceeded {
                elevator: self.id,
                passenger: passenger.id(),
                load: self.current_weight.saturating_add(passenger.weight()),
                capacity: self.capacity,
            });
        }

        self.manifest.push((passenger.id(), passenger.weight()));
        self.current_weight += passenger.weight();
        self.idle = false;
        passenger.set_on_board(true);
        Ok(())
    }

    /// Let `passenger` off. An emptied car goes idle as of the passenger's clock.
    pub fn try_alight(&mut self, passenger: &mut Passenger) -> SimulationResult<()> {
        let Some(position) = self.manifest.iter().position(|(id, _)| *id == passenger.id()) else {
            return Err(SimulationError::invalid_transition(format!(
                "Passenger {} is not aboard elevator {}",
                passenger.id(),
                self.id
            )));
        };

        let (_, weight) = self.manifest.remove(position);
        self.current_weight -= weight;
        passenger.set_on_board(false);
        if self.manifest.is_empty() {
            self.idle = true;
            self.last_active = passenger.now();
        }
        Ok(())
    }

    /// Reserve the passenger for a later pickup
    pub fn assign_waiting(&mut self, passenger: PassengerId) {
        if !self.waiting.contains(&passenger) {
            self.waiting.push(passenger);
        }
    }

    /// Drop a pickup reservation
    pub fn release_waiting(&mut self, passenger: PassengerId) {
        self.waiting.retain(|id| *id != passenger);
    }
}

impl TimeHost for Elevator {
    fn clock(&self) -> &SimClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passenger::PassengerSpec;

    fn start() -> SimInstant {
        SimInstant::parse("2023/01/01 08:00:00").unwrap()
    }

    fn elevator(capacity: u32) -> Elevator {
        Elevator::new(&ElevatorSpec::new(0).with_capacity(capacity), start()).unwrap()
    }

    fn passenger(id: u32, weight: u32) -> Passenger {
        let spec = PassengerSpec::new(id, weight, 1, 5, start() + SimDuration::from_secs(10), 0);
        Passenger::new(&spec).unwrap()
    }

    #[test]
    fn test_new_elevator_is_idle_in_lobby() {
        let car = elevator(1000);
        assert!(car.is_idle());
        assert_eq!(car.current_floor(), FloorId::LOBBY);
        assert_eq!(car.last_active(), start());
        assert_eq!(car.name(), "0");
    }

    #[test]
    fn test_invalid_specs_rejected() {
        assert!(Elevator::new(&ElevatorSpec::new(1).with_capacity(0), start()).is_err());
        assert!(Elevator::new(&ElevatorSpec::new(1).with_speed(0.0), start()).is_err());
        assert!(Elevator::new(&ElevatorSpec::new(1).with_idle_threshold_secs(-1.0), start()).is_err());
        assert!(Elevator::new(&ElevatorSpec::new(1).with_idle_threshold_secs(f64::NAN), start()).is_err());
    }

    #[test]
    fn test_car_height_is_not_validated() {
        let mut spec = ElevatorSpec::new(1);
        spec.car_height = 0.0;
        let car = Elevator::new(&spec, start()).unwrap();
        assert_eq!(car.car_height(), 0.0);
    }

    #[test]
    fn test_board_within_capacity() {
        let mut car = elevator(150);
        let mut rider = passenger(1, 70);

        car.try_board(&mut rider).unwrap();
        assert!(rider.is_on_board());
        assert!(!car.is_idle());
        assert_eq!(car.current_weight(), 70);
        assert_eq!(car.manifest().collect::<Vec<_>>(), vec![PassengerId(1)]);

        let mut second = passenger(2, 80);
        car.try_board(&mut second).unwrap();
        assert_eq!(car.current_weight(), 150);
    }

    #[test]
    fn test_board_over_capacity_has_no_side_effect() {
        let mut car = elevator(100);
        let mut heavy = passenger(1, 150);

        let err = car.try_board(&mut heavy).unwrap_err();
        assert!(matches!(err, SimulationError::CapacityExceeded { load: 150, capacity: 100, .. }));
        assert!(!heavy.is_on_board());
        assert!(car.is_idle());
        assert_eq!(car.current_weight(), 0);
        assert_eq!(car.manifest().count(), 0);
    }

    #[test]
    fn test_alight_last_passenger_goes_idle() {
        let mut car = elevator(1000);
        let mut rider = passenger(1, 70);
        car.try_board(&mut rider).unwrap();

        rider.clock_mut().advance(SimDuration::from_secs(42)).unwrap();
        car.try_alight(&mut rider).unwrap();

        assert!(car.is_idle());
        assert!(!rider.is_on_board());
        assert_eq!(car.current_weight(), 0);
        assert_eq!(car.last_active(), rider.now());
    }

    #[test]
    fn test_alight_not_aboard_is_invalid() {
        let mut car = elevator(1000);
        let mut stranger = passenger(9, 70);
        let err = car.try_alight(&mut stranger).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidTransition(_)));
        assert!(car.is_idle());
    }

    #[test]
    fn test_travel_time_uses_speed() {
        let car = Elevator::new(&ElevatorSpec::new(0).with_speed(2.5), start()).unwrap();
        assert_eq!(car.travel_time(14.0), SimDuration::from_secs_f64(5.6));
    }

    #[test]
    fn test_idle_timeout_threshold_is_inclusive() {
        let car = Elevator::new(&ElevatorSpec::new(0).with_idle_threshold_secs(300.0), start()).unwrap();
        assert!(!car.idle_timeout_elapsed(start() + SimDuration::from_secs(299)));
        assert!(car.idle_timeout_elapsed(start() + SimDuration::from_secs(300)));
    }

    #[test]
    fn test_waiting_list_reservations() {
        let mut car = elevator(1000);
        car.assign_waiting(PassengerId(4));
        car.assign_waiting(PassengerId(4));
        assert_eq!(car.waiting(), &[PassengerId(4)]);
        car.release_waiting(PassengerId(4));
        assert!(car.waiting().is_empty());
    }
}
