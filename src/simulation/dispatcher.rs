//! First-come-first-served dispatch engine
//!
//! The dispatcher walks passengers in arrival order. For each one it mutates
//! the requested elevator and the passenger through their explicit
//! transitions, then asks the [`EventFactory`] for events describing what
//! happened. Once every passenger is done the log is stably sorted by time
//! and closed with an end event.

use tracing::{debug, instrument, warn};

use crate::events::{ElevatorEvent, EventFactory, EventRefs};
use crate::facility::elevator::Elevator;
use crate::facility::floor::FloorPlan;
use crate::facility::parking::parking_floors;
use crate::passenger::Passenger;
use crate::simulation::clock::{SimClock, SimInstant, TimeHost};
use crate::simulation::error::SimulationResult;
use crate::types::{BuildingId, PassengerOutcome};

/// One FCFS run over a building's fleet and passengers
#[derive(Debug)]
pub struct FcfsDispatcher<'a> {
    factory: EventFactory,
    floors: &'a FloorPlan,
    elevators: &'a mut [Elevator],
    passengers: &'a mut [Passenger],
    events: Vec<ElevatorEvent>,
}

impl<'a> FcfsDispatcher<'a> {
    /// Borrow the building's parts for a run starting at `start`
    pub fn new(
        building: BuildingId,
        start: SimInstant,
        floors: &'a FloorPlan,
        elevators: &'a mut [Elevator],
        passengers: &'a mut [Passenger],
    ) -> Self {
        Self {
            factory: EventFactory::new(building, start),
            floors,
            elevators,
            passengers,
            events: Vec::new(),
        }
    }

    /// Emit the start event from the building clock
    pub fn open(&mut self, building_clock: &SimClock) {
        self.events.push(self.factory.start(building_clock));
    }

    /// Place every elevator at its parking floor
    #[instrument(skip(self), fields(elevators = self.elevators.len()))]
    pub fn park(&mut self) -> SimulationResult<()> {
        let targets = parking_floors(self.elevators.len(), &self.floors.ids());
        for (elevator, floor) in self.elevators.iter_mut().zip(targets) {
            elevator.move_to(floor);
            debug!("Parked elevator {} at floor {}", elevator.id(), floor);
            self.events.push(self.factory.elevator_arrive(&*elevator, elevator.id(), floor));
            self.events.push(self.factory.elevator_idle(&*elevator, elevator.id()));
        }
        Ok(())
    }

    /// Serve the passenger stored at `index`
    #[instrument(skip(self))]
    pub fn serve(&mut self, index: usize) -> SimulationResult<()> {
        let factory = self.factory;
        let floors = self.floors;
        let Some(passenger) = self.passengers.get_mut(index) else {
            warn!("No passenger stored at index {}", index);
            return Ok(());
        };
        let requested = passenger.requested_elevator();
        let Some(elevator) = self.elevators.iter_mut().find(|e| e.id() == requested) else {
            warn!(
                "Skipping passenger {}: elevator {} does not exist",
                passenger.id(),
                requested
            );
            return Ok(());
        };
        let events = &mut self.events;
        let (origin, destination) = (passenger.origin(), passenger.destination());

        // A car that sat idle past its threshold reports parking before the call
        if elevator.is_idle() && elevator.idle_timeout_elapsed(passenger.appear_time()) {
            let threshold = elevator.idle_threshold();
            elevator.clock_mut().advance(threshold)?;
            events.push(factory.elevator_idle(&*elevator, elevator.id()));
            elevator.wake();
        }

        events.push(factory.call_elevator(&*passenger, elevator.id(), passenger.id(), origin));

        if !elevator.can_carry(passenger.weight()) {
            crate::sim_event!(
                info,
                "passenger refused for overload",
                passenger = passenger.id().0,
                weight = passenger.weight(),
                elevator = elevator.id().0,
                load = elevator.current_weight(),
                capacity = elevator.capacity(),
            );
            events.push(factory.elevator_outweight(&*passenger, elevator.id(), passenger.id()));
            passenger.finish(PassengerOutcome::Unserved)?;
            return Ok(());
        }

        if elevator.current_floor() != origin {
            elevator.clock_mut().sync_from(passenger.clock());
            let distance = floors.distance(elevator.current_floor(), origin)?;
            let travel = elevator.travel_time(distance);
            elevator.clock_mut().advance(travel)?;
            elevator.move_to(origin);
            events.push(factory.elevator_arrive(&*elevator, elevator.id(), origin));
        }

        passenger.clock_mut().sync_from(elevator.clock());
        elevator.try_board(passenger)?;
        events.push(factory.passenger_board(&*passenger, elevator.id(), passenger.id(), origin));

        elevator.clock_mut().sync_from(passenger.clock());
        let distance = floors.distance(origin, destination)?;
        let travel = elevator.travel_time(distance);
        elevator.clock_mut().advance(travel)?;
        elevator.move_to(destination);
        events.push(factory.elevator_arrive(&*elevator, elevator.id(), destination));

        passenger.clock_mut().sync_from(elevator.clock());
        match elevator.try_alight(passenger) {
            Ok(()) => {
                events.push(factory.passenger_alight(&*elevator, elevator.id(), passenger.id(), destination));
                passenger.finish(PassengerOutcome::Served)?;
                debug!(
                    "Passenger {} delivered {} -> {} by {} at {}",
                    passenger.id(),
                    origin,
                    destination,
                    elevator.id(),
                    elevator.now()
                );
            }
            Err(err) => {
                warn!("Alighting failed: {}", err);
                let refs = EventRefs::none()
                    .elevator(elevator.id())
                    .passenger(passenger.id())
                    .floor(destination);
                events.push(factory.invalid(&*elevator, refs));
                passenger.finish(PassengerOutcome::Unserved)?;
            }
        }
        Ok(())
    }

    /// Order the log, bring the building clock to the last instant and
    /// append the end event
    pub fn close(mut self, building_clock: &mut SimClock) -> Vec<ElevatorEvent> {
        // sort_by_key is stable: simultaneous events keep emission order
        self.events.sort_by_key(|event| event.time);
        let start = self.factory.start_time();
        for event in &mut self.events {
            event.elapsed = event.time.since(start);
        }
        if let Some(last) = self.events.last() {
            building_clock.set_to(last.time);
        }
        self.events.push(self.factory.end(&*building_clock));
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::elevator::ElevatorSpec;
    use crate::passenger::PassengerSpec;
    use crate::simulation::clock::SimDuration;
    use crate::types::{ElevatorId, EventKind, FloorId, PassengerId};

    struct Fixture {
        start: SimInstant,
        floors: FloorPlan,
        elevators: Vec<Elevator>,
        passengers: Vec<Passenger>,
    }

    impl Fixture {
        fn new(elevators: &[ElevatorSpec]) -> Self {
            let start = SimInstant::parse("2023/01/01 08:00:00").unwrap();
            let mut floors = FloorPlan::from_range(1, 10, 3.0).unwrap();
            floors.set_height(FloorId(1), 5.0).unwrap();
            let elevators = elevators.iter().map(|s| Elevator::new(s, start).unwrap()).collect();
            Self {
                start,
                floors,
                elevators,
                passengers: Vec::new(),
            }
        }

        fn passenger(mut self, id: u32, weight: u32, from: i32, to: i32, after_secs: i64) -> Self {
            let appear = self.start + SimDuration::from_secs(after_secs);
            let spec = PassengerSpec::new(id, weight, from, to, appear, 0);
            self.passengers.push(Passenger::new(&spec).unwrap());
            self
        }

        fn run(&mut self) -> Vec<ElevatorEvent> {
            let mut clock = SimClock::new(self.start);
            let count = self.passengers.len();
            let mut dispatcher = FcfsDispatcher::new(
                BuildingId(0),
                self.start,
                &self.floors,
                &mut self.elevators,
                &mut self.passengers,
            );
            dispatcher.open(&clock);
            dispatcher.park().unwrap();
            for index in 0..count {
                dispatcher.serve(index).unwrap();
            }
            dispatcher.close(&mut clock)
        }
    }

    fn kinds(events: &[ElevatorEvent]) -> Vec<EventKind> {
        events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_single_trip_timeline() {
        // One car parks at floor 5 (midpoint of 1..10)
        let mut fixture = Fixture::new(&[ElevatorSpec::new(0).with_speed(2.0)]).passenger(1, 70, 1, 5, 10);
        let events = fixture.run();

        assert_eq!(
            kinds(&events),
            vec![
                EventKind::Start,
                EventKind::ElevatorArrive,
                EventKind::ElevatorIdle,
                EventKind::CallElevator,
                EventKind::ElevatorArrive,
                EventKind::PassengerBoard,
                EventKind::ElevatorArrive,
                EventKind::PassengerAlight,
                EventKind::End,
            ]
        );

        // 5 -> 1 is 14 m at 2 m/s, then back up again
        let t0 = fixture.start;
        assert_eq!(events[4].time, t0 + SimDuration::from_secs(17));
        assert_eq!(events[5].time, t0 + SimDuration::from_secs(17));
        assert_eq!(events[6].time, t0 + SimDuration::from_secs(24));
        assert_eq!(events[7].time, t0 + SimDuration::from_secs(24));
        assert_eq!(events[8].elapsed, SimDuration::from_secs(24));

        let car = &fixture.elevators[0];
        assert_eq!(car.current_floor(), FloorId(5));
        assert!(car.is_idle());
        assert_eq!(car.last_active(), t0 + SimDuration::from_secs(24));
        assert_eq!(fixture.passengers[0].outcome(), Some(PassengerOutcome::Served));
    }

    #[test]
    fn test_overweight_passenger_unserved() {
        let mut fixture =
            Fixture::new(&[ElevatorSpec::new(0).with_capacity(100)]).passenger(1, 150, 1, 5, 10);
        let events = fixture.run();

        let kinds = kinds(&events);
        let call = kinds.iter().position(|k| *k == EventKind::CallElevator).unwrap();
        assert_eq!(kinds[call + 1], EventKind::ElevatorOutweight);
        assert!(!kinds.contains(&EventKind::PassengerBoard));
        assert!(!kinds.contains(&EventKind::PassengerAlight));
        assert_eq!(fixture.passengers[0].outcome(), Some(PassengerOutcome::Unserved));
        assert_eq!(fixture.elevators[0].current_weight(), 0);
    }

    #[test]
    fn test_idle_timeout_precedes_next_call() {
        let spec = ElevatorSpec::new(0).with_speed(2.0).with_idle_threshold_secs(300.0);
        // First trip finishes at +24s; second passenger appears 400 s later
        let mut fixture = Fixture::new(&[spec])
            .passenger(1, 70, 1, 5, 10)
            .passenger(2, 70, 5, 1, 424);
        let events = fixture.run();

        let second_call = events
            .iter()
            .position(|e| e.kind == EventKind::CallElevator && e.passenger() == Some(PassengerId(2)))
            .unwrap();
        let idle = &events[second_call - 1];
        assert_eq!(idle.kind, EventKind::ElevatorIdle);
        assert_eq!(idle.elevator(), Some(ElevatorId(0)));
        assert_eq!(idle.time, fixture.start + SimDuration::from_secs(324));
    }

    #[test]
    fn test_no_idle_event_within_threshold() {
        let spec = ElevatorSpec::new(0).with_speed(2.0).with_idle_threshold_secs(300.0);
        let mut fixture = Fixture::new(&[spec])
            .passenger(1, 70, 1, 5, 10)
            .passenger(2, 70, 5, 1, 100);
        let events = fixture.run();

        let idles = events.iter().filter(|e| e.kind == EventKind::ElevatorIdle).count();
        // Only the parking idle
        assert_eq!(idles, 1);
    }

    #[test]
    fn test_busy_elevator_serves_late_caller_after_finishing() {
        let spec = ElevatorSpec::new(0).with_speed(1.0);
        // First trip 1 -> 10 takes 5 + 8*3 = 29 s of travel
        let mut fixture = Fixture::new(&[spec])
            .passenger(1, 70, 1, 10, 0)
            .passenger(2, 70, 10, 1, 5);
        let events = fixture.run();

        let board_two = events
            .iter()
            .find(|e| e.kind == EventKind::PassengerBoard && e.passenger() == Some(PassengerId(2)))
            .unwrap();
        let alight_one = events
            .iter()
            .find(|e| e.kind == EventKind::PassengerAlight && e.passenger() == Some(PassengerId(1)))
            .unwrap();
        assert!(board_two.time >= alight_one.time);
    }

    #[test]
    fn test_log_sorted_and_bracketed() {
        let spec = ElevatorSpec::new(0).with_speed(1.5);
        let mut fixture = Fixture::new(&[spec])
            .passenger(1, 70, 2, 9, 0)
            .passenger(2, 90, 3, 1, 1)
            .passenger(3, 60, 8, 4, 2);
        let events = fixture.run();

        assert_eq!(events.first().map(|e| e.kind), Some(EventKind::Start));
        assert_eq!(events.last().map(|e| e.kind), Some(EventKind::End));
        assert!(events.windows(2).all(|w| w[0].elapsed <= w[1].elapsed));
        let max = events.iter().map(|e| e.elapsed).max().unwrap();
        assert_eq!(events.last().unwrap().elapsed, max);
        assert!(fixture.passengers.iter().all(|p| p.is_processed()));
    }
}
