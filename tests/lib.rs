// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use elevator_dispatch_simulator::*;

mod cli_argument_parsing_tests;
mod event_ordering_tests;

#[test]
fn test_core_id_types() {
    assert_eq!(FloorId(3).to_string(), "3");
    assert_eq!(FloorId(-1).to_string(), "B1");
    assert_eq!(ElevatorId(0).to_string(), "ELV_0");
    assert_eq!(PassengerId(12).to_string(), "PAX_12");
    assert_eq!(BuildingId(4).to_string(), "BLD_4");

    assert!(!FloorId(0).is_valid());
    assert!(FloorId(-1).is_underground());
    assert!(!FloorId::LOBBY.is_underground());
}

#[test]
fn test_enum_types() {
    assert_eq!(EventKind::ALL.len(), 9);
    for kind in EventKind::ALL {
        let parsed: EventKind = kind.as_str().parse().unwrap();
        assert_eq!(parsed, kind);
    }

    assert!(EventKind::PassengerBoard.requires_passenger());
    assert!(!EventKind::Start.requires_elevator());

    assert_eq!("fcfs".parse::<DispatchPolicy>().unwrap(), DispatchPolicy::Fcfs);
    assert!(!"look".parse::<DispatchPolicy>().unwrap().is_supported());
    assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
}

#[test]
fn test_error_categories() {
    let refused = SimulationError::CapacityExceeded {
        elevator: ElevatorId(0),
        passenger: PassengerId(1),
        load: 1050,
        capacity: 1000,
    };
    assert!(refused.is_recoverable());
    assert!(!SimulationError::configuration_error("bad floor").is_recoverable());
    assert_ne!(refused.category(), SimulationError::AlreadyExecuted.category());
}
