//! Tests for event log ordering and determinism
//!
//! Every run must produce a log that starts with a single start event, ends
//! with a single end event at the latest instant, and never goes backwards in
//! time in between. The same scenario must always produce the same log.

use elevator_dispatch_simulator::events::{ElevatorEvent, EventRenderer};
use elevator_dispatch_simulator::facility::Building;
use elevator_dispatch_simulator::simulation::ScenarioGenerator;
use elevator_dispatch_simulator::types::{DispatchPolicy, EventKind, ScenarioConfig};

fn run(scenario: &ScenarioConfig) -> (Building, Vec<ElevatorEvent>) {
    let mut building = Building::from_scenario(scenario).unwrap();
    let events = building.execute(DispatchPolicy::Fcfs).unwrap();
    (building, events)
}

fn assert_well_ordered(events: &[ElevatorEvent]) {
    assert_eq!(events.first().map(|e| e.kind), Some(EventKind::Start));
    assert_eq!(events.last().map(|e| e.kind), Some(EventKind::End));
    assert_eq!(events.iter().filter(|e| e.is_bracket()).count(), 2);

    for pair in events.windows(2) {
        assert!(
            pair[0].elapsed <= pair[1].elapsed,
            "{} at {} precedes {} at {}",
            pair[0].kind,
            pair[0].elapsed,
            pair[1].kind,
            pair[1].elapsed
        );
        assert!(pair[0].time <= pair[1].time);
    }

    let latest = events.iter().map(|e| e.elapsed).max().unwrap();
    assert_eq!(events.last().unwrap().elapsed, latest);
}

#[test]
fn test_demo_log_is_ordered() {
    let (_, events) = run(&ScenarioConfig::default());
    assert_well_ordered(&events);
}

#[test]
fn test_generated_logs_are_ordered() {
    for seed in 0..20 {
        let scenario = ScenarioGenerator::with_seed(seed).generate(40).unwrap();
        let (building, events) = run(&scenario);
        assert_well_ordered(&events);
        assert!(building.passengers().iter().all(|p| p.is_processed()));
    }
}

#[test]
fn test_elapsed_matches_absolute_time() {
    let scenario = ScenarioGenerator::with_seed(11).generate(25).unwrap();
    let (building, events) = run(&scenario);
    for event in &events {
        assert_eq!(event.elapsed, event.time.since(building.start_time()));
        assert_eq!(event.building, building.id());
    }
}

#[test]
fn test_same_scenario_same_log() {
    let scenario = ScenarioGenerator::with_seed(99).generate(60).unwrap();
    let (first_building, first) = run(&scenario);
    let (second_building, second) = run(&scenario);
    assert_eq!(first, second);

    // Rendering is deterministic too
    let mut first_text = Vec::new();
    let mut second_text = Vec::new();
    EventRenderer::new(&first_building).write_all(&first, &mut first_text).unwrap();
    EventRenderer::new(&second_building).write_all(&second, &mut second_text).unwrap();
    assert_eq!(first_text, second_text);
    assert_eq!(String::from_utf8(first_text).unwrap().lines().count(), first.len());
}

#[test]
fn test_json_lines_round_trip() {
    let (_, events) = run(&ScenarioConfig::default());
    let lines: Vec<String> = events.iter().map(|e| serde_json::to_string(e).unwrap()).collect();
    assert!(lines[0].contains("\"kind\":\"start\""));
    assert!(lines[0].contains("\"time\":\"2023/01/01 08:00:00\""));

    let parsed: Vec<ElevatorEvent> = lines.iter().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(parsed, events);
}
