//! Initial parking placement for an idle fleet
//!
//! Before any passenger shows up, elevators are spread over the building:
//! one in the lobby, one at the top, the rest evenly in between. The
//! placement is a pure function of the fleet size and the valid floor list.

use crate::types::FloorId;

/// Parking floors for `elevator_count` elevators, sorted ascending.
///
/// `valid_floors` must be the building's floor ids in ascending order
/// (floor 0 excluded). Targets that are not valid floors snap to the nearest
/// valid one, the upper one on ties.
pub fn parking_floors(elevator_count: usize, valid_floors: &[FloorId]) -> Vec<FloorId> {
    let (Some(&lowest), Some(&highest)) = (valid_floors.first(), valid_floors.last()) else {
        return Vec::new();
    };

    let mut floors = match elevator_count {
        0 => return Vec::new(),
        1 => {
            let midpoint = (lowest.0 + highest.0).div_euclid(2);
            vec![snap(FloorId(midpoint), valid_floors)]
        }
        2 => vec![
            snap(FloorId::LOBBY, valid_floors),
            valid_floors[valid_floors.len() / 2],
        ],
        n => {
            let mut floors = Vec::with_capacity(n);
            floors.push(snap(FloorId::LOBBY, valid_floors));
            floors.push(highest);
            let last_index = (valid_floors.len() - 1) as f64;
            for i in 1..n - 1 {
                let position = i as f64 / (n - 1) as f64;
                // Python-style banker's rounding keeps placements stable at .5
                let index = (position * last_index).round_ties_even() as usize;
                floors.push(valid_floors[index.min(valid_floors.len() - 1)]);
            }
            floors
        }
    };

    floors.sort();
    floors
}

fn snap(target: FloorId, valid_floors: &[FloorId]) -> FloorId {
    if valid_floors.binary_search(&target).is_ok() {
        return target;
    }
    valid_floors
        .iter()
        .copied()
        .min_by_key(|id| ((i64::from(id.0) - i64::from(target.0)).abs(), std::cmp::Reverse(*id)))
        .unwrap_or(target)
}
