//! Floors and the vertical layout of a building
//!
//! A [`FloorPlan`] owns every valid floor of a building. Floor 0 never exists:
//! the floor below 1 is -1.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::FloorId;

/// Default story height in meters
pub const DEFAULT_FLOOR_HEIGHT: f64 = 3.0;

/// A single floor of the building
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    /// Floor number (negative = underground)
    pub id: FloorId,
    /// Story height in meters
    pub height: f64,
}

impl Floor {
    /// Create a floor, rejecting floor 0 and non-positive heights
    pub fn new(id: FloorId, height: f64) -> SimulationResult<Self> {
        if !id.is_valid() {
            return Err(SimulationError::configuration_error("Floor 0 does not exist"));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(SimulationError::configuration_error(format!(
                "Floor {} must have a positive height, got {}",
                id, height
            )));
        }
        Ok(Self { id, height })
    }
}

/// Ordered collection of the building's floors
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlan {
    floors: BTreeMap<FloorId, Floor>,
}

impl FloorPlan {
    /// Build the floors `low..=high` (in either order), skipping 0
    pub fn from_range(low: i32, high: i32, default_height: f64) -> SimulationResult<Self> {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let mut floors = BTreeMap::new();
        for number in (low..=high).filter(|&n| n != 0) {
            let id = FloorId(number);
            floors.insert(id, Floor::new(id, default_height)?);
        }
        if floors.is_empty() {
            return Err(SimulationError::configuration_error(format!(
                "Floor range {}..={} contains no valid floors",
                low, high
            )));
        }
        Ok(Self { floors })
    }

    /// Override the story height of an existing floor
    pub fn set_height(&mut self, id: FloorId, height: f64) -> SimulationResult<()> {
        let replacement = Floor::new(id, height)?;
        match self.floors.get_mut(&id) {
            Some(floor) => {
                *floor = replacement;
                Ok(())
            }
            None => Err(SimulationError::configuration_error(format!(
                "Cannot set height of floor {}: outside the building",
                id
            ))),
        }
    }

    /// Look up a floor
    pub fn get(&self, id: FloorId) -> Option<&Floor> {
        self.floors.get(&id)
    }

    /// Whether the floor exists
    pub fn contains(&self, id: FloorId) -> bool {
        self.floors.contains_key(&id)
    }

    /// Number of valid floors
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    /// Whether the plan has no floors (never true for a constructed plan)
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Lowest floor
    pub fn lowest(&self) -> FloorId {
        self.floors.keys().next().copied().unwrap_or(FloorId::LOBBY)
    }

    /// Highest floor
    pub fn highest(&self) -> FloorId {
        self.floors.keys().next_back().copied().unwrap_or(FloorId::LOBBY)
    }

    /// Valid floor ids in ascending order
    pub fn ids(&self) -> Vec<FloorId> {
        self.floors.keys().copied().collect()
    }

    /// Iterate floors in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &Floor> {
        self.floors.values()
    }

    /// Height of the floor's level above the lowest floor's level
    pub fn elevation(&self, id: FloorId) -> SimulationResult<f64> {
        self.ensure(id)?;
        Ok(self.floors.range(..id).map(|(_, floor)| floor.height).sum())
    }

    /// Vertical distance travelled between two floors.
    ///
    /// Sums the story heights of the floors in `[min(a, b), max(a, b))`, which
    /// is the elevation difference of the two levels.
    pub fn distance(&self, from: FloorId, to: FloorId) -> SimulationResult<f64> {
        self.ensure(from)?;
        self.ensure(to)?;
        let (low, high) = if from <= to { (from, to) } else { (to, from) };
        Ok(self.floors.range(low..high).map(|(_, floor)| floor.height).sum())
    }

    /// The valid floor closest to `target`, preferring the upper one on ties
    pub fn nearest(&self, target: FloorId) -> FloorId {
        self.floors
            .keys()
            .copied()
            .min_by_key(|id| ((i64::from(id.0) - i64::from(target.0)).abs(), std::cmp::Reverse(*id)))
            .unwrap_or(FloorId::LOBBY)
    }

    fn ensure(&self, id: FloorId) -> SimulationResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(SimulationError::configuration_error(format!(
                "Floor {} does not exist in this building",
                id.0
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_skips_floor_zero() {
        let plan = FloorPlan::from_range(-2, 3, DEFAULT_FLOOR_HEIGHT).unwrap();
        assert_eq!(
            plan.ids(),
            vec![FloorId(-2), FloorId(-1), FloorId(1), FloorId(2), FloorId(3)]
        );
        assert!(!plan.contains(FloorId(0)));
        assert_eq!(plan.lowest(), FloorId(-2));
        assert_eq!(plan.highest(), FloorId(3));
    }

    #[test]
    fn test_reversed_range_is_normalized() {
        let plan = FloorPlan::from_range(5, 1, DEFAULT_FLOOR_HEIGHT).unwrap();
        assert_eq!(plan.len(), 5);
        assert_eq!(plan.lowest(), FloorId(1));
    }

    #[test]
    fn test_empty_range_rejected() {
        assert!(FloorPlan::from_range(0, 0, DEFAULT_FLOOR_HEIGHT).is_err());
        assert!(FloorPlan::from_range(1, 3, 0.0).is_err());
    }

    #[test]
    fn test_height_override() {
        let mut plan = FloorPlan::from_range(1, 4, 3.0).unwrap();
        plan.set_height(FloorId(1), 5.0).unwrap();
        assert_eq!(plan.get(FloorId(1)).unwrap().height, 5.0);

        assert!(plan.set_height(FloorId(0), 4.0).is_err());
        assert!(plan.set_height(FloorId(9), 4.0).is_err());
        assert!(plan.set_height(FloorId(2), -1.0).is_err());
    }

    #[test]
    fn test_distance_sums_story_heights() {
        let mut plan = FloorPlan::from_range(1, 10, 3.0).unwrap();
        plan.set_height(FloorId(1), 5.0).unwrap();

        // Leaving the 5m lobby, then three 3m stories
        assert_eq!(plan.distance(FloorId(1), FloorId(5)).unwrap(), 14.0);
        assert_eq!(plan.distance(FloorId(5), FloorId(1)).unwrap(), 14.0);
        assert_eq!(plan.distance(FloorId(2), FloorId(6)).unwrap(), 12.0);
        assert_eq!(plan.distance(FloorId(4), FloorId(4)).unwrap(), 0.0);
    }

    #[test]
    fn test_distance_across_ground_boundary() {
        let mut plan = FloorPlan::from_range(-3, 3, 3.0).unwrap();
        plan.set_height(FloorId(-1), 4.0).unwrap();

        // -1 -> 1 crosses a single story, not two
        assert_eq!(plan.distance(FloorId(-1), FloorId(1)).unwrap(), 4.0);
        assert_eq!(plan.distance(FloorId(-3), FloorId(2)).unwrap(), 3.0 + 3.0 + 4.0 + 3.0);
        assert_eq!(
            plan.distance(FloorId(-3), FloorId(2)).unwrap(),
            plan.elevation(FloorId(2)).unwrap() - plan.elevation(FloorId(-3)).unwrap()
        );
    }

    #[test]
    fn test_distance_unknown_floor() {
        let plan = FloorPlan::from_range(1, 3, 3.0).unwrap();
        assert!(plan.distance(FloorId(1), FloorId(7)).is_err());
        assert!(plan.distance(FloorId(0), FloorId(2)).is_err());
    }

    #[test]
    fn test_nearest_valid_floor() {
        let plan = FloorPlan::from_range(-5, 5, 3.0).unwrap();
        assert_eq!(plan.nearest(FloorId(0)), FloorId(1));
        assert_eq!(plan.nearest(FloorId(3)), FloorId(3));

        let basement = FloorPlan::from_range(-5, -1, 3.0).unwrap();
        assert_eq!(basement.nearest(FloorId::LOBBY), FloorId(-1));
    }
}
