//! Two-phase grid routing from the entry point to a spot.
//!
//! The path walks the column delta first, then the row delta, one unit per
//! step. It is an L-shaped walk, not a search: the result is fixed by the two
//! endpoints and always has `|Δrow| + |Δcol|` steps.

use serde::{Deserialize, Serialize};

use crate::constants::entry;
use crate::spots::Spot;

/// A grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The fixed entry point of every floor.
    pub const fn entry() -> Self {
        Self::new(entry::ROW, entry::COL)
    }

    pub fn manhattan(self, other: Coord) -> u32 {
        (self.row - other.row).unsigned_abs() + (self.col - other.col).unsigned_abs()
    }
}

impl From<&Spot> for Coord {
    fn from(spot: &Spot) -> Self {
        Self::new(spot.row, spot.col)
    }
}

/// Cells visited walking from `start` to `end`.
///
/// `start` is excluded and `end` is included. Returns an empty path when the
/// endpoints coincide.
pub fn compute_route(start: Coord, end: Coord) -> Vec<Coord> {
    let mut route = Vec::with_capacity(start.manhattan(end) as usize);
    let mut current = start;

    while current.col != end.col {
        current.col += (end.col - current.col).signum();
        route.push(current);
    }
    while current.row != end.row {
        current.row += (end.row - current.row).signum();
        route.push(current);
    }

    route
}

/// Ids of the spots lying on `route`, in grid order.
pub fn route_spot_ids(spots: &[Spot], route: &[Coord]) -> Vec<String> {
    spots
        .iter()
        .filter(|s| route.contains(&Coord::from(*s)))
        .map(|s| s.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spots::generate_floor;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn assert_unit_steps(start: Coord, route: &[Coord]) {
        let mut prev = start;
        for &step in route {
            let dr = (step.row - prev.row).abs();
            let dc = (step.col - prev.col).abs();
            assert_eq!(dr + dc, 1, "{prev:?} -> {step:?}");
            prev = step;
        }
    }

    #[test]
    fn test_entry_to_3_4() {
        let route = compute_route(Coord::entry(), Coord::new(3, 4));
        assert_eq!(
            route,
            vec![
                Coord::new(0, 3),
                Coord::new(0, 4),
                Coord::new(1, 4),
                Coord::new(2, 4),
                Coord::new(3, 4),
            ]
        );
    }

    #[test]
    fn test_same_cell_is_empty() {
        assert!(compute_route(Coord::new(2, 2), Coord::new(2, 2)).is_empty());
    }

    #[test]
    fn test_walks_left_and_up() {
        let route = compute_route(Coord::new(5, 4), Coord::new(2, 0));
        assert_eq!(route.len(), 7);
        assert_eq!(route[3], Coord::new(5, 0));
        assert_eq!(route.last(), Some(&Coord::new(2, 0)));
        assert_unit_steps(Coord::new(5, 4), &route);
    }

    #[test]
    fn test_length_and_steps_for_whole_grid() {
        for row in 0..8 {
            for col in 0..5 {
                let end = Coord::new(row, col);
                let route = compute_route(Coord::entry(), end);
                assert_eq!(route.len() as u32, Coord::entry().manhattan(end));
                assert_unit_steps(Coord::entry(), &route);
                if let Some(last) = route.last() {
                    assert_eq!(*last, end);
                }
            }
        }
    }

    #[test]
    fn test_column_phase_precedes_row_phase() {
        let route = compute_route(Coord::entry(), Coord::new(6, 0));
        let first_row_step = route.iter().position(|c| c.row != 0).unwrap();
        assert!(route[..first_row_step].iter().all(|c| c.row == 0));
        assert!(route[first_row_step..].iter().all(|c| c.col == 0));
    }

    #[test]
    fn test_deterministic() {
        let a = compute_route(Coord::new(1, 1), Coord::new(7, 3));
        let b = compute_route(Coord::new(1, 1), Coord::new(7, 3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_route_spot_ids_follow_path() {
        let spots = generate_floor(1, &mut ChaCha8Rng::seed_from_u64(8));
        let route = compute_route(Coord::entry(), Coord::new(3, 4));
        let ids = route_spot_ids(&spots, &route);
        assert_eq!(ids, vec!["1A04", "1A05", "1B10", "1C15", "1D20"]);
    }
}
