//! Floor spot generation.
//!
//! Every call produces a fresh random 8×5 grid. Layouts are not persisted, so
//! viewing the same floor twice yields two different grids. Callers that need
//! reproducible output pass a seeded RNG.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{entry, grid, odds};

/// Occupancy of a single spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpotStatus {
    Available,
    Occupied,
    /// Held by the current session's booking (display only).
    Assigned,
}

impl SpotStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Assigned => "assigned",
        }
    }
}

/// Kind of bay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpotType {
    Regular,
    EvCharging,
    Disabled,
}

/// Weighted bag the type is drawn from (3 in 5 Regular).
const TYPE_BAG: [SpotType; 5] = [
    SpotType::Regular,
    SpotType::EvCharging,
    SpotType::Disabled,
    SpotType::Regular,
    SpotType::Regular,
];

impl SpotType {
    pub const ALL: [SpotType; 3] = [Self::Regular, Self::EvCharging, Self::Disabled];

    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::EvCharging => "EV Charging",
            Self::Disabled => "Disabled",
        }
    }

    /// Parse a UI label ("EV Charging") back into a type.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// One parking bay on a floor grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
    /// `"{floor}{row letter}{seq:02}"`, e.g. `"2C13"`.
    pub id: String,
    pub row: i32,
    pub col: i32,
    pub status: SpotStatus,
    pub spot_type: SpotType,
    /// Manhattan distance from the entry point.
    pub distance_to_entry: u32,
}

impl Spot {
    pub fn is_available(&self) -> bool {
        self.status == SpotStatus::Available
    }

    pub fn position(&self) -> (i32, i32) {
        (self.row, self.col)
    }
}

/// Manhattan distance from the entry point to `(row, col)`.
pub fn distance_to_entry(row: i32, col: i32) -> u32 {
    (row - entry::ROW).unsigned_abs() + (col - entry::COL).unsigned_abs()
}

/// Label for a spot: floor number, row letter, then a two-digit sequence
/// number counted row-major from 1.
pub fn spot_label(floor: u8, row: i32, seq: usize) -> String {
    let letter = char::from(b'A' + row as u8);
    format!("{floor}{letter}{seq:02}")
}

/// Generate all spots for one floor, row-major.
///
/// Status is a fair available/occupied draw followed by a 70% override to
/// available, so roughly 85% of spots come out available.
pub fn generate_floor(floor: u8, rng: &mut impl Rng) -> Vec<Spot> {
    let mut spots = Vec::with_capacity(grid::SPOTS_PER_FLOOR);

    for row in 0..grid::ROWS {
        for col in 0..grid::COLS {
            let seq = spots.len() + 1;
            let mut status = if rng.gen_bool(0.5) {
                SpotStatus::Available
            } else {
                SpotStatus::Occupied
            };
            if rng.gen_bool(odds::AVAILABLE_OVERRIDE) {
                status = SpotStatus::Available;
            }
            let spot_type = *TYPE_BAG.choose(rng).unwrap_or(&SpotType::Regular);

            spots.push(Spot {
                id: spot_label(floor, row, seq),
                row,
                col,
                status,
                spot_type,
                distance_to_entry: distance_to_entry(row, col),
            });
        }
    }

    log::debug!(
        "Generated floor {}: {}/{} available",
        floor,
        count_available(&spots),
        spots.len()
    );
    spots
}

/// Number of available spots in a list.
pub fn count_available(spots: &[Spot]) -> usize {
    spots.iter().filter(|s| s.is_available()).count()
}
