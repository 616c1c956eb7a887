//! Spot selection by availability, type and location preference.
//!
//! Algorithm:
//! 1. Keep available spots of the requested type (if a type was requested)
//! 2. If none, widen to every available spot
//! 3. If still none, report [`ParkingError::NoSpotsAvailable`]
//! 4. `ClosestToEntry` takes the minimum distance, ties broken row-major;
//!    every other preference picks uniformly at random

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ParkingError;
use crate::spots::{Spot, SpotType};

/// Where the driver would like to park.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preference {
    ClosestToEntry,
    NearElevator,
    NearExit,
    Any,
}

impl Preference {
    pub const ALL: [Preference; 4] = [
        Self::ClosestToEntry,
        Self::NearElevator,
        Self::NearExit,
        Self::Any,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ClosestToEntry => "Closest to Entry",
            Self::NearElevator => "Near Elevator",
            Self::NearExit => "Near Exit",
            Self::Any => "Any Available",
        }
    }

    /// Parse either the quick-park or the pre-book wording.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "closest to entry" | "near entrance" => Some(Self::ClosestToEntry),
            "near elevator" => Some(Self::NearElevator),
            "near exit" => Some(Self::NearExit),
            "any available" | "any" => Some(Self::Any),
            _ => None,
        }
    }
}

/// Candidate spots after the type filter and the availability fallback.
pub fn candidates(spots: &[Spot], spot_type: Option<SpotType>) -> Vec<&Spot> {
    let available = spots.iter().filter(|s| s.is_available());
    if let Some(wanted) = spot_type {
        let typed: Vec<&Spot> = available
            .clone()
            .filter(|s| s.spot_type == wanted)
            .collect();
        if !typed.is_empty() {
            return typed;
        }
    }
    available.collect()
}

/// The closest candidate, ties broken by lowest row then lowest column.
pub fn closest_to_entry<'a>(candidates: &[&'a Spot]) -> Option<&'a Spot> {
    candidates
        .iter()
        .copied()
        .min_by_key(|s| (s.distance_to_entry, s.row, s.col))
}

/// Pick one spot for the given preference.
pub fn select_spot<'a>(
    spots: &'a [Spot],
    preference: Preference,
    spot_type: Option<SpotType>,
    rng: &mut impl Rng,
) -> Result<&'a Spot, ParkingError> {
    let pool = candidates(spots, spot_type);
    let chosen = match preference {
        Preference::ClosestToEntry => closest_to_entry(&pool),
        _ => pool.choose(rng).copied(),
    };
    chosen.ok_or(ParkingError::NoSpotsAvailable)
}
