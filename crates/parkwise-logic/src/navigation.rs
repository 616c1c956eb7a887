//! Navigation view: a floor grid annotated with the assigned spot and route.
//!
//! The grid is regenerated for display, so the spot under the assigned id may
//! not match the layout it was picked from. Only ids are carried across.

use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::facility::floor_label;
use crate::route::Coord;
use crate::spots::{Spot, SpotStatus};

/// A spot plus display flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCell {
    pub spot: Spot,
    pub assigned: bool,
    pub on_route: bool,
}

/// Everything needed to draw one floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorView {
    pub facility: String,
    pub floor: u8,
    pub entry: Coord,
    pub cells: Vec<MapCell>,
    pub directions: Vec<String>,
}

impl FloorView {
    /// Plain grid with no assignment.
    pub fn preview(facility: &str, floor: u8, spots: Vec<Spot>) -> Self {
        Self {
            facility: facility.to_string(),
            floor,
            entry: Coord::entry(),
            cells: annotate(spots, None, &[]),
            directions: Vec::new(),
        }
    }

    /// Grid for an active booking: assigned spot marked, route flagged.
    pub fn for_booking(booking: &Booking, spots: Vec<Spot>) -> Self {
        Self {
            facility: booking.facility.clone(),
            floor: booking.floor,
            entry: Coord::entry(),
            cells: annotate(spots, Some(&booking.spot_id), booking.route()),
            directions: directions(booking),
        }
    }

    pub fn assigned_cell(&self) -> Option<&MapCell> {
        self.cells.iter().find(|c| c.assigned)
    }

    pub fn route_cells(&self) -> impl Iterator<Item = &MapCell> {
        self.cells.iter().filter(|c| c.on_route)
    }

    /// Text rendering, one line per row, entry marker underneath.
    ///
    /// `*` assigned, `+` on route, `.` available, `x` occupied.
    pub fn render_ascii(&self) -> String {
        let mut out = String::new();
        let mut last_row = None;
        for cell in &self.cells {
            if last_row.is_some_and(|r| r != cell.spot.row) {
                out.push('\n');
            }
            last_row = Some(cell.spot.row);
            out.push(glyph(cell));
        }
        out.push('\n');
        let pad = usize::try_from(self.entry.col).unwrap_or(0);
        out.push_str(&" ".repeat(pad));
        out.push('^');
        out
    }
}

fn glyph(cell: &MapCell) -> char {
    if cell.assigned {
        '*'
    } else if cell.on_route {
        '+'
    } else if cell.spot.status == SpotStatus::Occupied {
        'x'
    } else {
        '.'
    }
}

/// Mark `assigned_id` as assigned and flag every id in `route_ids`.
pub fn annotate(spots: Vec<Spot>, assigned_id: Option<&str>, route_ids: &[String]) -> Vec<MapCell> {
    spots
        .into_iter()
        .map(|mut spot| {
            let assigned = assigned_id == Some(spot.id.as_str());
            if assigned {
                spot.status = SpotStatus::Assigned;
            }
            let on_route = route_ids.iter().any(|id| *id == spot.id);
            MapCell {
                spot,
                assigned,
                on_route,
            }
        })
        .collect()
}

/// Turn-by-turn instructions for a booking.
pub fn directions(booking: &Booking) -> Vec<String> {
    vec![
        "Enter through main gate".to_string(),
        format!("Proceed to {}", floor_label(booking.floor)),
        "Follow the highlighted route".to_string(),
        format!("Park at spot {}", booking.spot_id),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{compute_route, route_spot_ids};
    use crate::spots::generate_floor;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn booking_on(spots: &[Spot], target: Coord) -> Booking {
        let spot = spots.iter().find(|s| Coord::from(*s) == target).unwrap();
        let route = route_spot_ids(spots, &compute_route(Coord::entry(), target));
        let at = NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        Booking::quick_park("Select Mall - Saket", 2, &spot.id, at, route)
    }

    #[test]
    fn test_booking_view_marks_assigned_and_route() {
        let spots = generate_floor(2, &mut ChaCha8Rng::seed_from_u64(4));
        let booking = booking_on(&spots, Coord::new(3, 4));
        let view = FloorView::for_booking(&booking, spots);

        let assigned = view.assigned_cell().unwrap();
        assert_eq!(assigned.spot.id, "2D20");
        assert_eq!(assigned.spot.status, SpotStatus::Assigned);
        assert_eq!(view.route_cells().count(), 5);
        assert_eq!(view.directions[1], "Proceed to Floor 2");
        assert_eq!(view.directions[3], "Park at spot 2D20");
    }

    #[test]
    fn test_preview_has_no_flags() {
        let spots = generate_floor(1, &mut ChaCha8Rng::seed_from_u64(4));
        let view = FloorView::preview("Select Mall - Saket", 1, spots);
        assert_eq!(view.cells.len(), 40);
        assert!(view.assigned_cell().is_none());
        assert_eq!(view.route_cells().count(), 0);
        assert!(view.directions.is_empty());
    }

    #[test]
    fn test_ascii_layout() {
        let spots = generate_floor(1, &mut ChaCha8Rng::seed_from_u64(4));
        let booking = booking_on(&spots, Coord::new(0, 4));
        let text = FloorView::for_booking(&booking, spots).render_ascii();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[..8].iter().all(|l| l.chars().count() == 5));
        assert_eq!(lines[0].chars().nth(3), Some('+'));
        assert_eq!(lines[0].chars().nth(4), Some('*'));
        assert_eq!(lines[8], "  ^");
    }
}
