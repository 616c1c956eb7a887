//! Booking records and the booking history.
//!
//! # Lifecycle
//!
//! ```text
//! NONE ──quick park──▶ ACTIVE ──exit──▶ COMPLETED (archived)
//! NONE ──pre-book────▶ CONFIRMED (archived immediately)
//! ```
//!
//! There is no cancellation or modification transition.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::constants::booking::{DATE_FORMAT, TIME_FORMAT};
use crate::facility::floor_label;
use crate::selector::Preference;
use crate::spots::SpotType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Quick-park in progress.
    Active,
    /// Quick-park that has exited.
    Completed,
    /// Pre-booking.
    Confirmed,
}

impl BookingStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Confirmed => "Confirmed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleSize {
    Compact,
    Sedan,
    Suv,
}

impl VehicleSize {
    pub fn label(self) -> &'static str {
        match self {
            Self::Compact => "Compact",
            Self::Sedan => "Sedan",
            Self::Suv => "SUV",
        }
    }
}

/// Kind-specific booking data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingKind {
    QuickPark {
        entry_time: NaiveDateTime,
        exit_time: Option<NaiveDateTime>,
        /// Ids of the spots on the path from the entry to the assigned spot.
        route: Vec<String>,
    },
    PreBook {
        date: NaiveDate,
        arrival_time: NaiveTime,
        duration_hours: u8,
        spot_type: SpotType,
        preference: Preference,
        vehicle_size: VehicleSize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub facility: String,
    pub floor: u8,
    pub spot_id: String,
    pub status: BookingStatus,
    pub kind: BookingKind,
}

impl Booking {
    pub fn quick_park(
        facility: &str,
        floor: u8,
        spot_id: &str,
        entry_time: NaiveDateTime,
        route: Vec<String>,
    ) -> Self {
        Self {
            facility: facility.to_string(),
            floor,
            spot_id: spot_id.to_string(),
            status: BookingStatus::Active,
            kind: BookingKind::QuickPark {
                entry_time,
                exit_time: None,
                route,
            },
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }

    /// Route ids for a quick-park; empty for pre-bookings.
    pub fn route(&self) -> &[String] {
        match &self.kind {
            BookingKind::QuickPark { route, .. } => route.as_slice(),
            BookingKind::PreBook { .. } => &[],
        }
    }

    /// Close an active quick-park. Other bookings are returned unchanged.
    pub fn into_exited(mut self, at: NaiveDateTime) -> Self {
        if let BookingKind::QuickPark { exit_time, .. } = &mut self.kind {
            if self.status == BookingStatus::Active {
                *exit_time = Some(at);
                self.status = BookingStatus::Completed;
            }
        }
        self
    }

    /// Date shown in the history list; quick-parks show "Today".
    pub fn date_label(&self) -> String {
        match &self.kind {
            BookingKind::PreBook { date, .. } => date.format(DATE_FORMAT).to_string(),
            BookingKind::QuickPark { .. } => "Today".to_string(),
        }
    }

    /// Arrival time for pre-bookings, entry time for quick-parks.
    pub fn time_label(&self) -> String {
        match &self.kind {
            BookingKind::PreBook { arrival_time, .. } => {
                arrival_time.format(TIME_FORMAT).to_string()
            }
            BookingKind::QuickPark { entry_time, .. } => {
                entry_time.format(TIME_FORMAT).to_string()
            }
        }
    }
}

/// One line of the history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    /// 1-based, oldest booking is #1.
    pub number: usize,
    pub facility: String,
    pub spot_id: String,
    pub floor: String,
    pub date: String,
    pub time: String,
    pub status: String,
}

/// Archived bookings, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingHistory {
    entries: Vec<Booking>,
}

impl BookingHistory {
    pub fn push(&mut self, booking: Booking) {
        self.entries.push(booking);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Booking] {
        &self.entries
    }

    /// Rows newest first, numbered from the oldest.
    pub fn rows(&self) -> Vec<HistoryRow> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .map(|(idx, b)| HistoryRow {
                number: idx + 1,
                facility: b.facility.clone(),
                spot_id: b.spot_id.clone(),
                floor: floor_label(b.floor),
                date: b.date_label(),
                time: b.time_label(),
                status: b.status.label().to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn pre_book() -> Booking {
        Booking {
            facility: "Forum Mall - Bangalore".into(),
            floor: 2,
            spot_id: "2B07".into(),
            status: BookingStatus::Confirmed,
            kind: BookingKind::PreBook {
                date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
                arrival_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
                duration_hours: 3,
                spot_type: SpotType::EvCharging,
                preference: Preference::Any,
                vehicle_size: VehicleSize::Sedan,
            },
        }
    }

    #[test]
    fn test_exit_completes_quick_park() {
        let b = Booking::quick_park("Select Mall - Saket", 1, "1A03", at(14, 5), vec![]);
        assert!(b.is_active());
        let done = b.into_exited(at(16, 40));
        assert_eq!(done.status, BookingStatus::Completed);
        match done.kind {
            BookingKind::QuickPark { exit_time, .. } => assert_eq!(exit_time, Some(at(16, 40))),
            BookingKind::PreBook { .. } => panic!("kind changed"),
        }
    }

    #[test]
    fn test_exit_leaves_pre_book_untouched() {
        let b = pre_book();
        assert_eq!(b.clone().into_exited(at(10, 0)), b);
    }

    #[test]
    fn test_labels() {
        let b = Booking::quick_park("Select Mall - Saket", 1, "1A03", at(14, 5), vec![]);
        assert_eq!(b.date_label(), "Today");
        assert_eq!(b.time_label(), "02:05 PM");
        let p = pre_book();
        assert_eq!(p.date_label(), "20 Oct 2026");
        assert_eq!(p.time_label(), "09:30 AM");
        assert!(p.route().is_empty());
    }

    #[test]
    fn test_history_rows_newest_first() {
        let mut history = BookingHistory::default();
        history.push(
            Booking::quick_park("Select Mall - Saket", 1, "1A03", at(8, 0), vec![])
                .into_exited(at(9, 0)),
        );
        history.push(pre_book());

        let rows = history.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 2);
        assert_eq!(rows[0].status, "Confirmed");
        assert_eq!(rows[0].floor, "Floor 2");
        assert_eq!(rows[1].number, 1);
        assert_eq!(rows[1].status, "Completed");
        assert_eq!(rows[1].date, "Today");
    }
}
