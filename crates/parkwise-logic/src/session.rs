//! Per-session booking context.
//!
//! A `ParkingSession` owns everything one user's interaction touches: the
//! login profile, its own view of the facility directory, the active booking,
//! the booking history and the random source. Every UI action is a method on
//! it, so two sessions never share mutable state.
//!
//! ```
//! use chrono::NaiveDate;
//! use parkwise_logic::config::ParkingConfig;
//! use parkwise_logic::selector::Preference;
//! use parkwise_logic::session::ParkingSession;
//!
//! let mut session = ParkingSession::new(ParkingConfig::seeded(7)).unwrap();
//! session.login("Asha", "98100 00000", "DL 3C AB 1234").unwrap();
//!
//! let now = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let booking = session
//!     .quick_park("Select Mall - Saket", 1, Preference::ClosestToEntry, now)
//!     .unwrap();
//! assert!(booking.spot_id.starts_with('1'));
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::booking::{Booking, BookingHistory, BookingKind, BookingStatus, HistoryRow, VehicleSize};
use crate::config::{validate_config, ParkingConfig};
use crate::constants::booking::{DATE_FORMAT, MIN_DURATION_HOURS};
use crate::error::{FieldError, ParkingError};
use crate::facility::{AvailabilityRow, FacilityDirectory};
use crate::navigation::FloorView;
use crate::profile::UserProfile;
use crate::route::{compute_route, route_spot_ids, Coord};
use crate::selector::{select_spot, Preference};
use crate::spots::{generate_floor, SpotType};

/// Pre-booking form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreBookRequest {
    pub facility: String,
    pub floor: u8,
    pub date: NaiveDate,
    pub arrival_time: NaiveTime,
    pub duration_hours: u8,
    pub spot_type: SpotType,
    pub preference: Preference,
    pub vehicle_size: VehicleSize,
}

/// Dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_facilities: usize,
    pub total_spots: u32,
    pub available_spots: u32,
    pub total_bookings: usize,
    pub availability: Vec<AvailabilityRow>,
    pub current: Option<Booking>,
}

/// Serializable state of a session, without the RNG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user: Option<UserProfile>,
    pub current: Option<Booking>,
    pub history: BookingHistory,
    pub facilities: FacilityDirectory,
}

pub struct ParkingSession {
    config: ParkingConfig,
    facilities: FacilityDirectory,
    user: Option<UserProfile>,
    current: Option<Booking>,
    history: BookingHistory,
    rng: ChaCha8Rng,
}

impl ParkingSession {
    /// Start a session. Fails if the config does not validate.
    pub fn new(config: ParkingConfig) -> Result<Self, ParkingError> {
        let errors = validate_config(&config);
        if !errors.is_empty() {
            return Err(ParkingError::Config(format!("{errors:?}")));
        }
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            facilities: FacilityDirectory::new(config.facilities.clone()),
            config,
            user: None,
            current: None,
            history: BookingHistory::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &ParkingConfig {
        &self.config
    }

    pub fn facilities(&self) -> &FacilityDirectory {
        &self.facilities
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_booking(&self) -> Option<&Booking> {
        self.current.as_ref()
    }

    pub fn booking_history(&self) -> &BookingHistory {
        &self.history
    }

    // ── Login ───────────────────────────────────────────────────────────

    pub fn login(
        &mut self,
        name: &str,
        phone: &str,
        vehicle: &str,
    ) -> Result<&UserProfile, ParkingError> {
        let profile = UserProfile::from_form(name, phone, vehicle).map_err(|errors| {
            log::warn!("Login rejected: {} missing field(s)", errors.len());
            ParkingError::Validation(errors)
        })?;
        log::info!("User logged in: {}", profile.name);
        Ok(self.user.insert(profile))
    }

    /// Log out. The active booking, if any, is dropped without being archived
    /// and is returned to the caller; history survives.
    pub fn logout(&mut self) -> Option<Booking> {
        if let Some(user) = self.user.take() {
            log::info!("User logged out: {}", user.name);
        }
        let dropped = self.current.take();
        if let Some(b) = &dropped {
            log::warn!("Active booking {} discarded on logout", b.spot_id);
        }
        dropped
    }

    fn require_login(&self) -> Result<(), ParkingError> {
        if self.user.is_none() {
            log::warn!("Rejected action: not logged in");
            return Err(ParkingError::NotLoggedIn);
        }
        Ok(())
    }

    // ── Quick park ──────────────────────────────────────────────────────

    /// Assign a spot on arrival and start an active parking session.
    pub fn quick_park(
        &mut self,
        facility: &str,
        floor: u8,
        preference: Preference,
        now: NaiveDateTime,
    ) -> Result<&Booking, ParkingError> {
        self.require_login()?;
        if self.current.is_some() {
            log::warn!("Quick park rejected: session already active");
            return Err(ParkingError::SessionAlreadyActive);
        }

        let lot = self.facilities.get(facility)?;
        lot.check_floor(floor)?;
        if lot.available_spots == 0 {
            log::warn!("Quick park rejected: {} is full", facility);
            return Err(ParkingError::FacilityFull(facility.to_string()));
        }

        let spots = generate_floor(floor, &mut self.rng);
        let spot = select_spot(&spots, preference, None, &mut self.rng).inspect_err(|_| {
            log::warn!("No available spot on floor {} of {}", floor, facility);
        })?;
        let route = compute_route(Coord::entry(), Coord::from(spot));
        let route_ids = route_spot_ids(&spots, &route);
        let booking = Booking::quick_park(facility, floor, &spot.id, now, route_ids);

        let remaining = self.facilities.claim_spot(facility)?;
        log::info!(
            "Assigned spot {} at {} ({:?}, {} steps from entry, {} left)",
            booking.spot_id,
            facility,
            preference,
            route.len(),
            remaining
        );
        Ok(self.current.insert(booking))
    }

    /// Leave the facility: archive the active booking as completed.
    ///
    /// The facility's available count is only restored when
    /// `restore_availability_on_exit` is set.
    pub fn exit_parking(&mut self, now: NaiveDateTime) -> Result<&Booking, ParkingError> {
        let booking = self.current.take().ok_or(ParkingError::NoActiveBooking)?;
        let booking = booking.into_exited(now);
        if self.config.restore_availability_on_exit {
            self.facilities.release_spot(&booking.facility)?;
        }
        log::info!("Exited spot {} at {}", booking.spot_id, booking.facility);
        self.history.push(booking);
        self.last_archived()
    }

    /// Floor grid for the active booking with its spot and route highlighted.
    ///
    /// The layout is regenerated, so occupancy differs from assignment time.
    pub fn navigation_view(&mut self) -> Result<FloorView, ParkingError> {
        let booking = self.current.as_ref().ok_or(ParkingError::NoActiveBooking)?;
        let spots = generate_floor(booking.floor, &mut self.rng);
        Ok(FloorView::for_booking(booking, spots))
    }

    // ── Pre-book ────────────────────────────────────────────────────────

    /// Reserve a spot ahead of time. The booking is archived immediately as
    /// confirmed and never touches facility availability.
    pub fn pre_book(
        &mut self,
        request: &PreBookRequest,
        today: NaiveDate,
    ) -> Result<&Booking, ParkingError> {
        self.require_login()?;

        let mut errors = Vec::new();
        if request.date < today {
            errors.push(FieldError::DateInPast {
                date: request.date.format(DATE_FORMAT).to_string(),
                today: today.format(DATE_FORMAT).to_string(),
            });
        }
        let max = self.config.max_prebook_hours;
        if !(MIN_DURATION_HOURS..=max).contains(&request.duration_hours) {
            errors.push(FieldError::DurationOutOfRange {
                hours: request.duration_hours,
                min: MIN_DURATION_HOURS,
                max,
            });
        }
        if !errors.is_empty() {
            log::warn!("Pre-book rejected: {} invalid field(s)", errors.len());
            return Err(ParkingError::Validation(errors));
        }

        self.facilities.get(&request.facility)?.check_floor(request.floor)?;

        let spots = generate_floor(request.floor, &mut self.rng);
        let spot = select_spot(
            &spots,
            request.preference,
            Some(request.spot_type),
            &mut self.rng,
        )?;

        let booking = Booking {
            facility: request.facility.clone(),
            floor: request.floor,
            spot_id: spot.id.clone(),
            status: BookingStatus::Confirmed,
            kind: BookingKind::PreBook {
                date: request.date,
                arrival_time: request.arrival_time,
                duration_hours: request.duration_hours,
                spot_type: request.spot_type,
                preference: request.preference,
                vehicle_size: request.vehicle_size,
            },
        };
        log::info!(
            "Pre-booked spot {} at {} for {} {}",
            booking.spot_id,
            booking.facility,
            booking.date_label(),
            booking.time_label()
        );
        self.history.push(booking);
        self.last_archived()
    }

    // ── Views ───────────────────────────────────────────────────────────

    /// A fresh, unannotated layout of one floor.
    pub fn floor_preview(&mut self, facility: &str, floor: u8) -> Result<FloorView, ParkingError> {
        self.facilities.get(facility)?.check_floor(floor)?;
        let spots = generate_floor(floor, &mut self.rng);
        Ok(FloorView::preview(facility, floor, spots))
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            total_facilities: self.facilities.len(),
            total_spots: self.facilities.total_spots(),
            available_spots: self.facilities.available_spots(),
            total_bookings: self.history.len(),
            availability: self.facilities.availability_rows(),
            current: self.current.clone(),
        }
    }

    pub fn history(&self) -> Vec<HistoryRow> {
        self.history.rows()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            current: self.current.clone(),
            history: self.history.clone(),
            facilities: self.facilities.clone(),
        }
    }

    fn last_archived(&self) -> Result<&Booking, ParkingError> {
        self.history
            .entries()
            .last()
            .ok_or(ParkingError::NoActiveBooking)
    }
}
