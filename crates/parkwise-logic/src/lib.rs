//! Pure parking logic for ParkWise.
//!
//! This crate contains all booking-flow logic independent of any UI or
//! hosting framework. Functions take plain data and a random source and
//! return results, so everything is unit-testable and reproducible from a
//! seed.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`booking`] | Quick-park and pre-book records, lifecycle, history rows |
//! | [`config`] | Session configuration (JSON) and validation |
//! | [`constants`] | Grid size, entry point, generation odds, display formats |
//! | [`error`] | `ParkingError` and field-level validation errors |
//! | [`facility`] | Facility directory, availability accounting, dashboard rows |
//! | [`navigation`] | Floor view with assigned spot, route highlight, directions |
//! | [`profile`] | Demo login profile and form validation |
//! | [`route`] | Two-phase (column then row) grid routing |
//! | [`selector`] | Spot selection by availability, type and preference |
//! | [`session`] | Per-session context driving every user action |
//! | [`spots`] | Random 8×5 floor grid generation |

pub mod booking;
pub mod config;
pub mod constants;
pub mod error;
pub mod facility;
pub mod navigation;
pub mod profile;
pub mod route;
pub mod selector;
pub mod session;
pub mod spots;

pub use error::{FieldError, ParkingError};
