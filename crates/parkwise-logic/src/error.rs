//! Error types shared by every parking operation.

use thiserror::Error;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("booking date {date} is in the past (today is {today})")]
    DateInPast { date: String, today: String },
    #[error("duration {hours}h is outside {min}..={max} hours")]
    DurationOutOfRange { hours: u8, min: u8, max: u8 },
}

/// Failure of a session or selection operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkingError {
    /// The candidate spot list had nothing available, even after widening.
    #[error("no spots available")]
    NoSpotsAvailable,
    #[error("no spots available at {0}")]
    FacilityFull(String),
    #[error("unknown facility: {0}")]
    UnknownFacility(String),
    #[error("floor {floor} does not exist (facility has {floors} floors)")]
    InvalidFloor { floor: u8, floors: u8 },
    #[error("not logged in")]
    NotLoggedIn,
    #[error("a parking session is already active")]
    SessionAlreadyActive,
    #[error("no active parking session")]
    NoActiveBooking,
    #[error("invalid input: {}", join_fields(.0))]
    Validation(Vec<FieldError>),
    #[error("invalid config: {0}")]
    Config(String),
}

impl ParkingError {
    /// True for the "nothing to assign" outcomes, as opposed to bad input.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NoSpotsAvailable | Self::FacilityFull(_))
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        assert!(ParkingError::NoSpotsAvailable.is_unavailable());
        assert!(ParkingError::FacilityFull("Forum Mall - Bangalore".into()).is_unavailable());
        assert!(!ParkingError::NotLoggedIn.is_unavailable());
        assert!(!ParkingError::InvalidFloor { floor: 9, floors: 3 }.is_unavailable());
    }

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = ParkingError::Validation(vec![
            FieldError::Missing("name"),
            FieldError::Missing("phone"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: name is required; phone is required"
        );
    }
}
