//! Session configuration.
//!
//! Loaded from JSON (every field optional) and checked with
//! [`validate_config`], which reports every problem at once.
//!
//! ```
//! use parkwise_logic::config::{validate_config, ParkingConfig};
//!
//! let config = ParkingConfig::from_json(r#"{ "seed": 42 }"#).unwrap();
//! assert_eq!(config.seed, Some(42));
//! assert!(validate_config(&config).is_empty());
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::booking::MAX_DURATION_HOURS;
use crate::error::ParkingError;
use crate::facility::{default_facilities, Facility};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkingConfig {
    /// Seed for spot generation and random selection (None = OS entropy).
    pub seed: Option<u64>,
    /// Give a spot back to the facility when a quick-park exits.
    ///
    /// Off by default: the demo this models never reconciles availability
    /// on exit, and whether it should is an open product question.
    pub restore_availability_on_exit: bool,
    /// Longest pre-booking accepted, in hours.
    pub max_prebook_hours: u8,
    pub facilities: Vec<Facility>,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            seed: None,
            restore_availability_on_exit: false,
            max_prebook_hours: MAX_DURATION_HOURS,
            facilities: default_facilities(),
        }
    }
}

impl ParkingConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, ParkingError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ParkingError::Config(e.to_string()))?;
        let errors = validate_config(&config);
        if let Some(first) = errors.first() {
            return Err(ParkingError::Config(format!(
                "{first:?} ({} problem(s))",
                errors.len()
            )));
        }
        Ok(config)
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoFacilities,
    DuplicateFacility(String),
    EmptyFacilityName,
    NoFloors(String),
    AvailableExceedsTotal { facility: String, available: u32, total: u32 },
    InvalidMaxHours(u8),
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &ParkingConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.facilities.is_empty() {
        errors.push(ConfigError::NoFacilities);
    }

    let mut seen = HashSet::new();
    for f in &config.facilities {
        if f.name.trim().is_empty() {
            errors.push(ConfigError::EmptyFacilityName);
        } else if !seen.insert(f.name.as_str()) {
            errors.push(ConfigError::DuplicateFacility(f.name.clone()));
        }
        if f.floors == 0 {
            errors.push(ConfigError::NoFloors(f.name.clone()));
        }
        if f.available_spots > f.total_spots {
            errors.push(ConfigError::AvailableExceedsTotal {
                facility: f.name.clone(),
                available: f.available_spots,
                total: f.total_spots,
            });
        }
    }

    if config.max_prebook_hours == 0 || config.max_prebook_hours > 24 {
        errors.push(ConfigError::InvalidMaxHours(config.max_prebook_hours));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ParkingConfig::default();
        assert!(validate_config(&config).is_empty());
        assert_eq!(config.facilities.len(), 4);
        assert!(!config.restore_availability_on_exit);
        assert_eq!(config.max_prebook_hours, 12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            ParkingConfig::from_json(r#"{ "restore_availability_on_exit": true }"#).unwrap();
        assert!(config.restore_availability_on_exit);
        assert_eq!(config.seed, None);
        assert_eq!(config.facilities.len(), 4);
    }

    #[test]
    fn test_custom_facilities() {
        let json = r#"{
            "facilities": [
                { "name": "Test Lot", "total_spots": 10, "available_spots": 4, "floors": 1 }
            ]
        }"#;
        let config = ParkingConfig::from_json(json).unwrap();
        assert_eq!(config.facilities[0].name, "Test Lot");
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ParkingConfig::from_json("{ seed: "),
            Err(ParkingError::Config(_))
        ));
    }

    #[test]
    fn test_collects_every_error() {
        let config = ParkingConfig {
            seed: None,
            restore_availability_on_exit: false,
            max_prebook_hours: 0,
            facilities: vec![
                Facility::new("Lot", 10, 11, 0),
                Facility::new("Lot", 10, 5, 1),
            ],
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ConfigError::NoFloors("Lot".into())));
        assert!(errors.contains(&ConfigError::DuplicateFacility("Lot".into())));
        assert!(errors.contains(&ConfigError::InvalidMaxHours(0)));
        assert!(errors.contains(&ConfigError::AvailableExceedsTotal {
            facility: "Lot".into(),
            available: 11,
            total: 10,
        }));
    }

    #[test]
    fn test_empty_facility_list_rejected() {
        let config = ParkingConfig {
            facilities: vec![],
            ..ParkingConfig::default()
        };
        assert_eq!(validate_config(&config), vec![ConfigError::NoFacilities]);
        assert!(ParkingConfig::from_json(r#"{ "facilities": [] }"#).is_err());
    }
}
