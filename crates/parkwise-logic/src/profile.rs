//! Demo login profile.
//!
//! There is no credential check: a user is "logged in" once name, phone and
//! vehicle number are all filled in.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub phone: String,
    pub vehicle: String,
}

impl UserProfile {
    /// Build a profile from form input, trimming each field.
    pub fn from_form(name: &str, phone: &str, vehicle: &str) -> Result<Self, Vec<FieldError>> {
        let profile = Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            vehicle: vehicle.trim().to_string(),
        };
        let errors = validate_profile(&profile);
        if errors.is_empty() {
            Ok(profile)
        } else {
            Err(errors)
        }
    }

    pub fn greeting(&self) -> String {
        format!("Welcome, {}!", self.name)
    }
}

/// Every missing field, in form order.
pub fn validate_profile(profile: &UserProfile) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if profile.name.trim().is_empty() {
        errors.push(FieldError::Missing("name"));
    }
    if profile.phone.trim().is_empty() {
        errors.push(FieldError::Missing("phone"));
    }
    if profile.vehicle.trim().is_empty() {
        errors.push(FieldError::Missing("vehicle"));
    }
    errors
}
