//! Parking facilities and the dashboard aggregates derived from them.

use serde::{Deserialize, Serialize};

use crate::error::ParkingError;

/// A parking location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub total_spots: u32,
    pub available_spots: u32,
    pub floors: u8,
}

impl Facility {
    pub fn new(name: &str, total_spots: u32, available_spots: u32, floors: u8) -> Self {
        Self {
            name: name.to_string(),
            total_spots,
            available_spots,
            floors,
        }
    }

    pub fn occupied_spots(&self) -> u32 {
        self.total_spots.saturating_sub(self.available_spots)
    }

    /// Floor labels as shown in the floor picker ("Floor 1".."Floor N").
    pub fn floor_labels(&self) -> Vec<String> {
        (1..=self.floors).map(floor_label).collect()
    }

    pub fn check_floor(&self, floor: u8) -> Result<(), ParkingError> {
        if floor == 0 || floor > self.floors {
            return Err(ParkingError::InvalidFloor {
                floor,
                floors: self.floors,
            });
        }
        Ok(())
    }
}

/// "Floor 3".
pub fn floor_label(floor: u8) -> String {
    format!("Floor {floor}")
}

/// Parse "Floor 3" (or a bare "3") into a floor number.
pub fn parse_floor_label(label: &str) -> Option<u8> {
    let label = label.trim();
    let number = label.strip_prefix("Floor").unwrap_or(label);
    number.trim().parse().ok()
}

/// The four facilities every new session starts with.
pub fn default_facilities() -> Vec<Facility> {
    vec![
        Facility::new("Select Mall - Saket", 120, 45, 3),
        Facility::new("DLF Cyber Hub - Gurgaon", 200, 78, 4),
        Facility::new("Phoenix Market City - Mumbai", 350, 142, 5),
        Facility::new("Forum Mall - Bangalore", 180, 63, 3),
    ]
}

/// One bar of the availability chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRow {
    pub facility: String,
    pub available: u32,
    pub occupied: u32,
}

/// Ordered set of facilities with name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityDirectory {
    facilities: Vec<Facility>,
}

impl Default for FacilityDirectory {
    fn default() -> Self {
        Self::new(default_facilities())
    }
}

impl FacilityDirectory {
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self { facilities }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Facility> {
        self.facilities.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.facilities.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn get(&self, name: &str) -> Result<&Facility, ParkingError> {
        self.facilities
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| ParkingError::UnknownFacility(name.to_string()))
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Facility, ParkingError> {
        self.facilities
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| ParkingError::UnknownFacility(name.to_string()))
    }

    /// Take one spot out of a facility's available count.
    ///
    /// Fails with [`ParkingError::FacilityFull`] when nothing is left.
    pub fn claim_spot(&mut self, name: &str) -> Result<u32, ParkingError> {
        let facility = self.get_mut(name)?;
        if facility.available_spots == 0 {
            return Err(ParkingError::FacilityFull(facility.name.clone()));
        }
        facility.available_spots -= 1;
        Ok(facility.available_spots)
    }

    /// Give one spot back, never exceeding the facility's total.
    pub fn release_spot(&mut self, name: &str) -> Result<u32, ParkingError> {
        let facility = self.get_mut(name)?;
        facility.available_spots = (facility.available_spots + 1).min(facility.total_spots);
        Ok(facility.available_spots)
    }

    pub fn total_spots(&self) -> u32 {
        self.facilities.iter().map(|f| f.total_spots).sum()
    }

    pub fn available_spots(&self) -> u32 {
        self.facilities.iter().map(|f| f.available_spots).sum()
    }

    pub fn availability_rows(&self) -> Vec<AvailabilityRow> {
        self.facilities
            .iter()
            .map(|f| AvailabilityRow {
                facility: f.name.clone(),
                available: f.available_spots,
                occupied: f.occupied_spots(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directory() {
        let dir = FacilityDirectory::default();
        assert_eq!(dir.len(), 4);
        assert_eq!(dir.total_spots(), 850);
        assert_eq!(dir.available_spots(), 328);
        assert_eq!(dir.get("Phoenix Market City - Mumbai").unwrap().floors, 5);
    }

    #[test]
    fn test_unknown_facility() {
        let dir = FacilityDirectory::default();
        assert_eq!(
            dir.get("Nowhere Plaza"),
            Err(ParkingError::UnknownFacility("Nowhere Plaza".into()))
        );
    }

    #[test]
    fn test_claim_until_full() {
        let mut dir = FacilityDirectory::new(vec![Facility::new("Tiny Lot", 2, 2, 1)]);
        assert_eq!(dir.claim_spot("Tiny Lot"), Ok(1));
        assert_eq!(dir.claim_spot("Tiny Lot"), Ok(0));
        assert_eq!(
            dir.claim_spot("Tiny Lot"),
            Err(ParkingError::FacilityFull("Tiny Lot".into()))
        );
    }

    #[test]
    fn test_release_capped_at_total() {
        let mut dir = FacilityDirectory::new(vec![Facility::new("Tiny Lot", 2, 1, 1)]);
        assert_eq!(dir.release_spot("Tiny Lot"), Ok(2));
        assert_eq!(dir.release_spot("Tiny Lot"), Ok(2));
    }

    #[test]
    fn test_availability_rows() {
        let dir = FacilityDirectory::default();
        let rows = dir.availability_rows();
        assert_eq!(rows[0].facility, "Select Mall - Saket");
        assert_eq!(rows[0].available, 45);
        assert_eq!(rows[0].occupied, 75);
    }

    #[test]
    fn test_floor_checks_and_labels() {
        let f = Facility::new("Forum Mall - Bangalore", 180, 63, 3);
        assert!(f.check_floor(1).is_ok());
        assert!(f.check_floor(3).is_ok());
        assert_eq!(
            f.check_floor(4),
            Err(ParkingError::InvalidFloor { floor: 4, floors: 3 })
        );
        assert!(f.check_floor(0).is_err());
        assert_eq!(f.floor_labels(), vec!["Floor 1", "Floor 2", "Floor 3"]);
        assert_eq!(parse_floor_label("Floor 2"), Some(2));
        assert_eq!(parse_floor_label("5"), Some(5));
        assert_eq!(parse_floor_label("Roof"), None);
    }
}
