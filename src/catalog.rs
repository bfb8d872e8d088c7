use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{DepthChartError, Result};
use crate::position::Position;
use crate::team::DefensiveScheme;

/// Static configuration for one depth chart slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionProfile {
    pub position: Position,

    /// Value weight when the team plays a 4-3 front
    pub value_43: f64,

    /// Value weight when the team plays a 3-4 front
    pub value_34: f64,

    /// Age at which players at this position are expected to retire
    pub retirement_age: u8,

    pub starters_43: usize,
    pub starters_34: usize,
}

impl PositionProfile {
    pub fn new(
        position: Position,
        value_43: f64,
        value_34: f64,
        retirement_age: u8,
        starters_43: usize,
        starters_34: usize,
    ) -> Self {
        PositionProfile {
            position,
            value_43,
            value_34,
            retirement_age,
            starters_43,
            starters_34,
        }
    }

    pub fn value(&self, scheme: DefensiveScheme) -> f64 {
        match scheme {
            DefensiveScheme::Front43 => self.value_43,
            DefensiveScheme::Front34 => self.value_34,
        }
    }

    pub fn starters(&self, scheme: DefensiveScheme) -> usize {
        match scheme {
            DefensiveScheme::Front43 => self.starters_43,
            DefensiveScheme::Front34 => self.starters_34,
        }
    }
}

/// Per-slot value weights, retirement ages, and starter counts.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionCatalog {
    profiles: BTreeMap<Position, PositionProfile>,
}

impl Default for PositionCatalog {
    fn default() -> Self {
        use Position::*;

        let profiles = [
            PositionProfile::new(QB, 100.0, 100.0, 35, 1, 1),
            PositionProfile::new(HB, 60.0, 60.0, 33, 1, 1),
            PositionProfile::new(FB, 10.0, 10.0, 32, 1, 1),
            PositionProfile::new(WR, 65.0, 65.0, 35, 2, 2),
            PositionProfile::new(TE, 25.0, 25.0, 32, 1, 1),
            PositionProfile::new(LT, 65.0, 65.0, 36, 1, 1),
            PositionProfile::new(LG, 35.0, 35.0, 36, 1, 1),
            PositionProfile::new(C, 30.0, 30.0, 36, 1, 1),
            PositionProfile::new(RG, 35.0, 35.0, 36, 1, 1),
            PositionProfile::new(RT, 55.0, 55.0, 36, 1, 1),
            PositionProfile::new(LE, 50.0, 45.0, 35, 1, 1),
            PositionProfile::new(RE, 85.0, 55.0, 35, 1, 1),
            PositionProfile::new(DT, 65.0, 65.0, 35, 2, 1),
            PositionProfile::new(LOLB, 45.0, 65.0, 34, 1, 1),
            PositionProfile::new(MLB, 50.0, 55.0, 34, 1, 2),
            PositionProfile::new(ROLB, 50.0, 60.0, 34, 1, 1),
            PositionProfile::new(CB, 80.0, 75.0, 32, 2, 2),
            PositionProfile::new(FS, 40.0, 40.0, 32, 1, 1),
            PositionProfile::new(SS, 40.0, 40.0, 32, 1, 1),
            PositionProfile::new(K, 4.0, 4.0, 38, 1, 1),
            PositionProfile::new(P, 1.0, 1.0, 38, 1, 1),
            // Specialist pools are only ranked against themselves, so a unit
            // weight is enough. Retirement age is read from the natural slot.
            PositionProfile::new(KR, 1.0, 1.0, 32, 1, 1),
            PositionProfile::new(PR, 1.0, 1.0, 32, 1, 1),
            PositionProfile::new(KOS, 1.0, 1.0, 38, 1, 1),
            PositionProfile::new(LS, 1.0, 1.0, 36, 1, 1),
            PositionProfile::new(ThirdDownBack, 1.0, 1.0, 33, 1, 1),
        ];

        PositionCatalog::from_profiles(profiles)
    }
}

impl PositionCatalog {
    pub fn from_profiles(profiles: impl IntoIterator<Item = PositionProfile>) -> Self {
        PositionCatalog {
            profiles: profiles.into_iter().map(|p| (p.position, p)).collect(),
        }
    }

    /// Parse a catalog from a JSON array of profiles.
    pub fn from_json(json: &str) -> Result<Self> {
        let profiles: Vec<PositionProfile> =
            serde_json::from_str(json).map_err(|e| DepthChartError::Catalog(e.to_string()))?;
        Ok(PositionCatalog::from_profiles(profiles))
    }

    /// Read a catalog from a JSON file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            DepthChartError::Catalog(format!("Failed to open {}: {}", path.display(), e))
        })?;
        PositionCatalog::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        let profiles: Vec<&PositionProfile> = self.profiles.values().collect();
        serde_json::to_string_pretty(&profiles).map_err(|e| DepthChartError::Catalog(e.to_string()))
    }

    pub fn get(&self, position: Position) -> Result<&PositionProfile> {
        self.profiles
            .get(&position)
            .ok_or(DepthChartError::MalformedCatalog { position })
    }

    pub fn value(&self, position: Position, scheme: DefensiveScheme) -> Result<f64> {
        Ok(self.get(position)?.value(scheme))
    }

    pub fn starters(&self, position: Position, scheme: DefensiveScheme) -> Result<usize> {
        Ok(self.get(position)?.starters(scheme))
    }

    pub fn retirement_age(&self, position: Position) -> Result<u8> {
        Ok(self.get(position)?.retirement_age)
    }

    /// Add or replace a profile.
    pub fn insert(&mut self, profile: PositionProfile) {
        self.profiles.insert(profile.position, profile);
    }

    pub fn remove(&mut self, position: Position) -> Option<PositionProfile> {
        self.profiles.remove(&position)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_every_slot() {
        let catalog = PositionCatalog::default();
        assert_eq!(catalog.len(), 26);
        for pos in Position::ALL {
            assert!(catalog.get(pos).is_ok(), "missing {}", pos);
        }
    }

    #[test]
    fn test_scheme_dependent_starters() {
        let catalog = PositionCatalog::default();
        assert_eq!(catalog.starters(Position::DT, DefensiveScheme::Front43).unwrap(), 2);
        assert_eq!(catalog.starters(Position::DT, DefensiveScheme::Front34).unwrap(), 1);
        assert_eq!(catalog.starters(Position::MLB, DefensiveScheme::Front43).unwrap(), 1);
        assert_eq!(catalog.starters(Position::MLB, DefensiveScheme::Front34).unwrap(), 2);
        assert_eq!(catalog.value(Position::RE, DefensiveScheme::Front34).unwrap(), 55.0);
    }

    #[test]
    fn test_missing_entry_is_malformed() {
        let mut catalog = PositionCatalog::default();
        catalog.remove(Position::LS);
        match catalog.get(Position::LS) {
            Err(DepthChartError::MalformedCatalog { position }) => {
                assert_eq!(position, Position::LS)
            }
            other => panic!("expected MalformedCatalog, got {:?}", other),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = PositionCatalog::default();
        let json = catalog.to_json().unwrap();
        assert_eq!(PositionCatalog::from_json(&json).unwrap(), catalog);
    }

    #[test]
    fn test_bad_json_is_catalog_error() {
        assert!(matches!(
            PositionCatalog::from_json("{not json"),
            Err(DepthChartError::Catalog(_))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            PositionCatalog::read_from_file("/nonexistent/catalog.json"),
            Err(DepthChartError::Catalog(_))
        ));
    }
}
