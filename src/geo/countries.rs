use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::math::{bearing_compass, distance_km, CompassDirection, Coordinate};

/// Dataset shipped with the server, keyed by the country display names used by TheSportsDB
const BUNDLED_COUNTRIES: &str = include_str!("../../data/countries.json");

#[derive(Debug, Clone, thiserror::Error)]
pub enum GeoError {
    #[error("Country not found: {0}")]
    CountryNotFound(String),
    #[error("Invalid country dataset: {0}")]
    InvalidDataset(String),
}

/// Resolves a country name to the coordinate of its map marker
pub trait CoordinateLookup: Send + Sync {
    fn lookup(&self, country: &str) -> Option<Coordinate>;

    fn require(&self, country: &str) -> Result<Coordinate, GeoError> {
        self.lookup(country)
            .ok_or_else(|| GeoError::CountryNotFound(country.to_string()))
    }

    /// Distance in km between two named countries
    fn distance_between(&self, from: &str, to: &str) -> Result<u32, GeoError> {
        Ok(distance_km(self.require(from)?, self.require(to)?))
    }

    /// Compass octant pointing from one named country to another.
    ///
    /// `Ok(None)` means both names share a marker position.
    fn compass_between(&self, from: &str, to: &str) -> Result<Option<CompassDirection>, GeoError> {
        Ok(bearing_compass(self.require(from)?, self.require(to)?))
    }
}

/// A single marker served to the map widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryMarker {
    pub name: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

/// Immutable country table loaded once at startup
#[derive(Debug, Clone)]
pub struct StaticCountryTable {
    countries: BTreeMap<String, Coordinate>,
}

impl StaticCountryTable {
    /// Parses a `{"Country": {"lat": .., "lon": ..}}` document
    pub fn from_json(json: &str) -> Result<Self, GeoError> {
        let countries: BTreeMap<String, Coordinate> =
            serde_json::from_str(json).map_err(|e| GeoError::InvalidDataset(e.to_string()))?;

        for (name, coordinate) in &countries {
            if !(-90.0..=90.0).contains(&coordinate.latitude)
                || !(-180.0..=180.0).contains(&coordinate.longitude)
            {
                return Err(GeoError::InvalidDataset(format!(
                    "{} has out of range coordinate {}",
                    name, coordinate
                )));
            }
        }

        debug!(country_count = countries.len(), "Country table parsed");
        Ok(Self { countries })
    }

    /// Loads the dataset compiled into the binary
    pub fn bundled() -> Result<Self, GeoError> {
        let table = Self::from_json(BUNDLED_COUNTRIES)?;
        info!(country_count = table.len(), "Loaded bundled country table");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// All markers ordered by country name
    pub fn markers(&self) -> Vec<CountryMarker> {
        self.countries
            .iter()
            .map(|(name, coordinate)| CountryMarker {
                name: name.clone(),
                coordinate: *coordinate,
            })
            .collect()
    }
}

impl CoordinateLookup for StaticCountryTable {
    fn lookup(&self, country: &str) -> Option<Coordinate> {
        self.countries.get(country).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_table_loads() {
        let table = StaticCountryTable::bundled().unwrap();
        assert!(table.len() > 100);
        assert!(table.lookup("Argentina").is_some());
        assert!(table.lookup("England").is_some());
        assert!(table.lookup("Republic of Ireland").is_some());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = StaticCountryTable::bundled().unwrap();
        assert!(table.lookup("argentina").is_none());
        assert!(table.lookup("ARGENTINA").is_none());
    }

    #[test]
    fn test_require_missing_country() {
        let table = StaticCountryTable::bundled().unwrap();
        match table.require("Atlantis") {
            Err(GeoError::CountryNotFound(name)) => assert_eq!(name, "Atlantis"),
            other => panic!("Expected CountryNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_distance_between_brazil_and_argentina() {
        let table = StaticCountryTable::bundled().unwrap();
        let km = table.distance_between("Brazil", "Argentina").unwrap();
        assert!((1501..=3000).contains(&km), "got {}", km);
        assert_eq!(km, table.distance_between("Argentina", "Brazil").unwrap());
    }

    #[test]
    fn test_distance_between_unknown_country_fails() {
        let table = StaticCountryTable::bundled().unwrap();
        assert!(matches!(
            table.distance_between("Brazil", "Atlantis"),
            Err(GeoError::CountryNotFound(_))
        ));
        assert!(matches!(
            table.compass_between("Atlantis", "Brazil"),
            Err(GeoError::CountryNotFound(_))
        ));
    }

    #[test]
    fn test_compass_between_countries() {
        let table = StaticCountryTable::bundled().unwrap();
        assert_eq!(
            table.compass_between("Spain", "France").unwrap(),
            Some(CompassDirection::NorthEast)
        );
        assert_eq!(table.compass_between("Spain", "Spain").unwrap(), None);
    }

    #[test]
    fn test_from_json_rejects_out_of_range() {
        let result = StaticCountryTable::from_json(r#"{"Nowhere": {"lat": 95.0, "lon": 0.0}}"#);
        assert!(matches!(result, Err(GeoError::InvalidDataset(_))));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let result = StaticCountryTable::from_json(r#"{"Nowhere": {"lat": 1.0}}"#);
        assert!(matches!(result, Err(GeoError::InvalidDataset(_))));
    }

    #[test]
    fn test_markers_sorted_by_name() {
        let table = StaticCountryTable::from_json(
            r#"{"Spain": {"lat": 40.0, "lon": -3.0}, "Brazil": {"lat": -14.0, "lon": -51.0}}"#,
        )
        .unwrap();
        let markers = table.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].name, "Brazil");
        assert_eq!(markers[1].name, "Spain");

        let json = serde_json::to_value(&markers[0]).unwrap();
        assert_eq!(json["name"], "Brazil");
        assert_eq!(json["lat"], -14.0);
        assert_eq!(json["lon"], -51.0);
    }
}
