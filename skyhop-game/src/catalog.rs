//! In-memory airport catalog backed by a JSON document.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::AirportCatalog;
use crate::airport::{Airport, AirportFilter, AirportKind};

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("duplicate ICAO code {0} in catalog")]
    DuplicateIcao(String),
}

/// One row of the airport table, with the columns the game needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub ident: String,
    pub name: String,
    pub iso_country: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub latitude_deg: Option<f64>,
    #[serde(default)]
    pub longitude_deg: Option<f64>,
}

impl AirportRecord {
    fn has_coordinates(&self) -> bool {
        matches!(
            (self.latitude_deg, self.longitude_deg),
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0
        )
    }

    fn kind(&self) -> Option<AirportKind> {
        self.kind.parse().ok()
    }

    fn matches(&self, filter: &AirportFilter) -> bool {
        if self.iso_country != filter.country {
            return false;
        }
        if !self.kind().is_some_and(|kind| filter.allows(kind)) {
            return false;
        }
        !filter.require_coordinates || self.has_coordinates()
    }

    fn to_airport(&self) -> Airport {
        Airport::new(
            &self.ident,
            &self.name,
            &self.iso_country,
            self.latitude_deg.unwrap_or_default(),
            self.longitude_deg.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    airports: Vec<AirportRecord>,
}

/// Read-only airport table held in memory.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    records: Vec<AirportRecord>,
}

impl JsonCatalog {
    /// Parse a catalog from a `{"airports": [...]}` JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or an ICAO code repeats.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::from_records(doc.airports)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build a catalog from already-parsed records.
    ///
    /// # Errors
    ///
    /// Returns an error if an ICAO code appears twice.
    pub fn from_records(records: Vec<AirportRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for record in &records {
            let icao = record.ident.trim().to_ascii_uppercase();
            if !seen.insert(icao.clone()) {
                return Err(CatalogError::DuplicateIcao(icao));
            }
        }
        Ok(Self { records })
    }

    /// Bundled Finnish airport table.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded data is corrupt.
    pub fn load_from_static() -> Result<Self, CatalogError> {
        Self::from_json(include_str!("../assets/data/airports.json"))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AirportCatalog for JsonCatalog {
    type Error = CatalogError;

    fn get_by_icao(&self, icao: &str) -> Result<Option<Airport>, Self::Error> {
        let wanted = icao.trim();
        Ok(self
            .records
            .iter()
            .find(|r| r.ident.eq_ignore_ascii_case(wanted))
            .map(AirportRecord::to_airport))
    }

    fn list_airports(&self, filter: &AirportFilter) -> Result<Vec<Airport>, Self::Error> {
        let mut airports: Vec<Airport> = self
            .records
            .iter()
            .filter(|r| r.matches(filter))
            .map(AirportRecord::to_airport)
            .collect();
        airports.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.icao.cmp(&b.icao)));
        Ok(airports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "airports": [
            {"ident": "EFTP", "name": "Tampere", "iso_country": "FI", "type": "medium_airport",
             "latitude_deg": 61.41, "longitude_deg": 23.6},
            {"ident": "EFHK", "name": "Helsinki", "iso_country": "FI", "type": "large_airport",
             "latitude_deg": 60.31, "longitude_deg": 24.96},
            {"ident": "EFHT", "name": "Heliport", "iso_country": "FI", "type": "heliport",
             "latitude_deg": 60.14, "longitude_deg": 24.92},
            {"ident": "EFZZ", "name": "Nowhere", "iso_country": "FI", "type": "small_airport",
             "latitude_deg": 0.0, "longitude_deg": 0.0},
            {"ident": "EFNL", "name": "Unsurveyed", "iso_country": "FI", "type": "small_airport",
             "longitude_deg": 26.1},
            {"ident": "ESSA", "name": "Arlanda", "iso_country": "SE", "type": "large_airport",
             "latitude_deg": 59.65, "longitude_deg": 17.91}
        ]
    }"#;

    #[test]
    fn list_filters_and_sorts_by_name() {
        let catalog = JsonCatalog::from_json(SAMPLE).unwrap();
        let listed = catalog
            .list_airports(&AirportFilter::country("FI"))
            .unwrap();
        let codes: Vec<&str> = listed.iter().map(|a| a.icao.as_str()).collect();
        assert_eq!(codes, ["EFHK", "EFTP"]);
    }

    #[test]
    fn coordinates_requirement_can_be_lifted() {
        let catalog = JsonCatalog::from_json(SAMPLE).unwrap();
        let mut filter = AirportFilter::country("FI");
        filter.require_coordinates = false;
        let listed = catalog.list_airports(&filter).unwrap();
        assert_eq!(listed.len(), 4);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = JsonCatalog::from_json(SAMPLE).unwrap();
        let essa = catalog.get_by_icao("essa").unwrap().unwrap();
        assert_eq!(essa.country, "SE");
        assert!(catalog.get_by_icao("XXXX").unwrap().is_none());
    }

    #[test]
    fn duplicate_icao_is_rejected() {
        let json = r#"{"airports": [
            {"ident": "EFHK", "name": "A", "iso_country": "FI", "type": "large_airport"},
            {"ident": "efhk", "name": "B", "iso_country": "FI", "type": "large_airport"}
        ]}"#;
        assert!(matches!(
            JsonCatalog::from_json(json),
            Err(CatalogError::DuplicateIcao(code)) if code == "EFHK"
        ));
    }

    #[test]
    fn bundled_catalog_contains_home_airport() {
        let catalog = JsonCatalog::load_from_static().unwrap();
        assert!(!catalog.is_empty());
        let home = catalog.get_by_icao("EFHK").unwrap().unwrap();
        assert_eq!(home.country, "FI");
        let finnish = catalog
            .list_airports(&AirportFilter::country("FI"))
            .unwrap();
        assert_eq!(finnish.len(), 35);
        assert!(finnish.iter().all(|a| a.country == "FI"));
    }
}
