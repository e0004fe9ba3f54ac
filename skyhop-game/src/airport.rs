//! Airport values and catalog filters.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::geo;

/// An airport the player can fly to. Immutable once loaded from a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// Four-letter ICAO code, the primary key.
    pub icao: String,
    pub name: String,
    /// ISO 3166 alpha-2 country code.
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl Airport {
    #[must_use]
    pub fn new(icao: &str, name: &str, country: &str, lat: f64, lon: f64) -> Self {
        Self {
            icao: icao.trim().to_ascii_uppercase(),
            name: name.to_string(),
            country: country.to_string(),
            lat,
            lon,
        }
    }

    /// `(lat, lon)` pair in degrees.
    #[must_use]
    pub const fn coords(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }

    /// Great-circle distance to another airport in kilometres.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        geo::distance_km(self.coords(), other.coords())
    }

    /// Whether both airports carry the same ICAO code.
    #[must_use]
    pub fn same_icao(&self, other: &Self) -> bool {
        self.icao == other.icao
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.icao)
    }
}

/// Facility classification used by catalog filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirportKind {
    SmallAirport,
    MediumAirport,
    LargeAirport,
    Heliport,
    SeaplaneBase,
    #[serde(rename = "balloonport")]
    BalloonPort,
    Closed,
}

impl AirportKind {
    /// The kinds a fixed-wing game aircraft can use.
    pub const FIXED_WING: [Self; 3] = [Self::SmallAirport, Self::MediumAirport, Self::LargeAirport];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SmallAirport => "small_airport",
            Self::MediumAirport => "medium_airport",
            Self::LargeAirport => "large_airport",
            Self::Heliport => "heliport",
            Self::SeaplaneBase => "seaplane_base",
            Self::BalloonPort => "balloonport",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for AirportKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small_airport" => Ok(Self::SmallAirport),
            "medium_airport" => Ok(Self::MediumAirport),
            "large_airport" => Ok(Self::LargeAirport),
            "heliport" => Ok(Self::Heliport),
            "seaplane_base" => Ok(Self::SeaplaneBase),
            "balloonport" => Ok(Self::BalloonPort),
            "closed" => Ok(Self::Closed),
            _ => Err(()),
        }
    }
}

/// Query passed to [`crate::AirportCatalog::list_airports`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportFilter {
    pub country: String,
    pub kinds: Vec<AirportKind>,
    /// Drop records with missing or zero coordinates.
    pub require_coordinates: bool,
}

impl AirportFilter {
    /// Fixed-wing airports with valid coordinates in `country`.
    #[must_use]
    pub fn country(country: &str) -> Self {
        Self {
            country: country.to_string(),
            kinds: AirportKind::FIXED_WING.to_vec(),
            require_coordinates: true,
        }
    }

    #[must_use]
    pub fn with_kinds(mut self, kinds: &[AirportKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    #[must_use]
    pub fn allows(&self, kind: AirportKind) -> bool {
        self.kinds.contains(&kind)
    }
}
