//! Game configuration.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::airport::{AirportFilter, AirportKind};
use crate::constants::{
    DEFAULT_COUNTRY, DEFAULT_FUEL_FIXED_COST, DEFAULT_FUEL_PER_KM, DEFAULT_HOME_ICAO,
    DEFAULT_OPTION_LIMIT, DEFAULT_ROUTE_NEIGHBORS, DEFAULT_START_FUEL,
};
use crate::numbers::usize_to_f64;

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("config JSON parse error: {0}")]
    Parse(String),
    #[error("{field} must be at least {min:.2} (got {value:.2})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be greater than zero (got {value:.2})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("allowed_kinds must name at least one airport kind")]
    NoKinds,
}

/// Linear per-leg fuel cost model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelModel {
    #[serde(default = "FuelModel::default_fixed_cost")]
    pub fixed_cost: f64,
    #[serde(default = "FuelModel::default_per_km_cost")]
    pub per_km_cost: f64,
}

impl FuelModel {
    const fn default_fixed_cost() -> f64 {
        DEFAULT_FUEL_FIXED_COST
    }

    const fn default_per_km_cost() -> f64 {
        DEFAULT_FUEL_PER_KM
    }

    #[must_use]
    pub const fn new(fixed_cost: f64, per_km_cost: f64) -> Self {
        Self {
            fixed_cost,
            per_km_cost,
        }
    }

    /// Weather-free fuel cost of a single leg.
    #[must_use]
    pub fn leg_cost(&self, leg_km: f64) -> f64 {
        self.per_km_cost.mul_add(leg_km, self.fixed_cost)
    }
}

impl Default for FuelModel {
    fn default() -> Self {
        Self::new(DEFAULT_FUEL_FIXED_COST, DEFAULT_FUEL_PER_KM)
    }
}

/// Tunables for a single game run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Airport the player starts from.
    pub home_icao: String,
    /// Country whose airports make up the playable catalog.
    pub country: String,
    pub allowed_kinds: Vec<AirportKind>,
    pub start_fuel: f64,
    pub fuel: FuelModel,
    /// Maximum number of destinations offered per turn.
    pub option_limit: usize,
    /// Nearest candidates the route planner weighs per step.
    pub route_neighbors: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            home_icao: DEFAULT_HOME_ICAO.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            allowed_kinds: AirportKind::FIXED_WING.to_vec(),
            start_fuel: DEFAULT_START_FUEL,
            fuel: FuelModel::default(),
            option_limit: DEFAULT_OPTION_LIMIT,
            route_neighbors: DEFAULT_ROUTE_NEIGHBORS,
        }
    }
}

impl GameConfig {
    /// Load configuration from a JSON string. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON string cannot be parsed or if validation fails.
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.home_icao.trim().is_empty() {
            return Err(ConfigError::Empty { field: "home_icao" });
        }
        if self.country.trim().is_empty() {
            return Err(ConfigError::Empty { field: "country" });
        }
        if self.allowed_kinds.is_empty() {
            return Err(ConfigError::NoKinds);
        }
        if self.start_fuel.is_nan() || self.start_fuel <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "start_fuel",
                value: self.start_fuel,
            });
        }
        ensure_min("fuel.fixed_cost", self.fuel.fixed_cost, 0.0)?;
        ensure_min("fuel.per_km_cost", self.fuel.per_km_cost, 0.0)?;
        ensure_min("option_limit", usize_to_f64(self.option_limit), 1.0)?;
        ensure_min("route_neighbors", usize_to_f64(self.route_neighbors), 1.0)?;
        Ok(())
    }

    /// Catalog query for the playable airport set.
    #[must_use]
    pub fn airport_filter(&self) -> AirportFilter {
        AirportFilter::country(&self.country).with_kinds(&self.allowed_kinds)
    }
}

fn ensure_min(field: &'static str, value: f64, min: f64) -> Result<(), ConfigError> {
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::MinViolation { field, min, value })
    }
}
