//! Centralized balance and tuning constants for Skyhop game logic.
//!
//! Defaults for [`crate::GameConfig`] plus the fixed scoring curve. Scoring
//! constants are not configurable so grades stay comparable between runs.

// Game defaults ------------------------------------------------------------
pub(crate) const DEFAULT_HOME_ICAO: &str = "EFHK";
pub(crate) const DEFAULT_COUNTRY: &str = "FI";
pub(crate) const DEFAULT_START_FUEL: f64 = 100.0;
pub(crate) const DEFAULT_FUEL_FIXED_COST: f64 = 2.0;
pub(crate) const DEFAULT_FUEL_PER_KM: f64 = 0.08;
pub(crate) const DEFAULT_OPTION_LIMIT: usize = 5;
pub(crate) const DEFAULT_ROUTE_NEIGHBORS: usize = 5;

// Scoring ------------------------------------------------------------------
pub(crate) const SCORE_EXPONENT: f64 = 1.1;
pub(crate) const SCORE_MAX: f64 = 100.0;
pub(crate) const GRADE_A_MIN: u8 = 90;
pub(crate) const GRADE_B_MIN: u8 = 80;
pub(crate) const GRADE_C_MIN: u8 = 70;
pub(crate) const GRADE_D_MIN: u8 = 60;

// Messages -----------------------------------------------------------------
pub(crate) const MSG_NEW_QUEST_PREFIX: &str = "New quest";
pub(crate) const MSG_OUT_OF_FUEL: &str = "Out of fuel! Your flight has ended.";
pub(crate) const MSG_NO_QUEST: &str = "No quest available: every airport is already behind you.";
