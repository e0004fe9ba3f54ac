//! Route efficiency scoring.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    GRADE_A_MIN, GRADE_B_MIN, GRADE_C_MIN, GRADE_D_MIN, SCORE_EXPONENT, SCORE_MAX,
};
use crate::numbers::{round_to_percent, usize_to_u32};
use crate::route::RouteResult;

/// Letter grade for a quest score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        };
        f.write_str(letter)
    }
}

/// Grade thresholds: 90 A, 80 B, 70 C, 60 D, anything lower E.
#[must_use]
pub const fn grade_for_score(score: u8) -> Grade {
    if score >= GRADE_A_MIN {
        Grade::A
    } else if score >= GRADE_B_MIN {
        Grade::B
    } else if score >= GRADE_C_MIN {
        Grade::C
    } else if score >= GRADE_D_MIN {
        Grade::D
    } else {
        Grade::E
    }
}

/// What the player spent on one quest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuestActuals {
    /// Weather-free fuel cost of the legs flown.
    pub base_fuel: f64,
    /// Fuel actually burned, weather included.
    pub real_fuel: f64,
    pub distance_km: f64,
    pub hops: u32,
}

/// Comparison of one finished quest against its ideal route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyReport {
    pub ideal_fuel: f64,
    pub ideal_distance_km: f64,
    pub ideal_hops: u32,
    /// Whether the ideal figures come from a successful plan. When false the
    /// player's own figures stand in and the score is trivially 100.
    pub ideal_available: bool,
    pub actual: QuestActuals,
    /// Extra fuel burned because of weather, never negative.
    pub weather_penalty: f64,
    /// `ideal_fuel / actual.base_fuel`, 1.0 for zero-hop quests.
    pub efficiency: f64,
    pub score: u8,
    pub grade: Grade,
}

impl EfficiencyReport {
    /// One-line summary for the system message.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut line = format!(
            "Efficiency {}/100 (grade {}). Fuel {:.1} vs ideal {:.1}, distance {:.0} km vs ideal {:.0} km, hops {} vs ideal {}.",
            self.score,
            self.grade,
            self.actual.base_fuel,
            self.ideal_fuel,
            self.actual.distance_km,
            self.ideal_distance_km,
            self.actual.hops,
            self.ideal_hops,
        );
        if self.weather_penalty > 0.0 {
            line.push_str(&format!(" Weather cost {:.1} extra fuel.", self.weather_penalty));
        }
        if !self.ideal_available {
            line.push_str(" (No ideal route available for comparison.)");
        }
        line
    }
}

/// Score a finished quest.
///
/// `score = round(100 * eff^1.1)` clamped to `[0, 100]`, where
/// `eff = ideal_fuel / actual_base_fuel`.
#[must_use]
pub fn score_quest(ideal: &RouteResult, actual: &QuestActuals) -> EfficiencyReport {
    let ideal_available = ideal.success();
    let (ideal_fuel, ideal_distance_km, ideal_hops) = if ideal_available {
        (ideal.base_fuel, ideal.distance_km, usize_to_u32(ideal.hops))
    } else {
        (actual.base_fuel, actual.distance_km, actual.hops)
    };

    let efficiency = if actual.base_fuel > 0.0 {
        ideal_fuel / actual.base_fuel
    } else {
        1.0
    };
    let score = round_to_percent(SCORE_MAX * efficiency.max(0.0).powf(SCORE_EXPONENT));

    EfficiencyReport {
        ideal_fuel,
        ideal_distance_km,
        ideal_hops,
        ideal_available,
        actual: *actual,
        weather_penalty: (actual.real_fuel - actual.base_fuel).max(0.0),
        efficiency,
        score,
        grade: grade_for_score(score),
    }
}
