//! Quest issuance and quest-scoped bookkeeping.
use log::{info, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::airport::Airport;
use crate::config::FuelModel;
use crate::route::{RouteResult, plan_route};
use crate::score::QuestActuals;

/// Completion status of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestStatus {
    #[default]
    Active,
    Completed,
}

/// A "fly to `target_icao`" objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub target_icao: String,
    #[serde(default)]
    pub status: QuestStatus,
}

impl Quest {
    #[must_use]
    pub fn new(target_icao: &str) -> Self {
        Self {
            target_icao: target_icao.to_string(),
            status: QuestStatus::Active,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == QuestStatus::Active
    }
}

/// Snapshot taken when a quest is issued: the ideal route plus the fuel and
/// distance the player has spent since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestLedger {
    pub ideal: RouteResult,
    /// Sum of weather-free leg costs flown during the quest.
    pub actual_base_fuel: f64,
    /// Sum of fuel actually burned, weather included.
    pub actual_real_fuel: f64,
    pub start_km: f64,
    pub start_hops: u32,
}

impl QuestLedger {
    #[must_use]
    pub const fn new(ideal: RouteResult, start_km: f64, start_hops: u32) -> Self {
        Self {
            ideal,
            actual_base_fuel: 0.0,
            actual_real_fuel: 0.0,
            start_km,
            start_hops,
        }
    }

    /// Record one flown leg.
    pub fn record_leg(&mut self, base_cost: f64, burned: f64) {
        self.actual_base_fuel += base_cost;
        self.actual_real_fuel += burned;
    }

    /// What the player actually spent, given the current odometer.
    #[must_use]
    pub fn actuals(&self, km_total: f64, hops: u32) -> QuestActuals {
        QuestActuals {
            base_fuel: self.actual_base_fuel,
            real_fuel: self.actual_real_fuel,
            distance_km: (km_total - self.start_km).max(0.0),
            hops: hops.saturating_sub(self.start_hops),
        }
    }
}

/// Pick a new quest target uniformly from `catalog`, excluding `current`, and
/// plan the ideal route to it.
///
/// Returns `None` when no other airport exists.
pub fn issue_quest<R: Rng>(
    current: &Airport,
    catalog: &[Airport],
    rng: &mut R,
    fuel: FuelModel,
    k_neighbors: usize,
) -> Option<(Quest, RouteResult)> {
    let candidates: Vec<&Airport> = catalog.iter().filter(|a| !a.same_icao(current)).collect();
    let Some(target) = candidates.choose(rng).copied() else {
        warn!("no quest target available from {}", current.icao);
        return None;
    };
    let ideal = plan_route(current, target, catalog, fuel, k_neighbors);
    info!(
        "quest issued: {} -> {} (ideal {} hops, {:.1} km, {:.1} fuel, {})",
        current.icao,
        target.icao,
        ideal.hops,
        ideal.distance_km,
        ideal.base_fuel,
        ideal.message()
    );
    Some((Quest::new(&target.icao), ideal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::mock::StepRng;
    use rand_chacha::ChaCha8Rng;

    fn catalog() -> Vec<Airport> {
        vec![
            Airport::new("EFHK", "Helsinki", "FI", 60.3172, 24.9633),
            Airport::new("EFTP", "Tampere", "FI", 61.4141, 23.6044),
            Airport::new("EFOU", "Oulu", "FI", 64.9301, 25.3546),
        ]
    }

    #[test]
    fn never_targets_current_airport() {
        let airports = catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let (quest, ideal) =
                issue_quest(&airports[0], &airports, &mut rng, FuelModel::default(), 5).unwrap();
            assert_ne!(quest.target_icao, "EFHK");
            assert!(quest.is_active());
            assert!(ideal.success());
            assert_eq!(ideal.path.last().map(|a| a.icao.as_str()), Some(quest.target_icao.as_str()));
        }
    }

    #[test]
    fn zero_stream_picks_first_other_airport() {
        let airports = catalog();
        let mut rng = StepRng::new(0, 0);
        let (quest, _) =
            issue_quest(&airports[0], &airports, &mut rng, FuelModel::default(), 5).unwrap();
        assert_eq!(quest.target_icao, "EFTP");
    }

    #[test]
    fn exhausted_catalog_yields_nothing() {
        let airports = vec![Airport::new("EFHK", "Helsinki", "FI", 60.3172, 24.9633)];
        let mut rng = StepRng::new(0, 0);
        assert!(issue_quest(&airports[0], &airports, &mut rng, FuelModel::default(), 5).is_none());
        assert!(issue_quest(&airports[0], &[], &mut rng, FuelModel::default(), 5).is_none());
    }

    #[test]
    fn ledger_accumulates_from_quest_start() {
        let ideal = RouteResult {
            path: Vec::new(),
            hops: 0,
            distance_km: 0.0,
            base_fuel: 0.0,
            outcome: crate::route::RouteOutcome::AlreadyThere,
        };
        let mut ledger = QuestLedger::new(ideal, 120.0, 3);
        ledger.record_leg(10.0, 11.0);
        ledger.record_leg(5.0, 4.75);
        let actual = ledger.actuals(300.0, 5);
        assert!((actual.base_fuel - 15.0).abs() < 1e-12);
        assert!((actual.real_fuel - 15.75).abs() < 1e-12);
        assert!((actual.distance_km - 180.0).abs() < 1e-12);
        assert_eq!(actual.hops, 2);
    }
}
