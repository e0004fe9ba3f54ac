//! Greedy "ideal route" planner.
//!
//! The planner is the yardstick quests are scored against. From the current
//! airport it only considers airports strictly closer to the target, keeps the
//! `k` nearest of those by leg length, and takes the one that cuts the most
//! remaining distance (cheaper leg wins ties). Because remaining distance
//! strictly shrinks every step, the walk always terminates.
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::airport::Airport;
use crate::config::FuelModel;

/// How a planning run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteOutcome {
    /// Reached the target.
    Arrived,
    /// Start and target are the same airport.
    AlreadyThere,
    /// The catalog was empty.
    NoAirports,
    /// Start or target is not part of the catalog.
    NotInCatalog,
    /// Stuck: no airport is closer to the target than the current one.
    NoForwardOptions,
}

impl RouteOutcome {
    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self, Self::Arrived | Self::AlreadyThere)
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Arrived => "ok",
            Self::AlreadyThere => "start==target",
            Self::NoAirports => "no airports",
            Self::NotInCatalog => "start/target not in list",
            Self::NoForwardOptions => "no forward options",
        }
    }
}

impl fmt::Display for RouteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Planned path and its weather-free cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Airports visited in order, starting with the start airport. On failure
    /// holds the partial path walked before the planner got stuck.
    pub path: Vec<Airport>,
    pub hops: usize,
    pub distance_km: f64,
    pub base_fuel: f64,
    pub outcome: RouteOutcome,
}

impl RouteResult {
    fn failed(outcome: RouteOutcome) -> Self {
        Self {
            path: Vec::new(),
            hops: 0,
            distance_km: 0.0,
            base_fuel: 0.0,
            outcome,
        }
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.outcome.success()
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.outcome.message()
    }

    /// ICAO codes along the path.
    #[must_use]
    pub fn icao_path(&self) -> Vec<&str> {
        self.path.iter().map(|a| a.icao.as_str()).collect()
    }
}

/// Find an airport in the catalog, first by identity, then by ICAO code.
fn index_of(catalog: &[Airport], wanted: &Airport) -> Option<usize> {
    catalog
        .iter()
        .position(|a| std::ptr::eq(a, wanted))
        .or_else(|| catalog.iter().position(|a| a.same_icao(wanted)))
}

struct Candidate {
    index: usize,
    leg_km: f64,
    to_target_km: f64,
}

/// Plan a greedy route from `start` to `target` over `catalog`.
///
/// `catalog` order must be deterministic: equal-length legs keep their
/// catalog order when trimming to the `k_neighbors` nearest.
#[must_use]
pub fn plan_route(
    start: &Airport,
    target: &Airport,
    catalog: &[Airport],
    fuel: FuelModel,
    k_neighbors: usize,
) -> RouteResult {
    if catalog.is_empty() {
        return RouteResult::failed(RouteOutcome::NoAirports);
    }
    let (Some(start_idx), Some(target_idx)) = (index_of(catalog, start), index_of(catalog, target))
    else {
        return RouteResult::failed(RouteOutcome::NotInCatalog);
    };
    if start_idx == target_idx {
        return RouteResult {
            path: vec![catalog[start_idx].clone()],
            hops: 0,
            distance_km: 0.0,
            base_fuel: 0.0,
            outcome: RouteOutcome::AlreadyThere,
        };
    }

    let target = &catalog[target_idx];
    let keep = k_neighbors.max(1);
    let mut current = &catalog[start_idx];
    let mut path = vec![current.clone()];
    let mut total_km = 0.0;
    let mut total_fuel = 0.0;

    while !current.same_icao(target) {
        let cur_to_target = current.distance_to(target);

        let mut candidates: Vec<Candidate> = catalog
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.same_icao(current))
            .filter_map(|(index, a)| {
                let to_target_km = a.distance_to(target);
                (to_target_km < cur_to_target).then(|| Candidate {
                    index,
                    leg_km: current.distance_to(a),
                    to_target_km,
                })
            })
            .collect();

        // Stable sort keeps catalog order between equal legs.
        candidates.sort_by(|a, b| a.leg_km.total_cmp(&b.leg_km));
        candidates.truncate(keep);

        let mut best: Option<(&Candidate, f64, f64)> = None;
        for cand in &candidates {
            let delta = cur_to_target - cand.to_target_km;
            let cost = fuel.leg_cost(cand.leg_km);
            let better = match best {
                None => true,
                Some((_, best_delta, best_cost)) => {
                    delta > best_delta || (delta == best_delta && cost < best_cost)
                }
            };
            if better {
                best = Some((cand, delta, cost));
            }
        }
        let Some((chosen, _, cost)) = best else {
            debug!(
                "route {} -> {} stuck at {} after {} hops",
                start.icao,
                target.icao,
                current.icao,
                path.len() - 1
            );
            return RouteResult {
                hops: path.len().saturating_sub(1),
                path,
                distance_km: total_km,
                base_fuel: total_fuel,
                outcome: RouteOutcome::NoForwardOptions,
            };
        };

        total_km += chosen.leg_km;
        total_fuel += cost;
        current = &catalog[chosen.index];
        path.push(current.clone());
    }

    RouteResult {
        hops: path.len().saturating_sub(1),
        path,
        distance_km: total_km,
        base_fuel: total_fuel,
        outcome: RouteOutcome::Arrived,
    }
}
