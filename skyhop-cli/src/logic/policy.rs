use std::fmt;

use clap::ValueEnum;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use skyhop_game::{Airport, TravelOption};

/// Kilometres an option cuts off the remaining distance to `target`.
/// Negative when the hop moves away.
#[must_use]
pub fn progress_km(here: &Airport, option: &TravelOption, target: &Airport) -> f64 {
    here.distance_to(target) - option.airport.distance_to(target)
}

/// 1-based index of the option with the most progress toward `target`,
/// shorter leg on ties.
#[must_use]
pub fn recommended_option(
    here: &Airport,
    options: &[TravelOption],
    target: Option<&Airport>,
) -> Option<usize> {
    let target = target?;
    options
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            progress_km(here, a, target)
                .total_cmp(&progress_km(here, b, target))
                .then_with(|| b.distance_km.total_cmp(&a.distance_km))
        })
        .map(|(idx, _)| idx + 1)
}

/// Policy interface for automated play.
pub trait HopPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Pick a 1-based option index, or `None` to stop flying.
    fn choose(
        &mut self,
        here: &Airport,
        options: &[TravelOption],
        target: Option<&Airport>,
    ) -> Option<usize>;
}

/// Built-in strategies for autoplay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameplayStrategy {
    /// Always take the closest destination
    Nearest,
    /// Take the destination that cuts the most distance to the target
    Greedy,
    /// Pick uniformly at random
    Random,
}

impl GameplayStrategy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nearest => "Nearest",
            Self::Greedy => "Greedy",
            Self::Random => "Random",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn HopPolicy> {
        match self {
            Self::Nearest => Box::new(NearestPolicy),
            Self::Greedy => Box::new(GreedyPolicy),
            Self::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct NearestPolicy;
struct GreedyPolicy;

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl HopPolicy for NearestPolicy {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn choose(
        &mut self,
        _here: &Airport,
        options: &[TravelOption],
        _target: Option<&Airport>,
    ) -> Option<usize> {
        (!options.is_empty()).then_some(1)
    }
}

impl HopPolicy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose(
        &mut self,
        here: &Airport,
        options: &[TravelOption],
        target: Option<&Airport>,
    ) -> Option<usize> {
        recommended_option(here, options, target).or_else(|| (!options.is_empty()).then_some(1))
    }
}

impl HopPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose(
        &mut self,
        _here: &Airport,
        options: &[TravelOption],
        _target: Option<&Airport>,
    ) -> Option<usize> {
        if options.is_empty() {
            None
        } else {
            Some(self.rng.gen_range(1..=options.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(icao: &str, lat: f64, lon: f64, here: &Airport) -> TravelOption {
        let airport = Airport::new(icao, icao, "FI", lat, lon);
        TravelOption {
            distance_km: here.distance_to(&airport),
            airport,
        }
    }

    fn setup() -> (Airport, Airport, Vec<TravelOption>) {
        let here = Airport::new("HOME", "Home", "FI", 60.0, 25.0);
        let target = Airport::new("TGT", "Target", "FI", 65.0, 25.0);
        let options = vec![
            option("NEAR", 60.2, 25.0, &here),
            option("FAR", 62.0, 25.0, &here),
            option("MID", 61.0, 25.0, &here),
        ];
        (here, target, options)
    }

    #[test]
    fn nearest_takes_first_option() {
        let (here, target, options) = setup();
        let mut policy = GameplayStrategy::Nearest.create_policy(1);
        assert_eq!(policy.choose(&here, &options, Some(&target)), Some(1));
        assert_eq!(policy.choose(&here, &[], Some(&target)), None);
        assert_eq!(policy.name(), "nearest");
    }

    #[test]
    fn greedy_maximizes_progress() {
        let (here, target, options) = setup();
        let mut policy = GameplayStrategy::Greedy.create_policy(1);
        assert_eq!(policy.choose(&here, &options, Some(&target)), Some(2));
        assert_eq!(policy.choose(&here, &options, None), Some(1));
    }

    #[test]
    fn random_stays_in_range_and_replays() {
        let (here, target, options) = setup();
        let mut a = GameplayStrategy::Random.create_policy(9);
        let mut b = GameplayStrategy::Random.create_policy(9);
        for _ in 0..50 {
            let pick = a.choose(&here, &options, Some(&target));
            assert!(pick.is_some_and(|i| (1..=3).contains(&i)));
            assert_eq!(pick, b.choose(&here, &options, Some(&target)));
        }
    }

    #[test]
    fn progress_is_signed() {
        let (here, target, options) = setup();
        assert!(progress_km(&here, &options[1], &target) > 0.0);
        let backwards = option("BACK", 59.0, 25.0, &here);
        assert!(progress_km(&here, &backwards, &target) < 0.0);
    }
}
