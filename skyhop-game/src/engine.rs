//! Game engine: turn sequencing, fuel accounting and quest bookkeeping.
//!
//! A turn is `options()` followed by `pick()`. The engine owns the only
//! [`GameState`] and the RNG streams; callers see structured values and plain
//! message strings.
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::AirportCatalog;
use crate::airport::Airport;
use crate::config::GameConfig;
use crate::constants::{MSG_NEW_QUEST_PREFIX, MSG_NO_QUEST, MSG_OUT_OF_FUEL};
use crate::error::GameError;
use crate::numbers::round_f64_to_u32;
use crate::quest::{QuestLedger, issue_quest};
use crate::rng::RngBundle;
use crate::route::RouteResult;
use crate::score::{EfficiencyReport, score_quest};
use crate::state::{GamePhase, GameState, PlayerState, StatusSnapshot};
use crate::weather::{HopEvents, WeatherEvent, combined_effect, generate_events};

/// A destination offered for the current turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelOption {
    pub airport: Airport,
    /// Leg length from the current airport.
    pub distance_km: f64,
}

/// Everything that happened during one `pick()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub destination: Airport,
    pub leg_km: f64,
    pub events: HopEvents,
    /// Combined weather multiplier applied to this leg only.
    pub fuel_factor: f64,
    /// Weather-free cost of the leg.
    pub base_burn: f64,
    /// Fuel actually burned.
    pub burn: f64,
    /// Fuel left on landing, before any quest-completion refuel.
    pub fuel_after: f64,
    /// Present when the hop completed a quest.
    pub quest_report: Option<EfficiencyReport>,
    /// The hop emptied the tank and the game is over.
    pub ended: bool,
}

impl TurnReport {
    /// Description lines of the weather events drawn for this hop.
    pub fn event_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().map(WeatherEvent::description)
    }
}

/// The airport-hopping game.
#[derive(Debug)]
pub struct Game<C> {
    catalog: C,
    config: GameConfig,
    rngs: RngBundle,
    phase: GamePhase,
    airports: Vec<Airport>,
    state: Option<GameState>,
    last_options: Vec<TravelOption>,
    ledger: Option<QuestLedger>,
}

impl<C: AirportCatalog> Game<C> {
    /// Create an idle game. Nothing is loaded until [`Game::start`].
    #[must_use]
    pub fn new(catalog: C, config: GameConfig, seed: u64) -> Self {
        Self {
            catalog,
            config,
            rngs: RngBundle::from_user_seed(seed),
            phase: GamePhase::NotStarted,
            airports: Vec::new(),
            state: None,
            last_options: Vec::new(),
            ledger: None,
        }
    }

    /// Load the catalog, place the player at the home airport with a full
    /// tank and issue the first quest. Calling it again restarts the game.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid, the catalog cannot be queried,
    /// or the home airport does not exist.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.config.validate()?;
        let airports = self
            .catalog
            .list_airports(&self.config.airport_filter())
            .map_err(GameError::catalog)?;
        let home_icao = self.config.home_icao.trim();
        let home = match airports
            .iter()
            .find(|a| a.icao.eq_ignore_ascii_case(home_icao))
            .cloned()
        {
            Some(home) => home,
            None => self
                .catalog
                .get_by_icao(home_icao)
                .map_err(GameError::catalog)?
                .ok_or_else(|| GameError::HomeAirportMissing {
                    icao: home_icao.to_string(),
                })?,
        };

        info!(
            "game started at {} with {} airports (seed {})",
            home.icao,
            airports.len(),
            self.rngs.seed()
        );
        self.airports = airports;
        self.state = Some(GameState::new(PlayerState::new(
            home,
            self.config.start_fuel,
        )));
        self.last_options.clear();
        self.ledger = None;
        self.phase = GamePhase::Running;
        self.issue_next_quest();
        Ok(())
    }

    /// Destinations for this turn, nearest first, at most `limit`.
    ///
    /// With an active quest only airports strictly closer to its target than
    /// the player are offered. Without one every other airport qualifies.
    /// An airport sharing the target's coordinates has no forward options, so
    /// landing there leaves the list empty while the game keeps running.
    /// The result is remembered for [`Game::pick`].
    ///
    /// # Errors
    ///
    /// Fails before `start()` and after the game has ended.
    pub fn options(&mut self, limit: usize) -> Result<Vec<TravelOption>, GameError> {
        self.ensure_running()?;
        let state = self.state.as_ref().ok_or(GameError::NotStarted)?;
        let here = &state.player.location;
        let target = self.get_target_airport();
        let remaining = target.map_or(f64::INFINITY, |t| here.distance_to(t));

        let mut options: Vec<TravelOption> = self
            .airports
            .iter()
            .filter(|a| !a.same_icao(here))
            .filter(|a| target.is_none_or(|t| a.distance_to(t) < remaining))
            .map(|a| TravelOption {
                airport: a.clone(),
                distance_km: here.distance_to(a),
            })
            .collect();
        if options.is_empty()
            && let Some(target) = target
        {
            warn!(
                "no forward options from {} toward quest target {}",
                here.icao, target.icao
            );
        }
        options.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        options.truncate(limit);

        self.last_options.clone_from(&options);
        Ok(options)
    }

    /// Fly to option `index` (1-based) of the last [`Game::options`] call.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidChoice`] leaves the game untouched and play goes
    /// on. [`GameError::NotStarted`] and [`GameError::GameOver`] are fatal.
    pub fn pick(&mut self, index: usize) -> Result<TurnReport, GameError> {
        self.ensure_running()?;
        let available = self.last_options.len();
        if index == 0 || index > available {
            return Err(GameError::InvalidChoice { index, available });
        }
        let option = self.last_options[index - 1].clone();
        let state = self.state.as_mut().ok_or(GameError::NotStarted)?;

        let events = generate_events(self.rngs.weather());
        let effect = combined_effect(&events);
        let base_burn = self.config.fuel.leg_cost(option.distance_km);
        let burn = effect.apply(base_burn);

        state
            .player
            .fly_to(option.airport.clone(), option.distance_km);
        let fuel_after = state.player.burn(burn);
        if let Some(ledger) = self.ledger.as_mut() {
            ledger.record_leg(base_burn, burn);
        }
        self.last_options.clear();
        debug!(
            "hop {} -> {}: {:.1} km, base {:.2}, factor {:.3}, burn {:.2}, fuel left {:.2}",
            state.player.hops,
            option.airport.icao,
            option.distance_km,
            base_burn,
            effect.factor,
            burn,
            fuel_after
        );

        let mut report = TurnReport {
            destination: option.airport,
            leg_km: option.distance_km,
            events,
            fuel_factor: effect.factor,
            base_burn,
            burn,
            fuel_after,
            quest_report: None,
            ended: false,
        };

        if state.player.is_out_of_fuel() {
            state.system_msg = MSG_OUT_OF_FUEL.to_string();
            info!(
                "out of fuel at {} after {} hops and {} quests",
                state.player.location.icao, state.player.hops, state.points
            );
            self.phase = GamePhase::Ended;
            report.ended = true;
            return Ok(report);
        }

        if state.at_quest_target() {
            report.quest_report = self.complete_quest();
        } else if !state.system_msg.starts_with(MSG_NEW_QUEST_PREFIX) {
            state.system_msg.clear();
        }
        Ok(report)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// End the game at the player's request.
    pub fn exit_game(&mut self) {
        if self.phase == GamePhase::Running {
            info!("game exited by player");
            self.phase = GamePhase::Ended;
        }
        self.last_options.clear();
    }

    /// Status snapshot for the presentation layer. Still available after the
    /// game has ended.
    ///
    /// # Errors
    ///
    /// Fails before `start()`.
    pub fn status(&self) -> Result<StatusSnapshot, GameError> {
        self.state
            .as_ref()
            .map(|s| s.snapshot(self.get_target_airport()))
            .ok_or(GameError::NotStarted)
    }

    /// Rounded kilometres left to the quest target.
    #[must_use]
    pub fn remaining_distance_to_target(&self) -> Option<u32> {
        let state = self.state.as_ref()?;
        let target = self.get_target_airport()?;
        Some(round_f64_to_u32(state.player.location.distance_to(target)))
    }

    #[must_use]
    pub fn get_target_airport(&self) -> Option<&Airport> {
        let quest = self.state.as_ref()?.active_quest.as_ref()?;
        self.airports.iter().find(|a| a.icao == quest.target_icao)
    }

    /// The playable catalog loaded at `start()`.
    #[must_use]
    pub fn get_airports(&self) -> &[Airport] {
        &self.airports
    }

    /// Ideal route planned when the active quest was issued.
    #[must_use]
    pub fn ideal_route(&self) -> Option<&RouteResult> {
        self.ledger.as_ref().map(|l| &l.ideal)
    }

    /// Quest-scoped spending so far.
    #[must_use]
    pub const fn ledger(&self) -> Option<&QuestLedger> {
        self.ledger.as_ref()
    }

    /// Hand the pending system message to the caller and clear it.
    pub fn take_system_msg(&mut self) -> Option<String> {
        let state = self.state.as_mut()?;
        if state.system_msg.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut state.system_msg))
        }
    }

    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub const fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Options remembered from the last `options()` call.
    #[must_use]
    pub fn last_options(&self) -> &[TravelOption] {
        &self.last_options
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rngs.seed()
    }

    /// Replace the RNG streams. Takes effect from the next draw.
    pub fn reseed(&mut self, seed: u64) {
        self.rngs = RngBundle::from_user_seed(seed);
    }

    const fn ensure_running(&self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::NotStarted => Err(GameError::NotStarted),
            GamePhase::Ended => Err(GameError::GameOver),
            GamePhase::Running => Ok(()),
        }
    }

    /// Issue a quest from the player's current airport and reset the ledger.
    /// Returns the announcement, or `None` when no target is left.
    fn issue_next_quest(&mut self) -> Option<String> {
        let state = self.state.as_mut()?;
        let issued = issue_quest(
            &state.player.location,
            &self.airports,
            self.rngs.quest(),
            self.config.fuel,
            self.config.route_neighbors,
        );
        let Some((quest, ideal)) = issued else {
            state.active_quest = None;
            state.system_msg.clear();
            self.ledger = None;
            return None;
        };

        let target = self
            .airports
            .iter()
            .find(|a| a.icao == quest.target_icao)
            .map_or_else(|| quest.target_icao.clone(), ToString::to_string);
        let announcement = format!("{MSG_NEW_QUEST_PREFIX}: fly to {target}.");
        self.ledger = Some(QuestLedger::new(
            ideal,
            state.player.km_total,
            state.player.hops,
        ));
        state.active_quest = Some(quest);
        state.system_msg.clone_from(&announcement);
        Some(announcement)
    }

    fn complete_quest(&mut self) -> Option<EfficiencyReport> {
        let state = self.state.as_mut()?;
        let report = self.ledger.take().map(|ledger| {
            score_quest(
                &ledger.ideal,
                &ledger.actuals(state.player.km_total, state.player.hops),
            )
        });
        state.complete_active_quest();
        state.player.refuel(self.config.start_fuel);

        let mut message = format!(
            "Quest complete! You reached {}. Points: {}. Tank refilled.",
            state.player.location, state.points
        );
        if let Some(report) = &report {
            info!(
                "quest {} completed: score {} grade {}",
                state.player.location.icao, report.score, report.grade
            );
            message.push('\n');
            message.push_str(&report.summary());
        }

        let next = self
            .issue_next_quest()
            .unwrap_or_else(|| MSG_NO_QUEST.to_string());
        if let Some(state) = self.state.as_mut() {
            state.system_msg = format!("{message}\n{next}");
        }
        report
    }
}
