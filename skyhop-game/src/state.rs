use serde::{Deserialize, Serialize};

use crate::airport::Airport;
use crate::numbers::{round_f64_to_i64, round_f64_to_u32};
use crate::quest::{Quest, QuestStatus};

/// Lifecycle of a [`crate::Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Running,
    Ended,
}

/// Where the player is and what they have spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub location: Airport,
    /// Remaining fuel, never negative.
    pub fuel: f64,
    pub hops: u32,
    pub km_total: f64,
}

impl PlayerState {
    #[must_use]
    pub const fn new(home: Airport, fuel: f64) -> Self {
        Self {
            location: home,
            fuel,
            hops: 0,
            km_total: 0.0,
        }
    }

    /// Move to `destination`, adding one hop and `leg_km` to the odometer.
    pub fn fly_to(&mut self, destination: Airport, leg_km: f64) {
        self.location = destination;
        self.hops = self.hops.saturating_add(1);
        self.km_total += leg_km.max(0.0);
    }

    /// Subtract `amount` from the tank, clamping at zero. Returns fuel left.
    pub fn burn(&mut self, amount: f64) -> f64 {
        self.fuel = (self.fuel - amount).max(0.0);
        self.fuel
    }

    pub fn refuel(&mut self, full: f64) {
        self.fuel = full;
    }

    #[must_use]
    pub fn is_out_of_fuel(&self) -> bool {
        self.fuel <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: PlayerState,
    #[serde(default)]
    pub active_quest: Option<Quest>,
    /// Finished quests in completion order. Append-only.
    #[serde(default)]
    pub completed_quests: Vec<Quest>,
    #[serde(default)]
    pub points: u32,
    /// Message for the presentation layer; empty when there is nothing to say.
    #[serde(default)]
    pub system_msg: String,
}

impl GameState {
    #[must_use]
    pub const fn new(player: PlayerState) -> Self {
        Self {
            player,
            active_quest: None,
            completed_quests: Vec::new(),
            points: 0,
            system_msg: String::new(),
        }
    }

    /// Whether the player is standing on the active quest's target.
    #[must_use]
    pub fn at_quest_target(&self) -> bool {
        self.active_quest
            .as_ref()
            .is_some_and(|q| q.target_icao == self.player.location.icao)
    }

    /// Mark the active quest completed, archive it and award one point.
    pub fn complete_active_quest(&mut self) -> Option<&Quest> {
        let mut quest = self.active_quest.take()?;
        quest.status = QuestStatus::Completed;
        self.completed_quests.push(quest);
        self.points = self.points.saturating_add(1);
        self.completed_quests.last()
    }

    /// Flat view for the presentation layer. `target` is the active quest's
    /// airport, if known.
    #[must_use]
    pub fn snapshot(&self, target: Option<&Airport>) -> StatusSnapshot {
        let here = &self.player.location;
        StatusSnapshot {
            icao: here.icao.clone(),
            name: here.name.clone(),
            country: here.country.clone(),
            km_total: round_f64_to_i64(self.player.km_total),
            hops: self.player.hops,
            fuel: self.player.fuel,
            quest_target: self.active_quest.as_ref().map(|q| q.target_icao.clone()),
            quest_distance: target.map(|t| round_f64_to_u32(here.distance_to(t))),
            points: self.points,
            system_msg: self.system_msg.clone(),
        }
    }
}

/// Read-only status returned by [`crate::Game::status`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub icao: String,
    pub name: String,
    pub country: String,
    pub km_total: i64,
    pub hops: u32,
    pub fuel: f64,
    pub quest_target: Option<String>,
    /// Rounded great-circle distance to the quest target.
    pub quest_distance: Option<u32>,
    pub points: u32,
    pub system_msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helsinki() -> Airport {
        Airport::new("EFHK", "Helsinki", "FI", 60.3172, 24.9633)
    }

    fn tampere() -> Airport {
        Airport::new("EFTP", "Tampere", "FI", 61.4141, 23.6044)
    }

    #[test]
    fn burn_clamps_at_zero() {
        let mut player = PlayerState::new(helsinki(), 1.0);
        assert!(player.burn(5.0).abs() < f64::EPSILON);
        assert!(player.is_out_of_fuel());
        player.refuel(100.0);
        assert!((player.burn(2.5) - 97.5).abs() < 1e-12);
    }

    #[test]
    fn fly_to_updates_odometer() {
        let mut player = PlayerState::new(helsinki(), 100.0);
        player.fly_to(tampere(), 144.6);
        assert_eq!(player.location.icao, "EFTP");
        assert_eq!(player.hops, 1);
        assert!((player.km_total - 144.6).abs() < 1e-12);
    }

    #[test]
    fn completing_quest_awards_a_point() {
        let mut state = GameState::new(PlayerState::new(tampere(), 50.0));
        state.active_quest = Some(Quest::new("EFTP"));
        assert!(state.at_quest_target());
        let done = state.complete_active_quest().cloned().unwrap();
        assert_eq!(done.status, QuestStatus::Completed);
        assert_eq!(state.points, 1);
        assert_eq!(state.completed_quests.len(), 1);
        assert!(state.active_quest.is_none());
        assert!(state.complete_active_quest().is_none());
        assert_eq!(state.points, 1);
    }

    #[test]
    fn snapshot_rounds_distances() {
        let mut state = GameState::new(PlayerState::new(helsinki(), 80.0));
        state.player.km_total = 12.6;
        state.active_quest = Some(Quest::new("EFTP"));
        let target = tampere();
        let snap = state.snapshot(Some(&target));
        assert_eq!(snap.icao, "EFHK");
        assert_eq!(snap.km_total, 13);
        assert_eq!(snap.quest_target.as_deref(), Some("EFTP"));
        let expected = round_f64_to_u32(helsinki().distance_to(&target));
        assert_eq!(snap.quest_distance, Some(expected));

        let none = GameState::new(PlayerState::new(helsinki(), 80.0)).snapshot(None);
        assert!(none.quest_target.is_none());
        assert!(none.quest_distance.is_none());
    }
}
