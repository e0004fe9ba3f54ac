//! Skyhop Game Engine
//!
//! Platform-agnostic core of the Skyhop airport-hopping game: a player hops
//! between airports, burns fuel, completes "fly to X" quests and is graded
//! against a greedy ideal route. This crate holds every rule of the game and
//! no terminal or storage code.

pub mod airport;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod geo;
pub mod numbers;
pub mod quest;
pub mod rng;
pub mod route;
pub mod score;
pub mod state;
pub mod weather;

// Re-export commonly used types
pub use airport::{Airport, AirportFilter, AirportKind};
pub use catalog::{CatalogError, JsonCatalog};
pub use config::{ConfigError, FuelModel, GameConfig};
pub use engine::{Game, TravelOption, TurnReport};
pub use error::GameError;
pub use geo::distance_km;
pub use quest::{Quest, QuestLedger, QuestStatus, issue_quest};
pub use rng::{CountingRng, RngBundle};
pub use route::{RouteOutcome, RouteResult, plan_route};
pub use score::{EfficiencyReport, Grade, QuestActuals, grade_for_score, score_quest};
pub use state::{GamePhase, GameState, PlayerState, StatusSnapshot};
pub use weather::{EventEffect, Weather, WeatherEvent, generate_events};

/// Read-only source of airports.
/// Platform-specific implementations (database, bundled JSON, test fixtures)
/// provide this; the engine queries it once per `start()`.
pub trait AirportCatalog {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up a single airport by ICAO code (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn get_by_icao(&self, icao: &str) -> Result<Option<Airport>, Self::Error>;

    /// List airports matching the filter, in a deterministic order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn list_airports(&self, filter: &AirportFilter) -> Result<Vec<Airport>, Self::Error>;
}

impl<C: AirportCatalog + ?Sized> AirportCatalog for &C {
    type Error = C::Error;

    fn get_by_icao(&self, icao: &str) -> Result<Option<Airport>, Self::Error> {
        (**self).get_by_icao(icao)
    }

    fn list_airports(&self, filter: &AirportFilter) -> Result<Vec<Airport>, Self::Error> {
        (**self).list_airports(filter)
    }
}
