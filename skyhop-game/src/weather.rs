//! Weather events and their one-leg fuel effects
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Weather conditions drawn for each hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Weather {
    #[default]
    Clear,
    Storm,
    Rain,
    Snow,
    Tailwind,
}

/// Static presentation and balance data for one weather kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherProfile {
    pub icon: &'static str,
    /// Radio chatter, one line picked at random per event.
    pub flavor: [&'static str; 2],
    /// Relative change in fuel burn, e.g. `0.10` for +10%.
    pub fuel_modifier: f64,
    pub effect: &'static str,
}

const CLEAR: WeatherProfile = WeatherProfile {
    icon: "☀️",
    flavor: [
        "Sky clear, smooth flying ahead!",
        "Sun shining, perfect conditions for the flight.",
    ],
    fuel_modifier: 0.0,
    effect: "Normal fuel consumption.",
};

const STORM: WeatherProfile = WeatherProfile {
    icon: "⛈️",
    flavor: [
        "Storm ahead, fasten your seatbelt!",
        "Turbulence alert, incoming storm!",
    ],
    fuel_modifier: 0.10,
    effect: "+10% fuel consumed.",
};

const RAIN: WeatherProfile = WeatherProfile {
    icon: "🌧️",
    flavor: [
        "Rainy skies ahead, runways may be slippery.",
        "Wet conditions expected, maintain caution!",
    ],
    fuel_modifier: 0.05,
    effect: "+5% fuel consumed.",
};

const SNOW: WeatherProfile = WeatherProfile {
    icon: "❄️",
    flavor: [
        "Snow is falling, watch out for those icy runways!",
        "Snowy conditions, heavy traffic at the airport expected.",
    ],
    fuel_modifier: 0.075,
    effect: "+7.5% fuel consumed.",
};

const TAILWIND: WeatherProfile = WeatherProfile {
    icon: "💨",
    flavor: [
        "Winds at your back, smooth and quick flight ahead.",
        "Enjoy the speed boost from the tailwind!",
    ],
    fuel_modifier: -0.05,
    effect: "-5% fuel consumed due to tailwind.",
};

impl Weather {
    /// Every variant, in draw order.
    pub const ALL: [Self; 5] = [
        Self::Clear,
        Self::Storm,
        Self::Rain,
        Self::Snow,
        Self::Tailwind,
    ];

    #[must_use]
    pub const fn profile(self) -> &'static WeatherProfile {
        match self {
            Self::Clear => &CLEAR,
            Self::Storm => &STORM,
            Self::Rain => &RAIN,
            Self::Snow => &SNOW,
            Self::Tailwind => &TAILWIND,
        }
    }

    /// Multiplier applied to one leg's fuel burn.
    #[must_use]
    pub fn fuel_factor(self) -> f64 {
        1.0 + self.profile().fuel_modifier
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Storm => "Storm",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Tailwind => "Tailwind",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fuel adjustment accumulated from the events of one hop.
///
/// Applied to exactly one leg, then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventEffect {
    /// Multiplier on the whole leg burn.
    pub factor: f64,
    /// Flat fuel added before the multiplier.
    pub fixed: f64,
}

impl EventEffect {
    pub const NEUTRAL: Self = Self {
        factor: 1.0,
        fixed: 0.0,
    };

    /// Fold another event into this effect.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            factor: self.factor * other.factor,
            fixed: self.fixed + other.fixed,
        }
    }

    /// Final burn for a leg whose weather-free cost is `base_cost`.
    #[must_use]
    pub fn apply(self, base_cost: f64) -> f64 {
        (base_cost + self.fixed) * self.factor
    }
}

impl Default for EventEffect {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// A weather event drawn for one hop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEvent {
    pub weather: Weather,
    /// Radio line picked when the event was drawn.
    pub flavor: String,
}

impl WeatherEvent {
    /// Draw the flavor line for `weather` from `rng`.
    pub fn new<R: Rng>(weather: Weather, rng: &mut R) -> Self {
        let flavor = weather
            .profile()
            .flavor
            .choose(rng)
            .copied()
            .unwrap_or_default()
            .to_string();
        Self { weather, flavor }
    }

    #[must_use]
    pub fn effect(&self) -> EventEffect {
        EventEffect {
            factor: self.weather.fuel_factor(),
            fixed: 0.0,
        }
    }

    /// Human-readable report: icon, category, radio line and factor.
    #[must_use]
    pub fn description(&self) -> String {
        let profile = self.weather.profile();
        format!(
            "WEATHER UPDATE: {} {} -> {}\n[RADIO]: {} (Fuel factor x{:.2})",
            profile.icon,
            self.weather.label(),
            profile.effect,
            self.flavor,
            self.weather.fuel_factor()
        )
    }
}

/// Events drawn for a single hop.
pub type HopEvents = SmallVec<[WeatherEvent; 2]>;

/// Draw the events for one hop. Currently always exactly one weather event,
/// chosen uniformly.
pub fn generate_events<R: Rng>(rng: &mut R) -> HopEvents {
    let weather = Weather::ALL[rng.gen_range(0..Weather::ALL.len())];
    debug!("weather drawn: {weather}");
    let mut events = HopEvents::new();
    events.push(WeatherEvent::new(weather, rng));
    events
}

/// Combined effect of a batch of events.
#[must_use]
pub fn combined_effect(events: &[WeatherEvent]) -> EventEffect {
    events
        .iter()
        .map(WeatherEvent::effect)
        .fold(EventEffect::NEUTRAL, EventEffect::combine)
}
