pub mod autoplay;
pub mod policy;
pub mod reports;
pub mod seeds;

pub use autoplay::{AutoplayRecord, run_autoplay};
pub use policy::{GameplayStrategy, progress_km, recommended_option};
pub use seeds::resolve_seed_inputs;
