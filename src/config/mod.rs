pub mod settings;

pub use settings::{AppConfig, GridView, ProfileConfig, ScoringConfig};
