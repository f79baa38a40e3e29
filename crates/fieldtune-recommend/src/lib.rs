pub mod engine;
pub mod rules;
pub mod tokens;

pub use engine::{EngineOptions, RecommendationEngine, RunSummary, mean_coverage};
