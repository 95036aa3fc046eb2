pub mod aggregator;
pub mod loader;
pub mod normalizer;
pub mod orchestrator;
pub mod state;

pub use orchestrator::PipelineOrchestrator;
pub use state::{InputStatus, PipelineConfig, PipelineOptions, PipelineOutcome};
