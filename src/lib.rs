pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod reporting;
pub mod utils;

pub use errors::ReportError;
pub use pipeline::{PipelineConfig, PipelineOrchestrator, PipelineOutcome};
