pub mod commands;
pub mod summarize;
pub mod validate;

pub use commands::{Cli, Commands};
