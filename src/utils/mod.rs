pub mod formatting;
pub mod output;
