pub mod charts;
pub mod formatter;
pub mod markdown;

pub use charts::{write_charts, Histogram, RenderedChart};
pub use markdown::{render_markdown, MarkdownOptions};
