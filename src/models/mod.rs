pub mod record;
pub mod tier;
pub mod diagnostic;
pub mod summary;

pub use record::*;
pub use tier::*;
pub use diagnostic::*;
pub use summary::*;
