//! Data models for the Flora library.
//!
//! Output types serialize to the shapes the dashboard frontend reads, so
//! field names follow its camelCase conventions.

mod charts;
mod dataset;
mod record;
mod summary;
mod taxonomy;
mod validation;

pub use charts::*;
pub use dataset::*;
pub use record::*;
pub use summary::*;
pub use taxonomy::*;
pub use validation::*;
