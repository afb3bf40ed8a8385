//! Pure text signals extracted from a single wiki page.
//!
//! Every function here is total: malformed or missing Markdown constructs
//! yield zero/false rather than an error.

pub mod blocks;
pub mod diagram;
pub mod features;
pub mod sources;

pub use diagram::{DiagramKind, LabelKind, LabelTally};
pub use features::PageFeatures;
pub use sources::{LinePrecision, PrecisionCounts, MAX_ACCEPTABLE_LINE_RANGE};
