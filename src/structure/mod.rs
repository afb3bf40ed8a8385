//! Whole-wiki completeness checks, run after every page has been scored.

pub mod scale;
pub mod taxonomy;
pub mod validator;

pub use scale::{ScaleGuideline, ScaleTier};
pub use taxonomy::{section_number, REQUIRED_SECTIONS};
pub use validator::{validate_structure, StructureReport};
