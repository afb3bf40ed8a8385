//! Quality grading for generated architecture wiki pages.
//!
//! Pages are scored one at a time against a tiered rubric ([`scoring`]),
//! then a whole wiki is checked for completeness ([`structure`]).

pub mod config;
pub mod extract;
pub mod output;
pub mod pages;
pub mod scoring;
pub mod structure;
