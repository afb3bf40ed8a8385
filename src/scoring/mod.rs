pub mod arch;
pub mod config;
pub mod engine;
pub mod result;
pub mod validation;

pub use config::*;
pub use engine::{evaluate_page, score_features};
pub use result::{Criterion, CriterionScore, Grade, Issue, Severity, Tally, ValidationResult};
pub use validation::validate_profiles;
