pub mod formatter;
pub mod json;
pub mod summary;

pub use formatter::{
    format_breakdown, format_result, format_structure, format_summary, should_use_colors,
};
pub use json::{write_report, JsonReport};
pub use summary::{FailingPage, Summary};
