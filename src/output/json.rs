use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use std::path::Path;

use super::summary::Summary;
use crate::scoring::{Grade, ValidationResult};
use crate::structure::StructureReport;

#[derive(Debug, Serialize)]
pub struct PageReport<'a> {
    #[serde(flatten)]
    pub result: &'a ValidationResult,
    pub grade: Grade,
    pub percentage: f64,
}

/// Machine-readable report: every page, the summary, and (for a wiki) the
/// structure check.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub pages: Vec<PageReport<'a>>,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<&'a StructureReport>,
}

impl<'a> JsonReport<'a> {
    pub fn new(results: &'a [ValidationResult], structure: Option<&'a StructureReport>) -> Self {
        let pages = results
            .iter()
            .map(|result| PageReport {
                result,
                grade: result.grade(),
                percentage: result.percentage(),
            })
            .collect();
        Self {
            pages,
            summary: Summary::from_results(results),
            structure,
        }
    }

    pub fn to_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}

/// Write the report atomically so readers never see a partial file.
pub fn write_report(path: &Path, report: &JsonReport) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open report file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, report).context("Failed to serialize report")?;

    file.commit()
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    Ok(())
}
