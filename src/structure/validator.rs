use serde::Serialize;

use super::scale::{ScaleGuideline, ScaleTier};
use super::taxonomy::{missing_sections, sections_found, REQUIRED_SECTIONS};
use crate::scoring::config::is_index_page;
use crate::scoring::result::{Issue, Outcome, Tally, ValidationResult};

const PAGE_COUNT_WEIGHT: u32 = 20;
const SECTIONS_WEIGHT: u32 = 30;
const GRADE_RATIO_WEIGHT: u32 = 20;

/// Completeness of a whole wiki, derived once from every page's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureReport {
    pub scale: ScaleTier,
    pub page_count: usize,
    pub score: u32,
    pub max_score: u32,
    pub sections_found: Vec<u32>,
    pub missing_sections: Vec<u32>,
    pub issues: Vec<Issue>,
    pub passes: Vec<String>,
}

impl StructureReport {
    pub fn guideline(&self) -> &'static ScaleGuideline {
        self.scale.guideline()
    }

    pub fn percentage(&self) -> f64 {
        if self.max_score > 0 {
            f64::from(self.score) / f64::from(self.max_score) * 100.0
        } else {
            0.0
        }
    }

    /// Missing required sections or fewer pages than the scale expects.
    pub fn has_blocking_gaps(&self) -> bool {
        !self.missing_sections.is_empty() || self.page_count < self.guideline().min_pages
    }
}

/// Check page count, section coverage and grade distribution of a wiki.
///
/// The index page is excluded from the page count and the grade ratio.
/// `scale` is inferred from the page count when not given.
pub fn validate_structure(results: &[ValidationResult], scale: Option<ScaleTier>) -> StructureReport {
    let content_pages: Vec<&ValidationResult> = results
        .iter()
        .filter(|r| !is_index_page(r.file_name()))
        .collect();
    let page_count = content_pages.len();
    let scale = scale.unwrap_or_else(|| ScaleTier::infer(page_count));
    let guide = scale.guideline();

    let found = sections_found(results.iter().map(|r| r.file.as_str()));
    let missing = missing_sections(&found);
    let high_graded = content_pages.iter().filter(|r| r.grade().is_high()).count();

    let outcomes = [
        check_page_count(page_count, guide),
        check_required_sections(&missing),
        check_grade_ratio(high_graded, page_count),
    ];

    let mut tally = Tally::default();
    for outcome in outcomes.into_iter().flatten() {
        tally.add(outcome);
    }
    let report = StructureReport {
        scale,
        page_count,
        score: tally.score,
        max_score: tally.max_score,
        sections_found: found.into_iter().collect(),
        missing_sections: missing.iter().map(|(n, _)| *n).collect(),
        issues: tally.issues,
        passes: tally.passes,
    };
    tracing::debug!(
        scale = %scale,
        page_count,
        score = report.score,
        max_score = report.max_score,
        "validated wiki structure"
    );
    report
}

fn check_page_count(count: usize, guide: &ScaleGuideline) -> Vec<Outcome> {
    let max = PAGE_COUNT_WEIGHT;
    let (min_p, max_p) = (guide.min_pages, guide.max_pages);
    let outcome = if (min_p..=max_p).contains(&count) {
        Outcome::pass(
            max,
            max,
            format!("Pages: {} ({}: {}-{} pages)", count, guide.label, min_p, max_p),
        )
    } else if count > max_p {
        Outcome::issue(
            15,
            max,
            Issue::warning(format!("Too many pages: {} ({}-{} pages)", count, min_p, max_p)),
        )
    } else if count as f64 >= min_p as f64 * 0.7 {
        Outcome::issue(
            10,
            max,
            Issue::warning(format!(
                "Slightly too few pages: {} ({} or more recommended)",
                count, min_p
            )),
        )
    } else {
        Outcome::issue(
            0,
            max,
            Issue::critical(format!("Too few pages: {} ({} or more required)", count, min_p)),
        )
    };
    vec![outcome]
}

/// Full marks, or a floor-rounded share plus one issue per missing section.
fn check_required_sections(missing: &[(u32, &str)]) -> Vec<Outcome> {
    let max = SECTIONS_WEIGHT;
    if missing.is_empty() {
        return vec![Outcome::pass(max, max, "Required sections: all present")];
    }
    let required = REQUIRED_SECTIONS.len() as u32;
    let present = required - missing.len() as u32;
    let awarded = max * present / required;

    let mut outcomes: Vec<Outcome> = missing
        .iter()
        .map(|(number, name)| {
            Outcome::issue(
                0,
                0,
                Issue::critical(format!(
                    "Required section missing: Section {} ({})",
                    number, name
                )),
            )
        })
        .collect();
    outcomes.push(Outcome::silent(awarded, max));
    outcomes
}

fn check_grade_ratio(high_graded: usize, page_count: usize) -> Vec<Outcome> {
    let max = GRADE_RATIO_WEIGHT;
    let ratio = if page_count > 0 {
        high_graded as f64 / page_count as f64
    } else {
        0.0
    };
    let pct = ratio * 100.0;
    let outcome = if ratio >= 0.80 {
        Outcome::pass(
            max,
            max,
            format!("Grade B or better: {}/{} ({:.0}%)", high_graded, page_count, pct),
        )
    } else if ratio >= 0.60 {
        Outcome::issue(
            12,
            max,
            Issue::warning(format!(
                "Low share of grade B or better: {}/{} ({:.0}%, target 80%)",
                high_graded, page_count, pct
            )),
        )
    } else {
        Outcome::issue(
            0,
            max,
            Issue::critical(format!(
                "Not enough grade B or better pages: {}/{} ({:.0}%)",
                high_graded, page_count, pct
            )),
        )
    };
    vec![outcome]
}
