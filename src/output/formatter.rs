use owo_colors::OwoColorize;
use std::io::IsTerminal;

use super::summary::Summary;
use crate::scoring::{Grade, Issue, Severity, ValidationResult};
use crate::structure::StructureReport;

const RULE_WIDTH: usize = 60;
const PAGE_COLUMN_WIDTH: usize = 45;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

fn severity_symbol(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "❌",
        Severity::Warning => "⚠️ ",
    }
}

fn format_issue(issue: &Issue, use_colors: bool) -> String {
    let line = format!("{} {}", severity_symbol(issue.severity), issue.message);
    if !use_colors {
        return line;
    }
    match issue.severity {
        Severity::Critical => line.red().to_string(),
        Severity::Warning => line.yellow().to_string(),
    }
}

fn format_pass(message: &str, use_colors: bool) -> String {
    let line = format!("✅ {}", message);
    if use_colors {
        line.green().to_string()
    } else {
        line
    }
}

fn paint_grade(text: &str, grade: Grade, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match grade {
        Grade::A | Grade::B => text.green().bold().to_string(),
        Grade::C => text.yellow().bold().to_string(),
        Grade::D | Grade::F => text.red().bold().to_string(),
    }
}

fn push_findings(lines: &mut Vec<String>, issues: &[Issue], passes: &[String], use_colors: bool) {
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("  Needs work:".to_string());
        for issue in issues {
            lines.push(format!("    {}", format_issue(issue, use_colors)));
        }
    }
    if !passes.is_empty() {
        lines.push(String::new());
        lines.push("  Passed:".to_string());
        for pass in passes {
            lines.push(format!("    {}", format_pass(pass, use_colors)));
        }
    }
}

/// Format one page's result: header with grade and score, then issues and passes.
pub fn format_result(result: &ValidationResult, use_colors: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let grade = result.grade();
    let name = if use_colors {
        result.file_name().bold().to_string()
    } else {
        result.file_name().to_string()
    };

    let mut lines = vec![
        rule.clone(),
        format!("📄 {}", name),
        format!(
            "   Importance: {}  |  Grade: {}  |  Score: {}/{} ({:.0}%)",
            result.importance,
            paint_grade(&grade.to_string(), grade, use_colors),
            result.score,
            result.max_score,
            result.percentage()
        ),
        rule,
    ];
    push_findings(&mut lines, &result.issues, &result.passes, use_colors);
    lines.push(String::new());
    lines.join("\n")
}

/// Per-criterion points, one line each (verbose mode).
pub fn format_breakdown(result: &ValidationResult) -> String {
    result
        .breakdown
        .iter()
        .map(|c| format!("    {:<22} {:>2}/{:<2}", c.criterion.label(), c.awarded, c.max))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collection overview: totals, grade distribution, per-page table and the
/// pages that need work.
pub fn format_summary(results: &[ValidationResult], use_colors: bool) -> String {
    let summary = Summary::from_results(results);
    let banner = "#".repeat(RULE_WIDTH);
    let title = if use_colors {
        "Architecture wiki quality report".bold().to_string()
    } else {
        "Architecture wiki quality report".to_string()
    };

    let mut lines = vec![
        String::new(),
        banner.clone(),
        format!("  {}", title),
        banner,
        String::new(),
        format!(
            "  Total score: {}/{} ({:.0}%)",
            summary.total_score, summary.total_max, summary.percentage
        ),
        format!("  Pages: {}", summary.page_count),
        format!(
            "  Grades: {}",
            summary
                .grades
                .iter()
                .map(|(grade, count)| format!("{}={}", grade, count))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        String::new(),
        format!(
            "  {:<width$} {:>5}  {:>10}",
            "Page",
            "Grade",
            "Score",
            width = PAGE_COLUMN_WIDTH
        ),
        format!("  {} {}  {}", "-".repeat(PAGE_COLUMN_WIDTH), "-".repeat(5), "-".repeat(10)),
    ];

    for result in results {
        let grade = result.grade();
        let grade_cell = format!("{:>5}", grade);
        lines.push(format!(
            "  {:<width$} {}  {:>3}/{:<3} ({:.0}%)",
            result.file_name(),
            paint_grade(&grade_cell, grade, use_colors),
            result.score,
            result.max_score,
            result.percentage(),
            width = PAGE_COLUMN_WIDTH
        ));
    }

    if summary.has_failing_pages() {
        lines.push(String::new());
        lines.push(format!("  ⚠️  Pages needing work ({}):", summary.failing.len()));
        for page in &summary.failing {
            lines.push(format!("    - {}: {}", page.file, page.top_issues.join(", ")));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Whole-wiki structure check.
pub fn format_structure(report: &StructureReport, use_colors: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let sections = report
        .sections_found
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        rule.clone(),
        format!("  📊 Wiki structure (scale: {})", report.guideline().label),
        rule,
        format!(
            "  Score: {}/{} ({:.0}%)",
            report.score,
            report.max_score,
            report.percentage()
        ),
        format!("  Sections found: [{}]", sections),
    ];
    push_findings(&mut lines, &report.issues, &report.passes, use_colors);
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Criterion, CriterionScore, ImportanceTier};
    use crate::structure::{validate_structure, ScaleTier};

    fn sample_result() -> ValidationResult {
        ValidationResult {
            file: "wiki/2.1-service-communication.md".to_string(),
            importance: ImportanceTier::High,
            score: 83,
            max_score: 100,
            issues: vec![
                Issue::warning("Too few Sources lines: 1 (minimum 4)"),
                Issue::critical("No tables (list services and APIs in a table)"),
            ],
            passes: vec!["Words: 1300 (minimum 1200)".to_string()],
            breakdown: vec![CriterionScore {
                criterion: Criterion::WordCount,
                awarded: 15,
                max: 15,
            }],
        }
    }

    #[test]
    fn test_format_result_plain() {
        let text = format_result(&sample_result(), false);
        assert!(text.contains("📄 2.1-service-communication.md"));
        assert!(text.contains("Importance: high  |  Grade: B  |  Score: 83/100 (83%)"));
        assert!(text.contains("  Needs work:"));
        assert!(text.contains("    ⚠️  Too few Sources lines"));
        assert!(text.contains("    ❌ No tables"));
        assert!(text.contains("    ✅ Words: 1300"));
    }

    #[test]
    fn test_format_result_without_issues_omits_section() {
        let mut result = sample_result();
        result.issues.clear();
        let text = format_result(&result, false);
        assert!(!text.contains("Needs work"));
        assert!(text.contains("Passed:"));
    }

    #[test]
    fn test_format_breakdown() {
        let text = format_breakdown(&sample_result());
        assert!(text.contains("Words"));
        assert!(text.contains("15/15"));
    }

    #[test]
    fn test_format_summary_lists_failing_pages() {
        let mut failing = sample_result();
        failing.file = "wiki/3.1-data.md".to_string();
        failing.score = 20;
        let text = format_summary(&[sample_result(), failing], false);
        assert!(text.contains("Total score: 103/200 (52%)"));
        assert!(text.contains("Pages: 2"));
        assert!(text.contains("Grades: B=1, F=1"));
        assert!(text.contains("Pages needing work (1):"));
        assert!(text.contains("- 3.1-data.md: No tables"));
    }

    #[test]
    fn test_format_summary_all_passing() {
        let text = format_summary(&[sample_result()], false);
        assert!(!text.contains("Pages needing work"));
    }

    #[test]
    fn test_format_structure() {
        let report = validate_structure(&[sample_result()], Some(ScaleTier::Small));
        let text = format_structure(&report, false);
        assert!(text.contains("Wiki structure (scale: small (3-5 services))"));
        assert!(text.contains("Sections found: [2]"));
        assert!(text.contains("Required section missing: Section 1 (System Overview)"));
    }
}
