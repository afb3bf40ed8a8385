use serde::Serialize;
use std::collections::BTreeMap;

use crate::scoring::{Grade, ValidationResult};

/// A page graded D or F, with up to three of its critical issues.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailingPage {
    pub file: String,
    pub grade: Grade,
    pub top_issues: Vec<String>,
}

/// Aggregate view over every scored page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_score: u32,
    pub total_max: u32,
    pub percentage: f64,
    pub page_count: usize,
    pub grades: BTreeMap<Grade, usize>,
    pub failing: Vec<FailingPage>,
}

impl Summary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let total_score: u32 = results.iter().map(|r| r.score).sum();
        let total_max: u32 = results.iter().map(|r| r.max_score).sum();
        let percentage = if total_max > 0 {
            f64::from(total_score) / f64::from(total_max) * 100.0
        } else {
            0.0
        };

        let mut grades = BTreeMap::new();
        for result in results {
            *grades.entry(result.grade()).or_insert(0) += 1;
        }

        let failing = results
            .iter()
            .filter(|r| r.grade().is_failing())
            .map(|r| FailingPage {
                file: r.file_name().to_string(),
                grade: r.grade(),
                top_issues: r
                    .critical_issues()
                    .take(3)
                    .map(|i| i.message.clone())
                    .collect(),
            })
            .collect();

        Self {
            total_score,
            total_max,
            percentage,
            page_count: results.len(),
            grades,
            failing,
        }
    }

    pub fn has_failing_pages(&self) -> bool {
        !self.failing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{ImportanceTier, Issue};

    fn result(file: &str, score: u32, issues: Vec<Issue>) -> ValidationResult {
        ValidationResult {
            file: file.to_string(),
            importance: ImportanceTier::Medium,
            score,
            max_score: 100,
            issues,
            passes: vec![],
            breakdown: vec![],
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::from_results(&[]);
        assert_eq!(summary.page_count, 0);
        assert_eq!(summary.percentage, 0.0);
        assert!(!summary.has_failing_pages());
    }

    #[test]
    fn test_totals_and_distribution() {
        let results = vec![
            result("a.md", 95, vec![]),
            result("b.md", 92, vec![]),
            result("c.md", 65, vec![]),
        ];
        let summary = Summary::from_results(&results);
        assert_eq!(summary.total_score, 252);
        assert_eq!(summary.total_max, 300);
        assert_eq!(summary.grades.get(&Grade::A), Some(&2));
        assert_eq!(summary.grades.get(&Grade::C), Some(&1));
        assert!(!summary.has_failing_pages());
    }

    #[test]
    fn test_failing_pages_list_critical_issues_only() {
        let issues = vec![
            Issue::warning("minor"),
            Issue::critical("one"),
            Issue::critical("two"),
            Issue::critical("three"),
            Issue::critical("four"),
        ];
        let summary = Summary::from_results(&[result("wiki/3.1-db.md", 20, issues)]);
        assert_eq!(summary.failing.len(), 1);
        let failing = &summary.failing[0];
        assert_eq!(failing.file, "3.1-db.md");
        assert_eq!(failing.grade, Grade::F);
        assert_eq!(failing.top_issues, vec!["one", "two", "three"]);
    }
}
