use serde::Serialize;
use std::fmt;

use super::config::ImportanceTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 90.0 {
            Grade::A
        } else if pct >= 75.0 {
            Grade::B
        } else if pct >= 60.0 {
            Grade::C
        } else if pct >= 40.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    /// A or B.
    pub fn is_high(&self) -> bool {
        matches!(self, Grade::A | Grade::B)
    }

    /// D or F.
    pub fn is_failing(&self) -> bool {
        matches!(self, Grade::D | Grade::F)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Critical,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// The weighted checks applied to every page, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    WordCount,
    DiagramCount,
    DiagramTypes,
    SnippetCount,
    SnippetCitations,
    SourcesLines,
    SourcesPrecision,
    Sections,
    Overview,
    RelatedLinks,
    Tables,
    ServiceNames,
    Protocols,
}

impl Criterion {
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::WordCount => "Words",
            Criterion::DiagramCount => "Diagrams",
            Criterion::DiagramTypes => "Diagram types",
            Criterion::SnippetCount => "Code snippets",
            Criterion::SnippetCitations => "Snippet citations",
            Criterion::SourcesLines => "Sources lines",
            Criterion::SourcesPrecision => "Sources line numbers",
            Criterion::Sections => "Sections",
            Criterion::Overview => "Overview",
            Criterion::RelatedLinks => "Related pages",
            Criterion::Tables => "Tables",
            Criterion::ServiceNames => "Service names",
            Criterion::Protocols => "Protocols",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Pass(String),
    Issue(Issue),
}

/// What one criterion contributes: points awarded out of its weight, and at
/// most one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub awarded: u32,
    pub max: u32,
    pub message: Option<Message>,
}

impl Outcome {
    pub fn pass(awarded: u32, max: u32, message: impl Into<String>) -> Self {
        Self {
            awarded,
            max,
            message: Some(Message::Pass(message.into())),
        }
    }

    pub fn issue(awarded: u32, max: u32, issue: Issue) -> Self {
        Self {
            awarded,
            max,
            message: Some(Message::Issue(issue)),
        }
    }

    pub fn silent(awarded: u32, max: u32) -> Self {
        Self {
            awarded,
            max,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriterionScore {
    pub criterion: Criterion,
    pub awarded: u32,
    pub max: u32,
}

/// Scoring outcome for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub file: String,
    pub importance: ImportanceTier,
    pub score: u32,
    pub max_score: u32,
    pub issues: Vec<Issue>,
    pub passes: Vec<String>,
    pub breakdown: Vec<CriterionScore>,
}

impl ValidationResult {
    pub fn percentage(&self) -> f64 {
        if self.max_score > 0 {
            f64::from(self.score) / f64::from(self.max_score) * 100.0
        } else {
            0.0
        }
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage())
    }

    /// File name without its directory.
    pub fn file_name(&self) -> &str {
        std::path::Path::new(&self.file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.file)
    }

    pub fn critical_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Critical)
    }
}

/// Running score, max and messages over a sequence of [`Outcome`]s.
///
/// Shared by the page rubric and the wiki structure checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub score: u32,
    pub max_score: u32,
    pub issues: Vec<Issue>,
    pub passes: Vec<String>,
}

impl Tally {
    /// Fold one outcome in. Returns the points actually awarded, capped at
    /// the outcome's max.
    pub fn add(&mut self, outcome: Outcome) -> u32 {
        let awarded = outcome.awarded.min(outcome.max);
        self.score += awarded;
        self.max_score += outcome.max;
        match outcome.message {
            Some(Message::Pass(text)) => self.passes.push(text),
            Some(Message::Issue(issue)) => self.issues.push(issue),
            None => {}
        }
        awarded
    }
}

/// Accumulates criterion outcomes into a [`ValidationResult`].
#[derive(Debug, Default)]
pub struct RubricBuilder {
    tally: Tally,
    breakdown: Vec<CriterionScore>,
}

impl RubricBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, criterion: Criterion, outcome: Outcome) -> &mut Self {
        debug_assert!(
            outcome.awarded <= outcome.max,
            "{:?} over-awarded",
            criterion
        );
        let max = outcome.max;
        let awarded = self.tally.add(outcome);
        self.breakdown.push(CriterionScore {
            criterion,
            awarded,
            max,
        });
        self
    }

    pub fn score(&self) -> u32 {
        self.tally.score
    }

    pub fn max_score(&self) -> u32 {
        self.tally.max_score
    }

    pub fn finish(self, file: impl Into<String>, importance: ImportanceTier) -> ValidationResult {
        ValidationResult {
            file: file.into(),
            importance,
            score: self.tally.score,
            max_score: self.tally.max_score,
            issues: self.tally.issues,
            passes: self.tally.passes,
            breakdown: self.breakdown,
        }
    }
}
