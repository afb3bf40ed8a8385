use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use super::blocks::{diagram_bodies, DIAGRAM_TAG};

/// Closed set of diagram kinds, keyed by the first line of a diagram block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagramKind {
    Graph,
    Flowchart,
    Sequence,
    Class,
    State,
    EntityRelationship,
    Other,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 7] = [
        DiagramKind::Graph,
        DiagramKind::Flowchart,
        DiagramKind::Sequence,
        DiagramKind::Class,
        DiagramKind::State,
        DiagramKind::EntityRelationship,
        DiagramKind::Other,
    ];

    // First match wins. `Other` has no prefix and is the fallback.
    const PREFIXES: [(&'static str, DiagramKind); 6] = [
        ("graph", DiagramKind::Graph),
        ("flowchart", DiagramKind::Flowchart),
        ("sequencediagram", DiagramKind::Sequence),
        ("classdiagram", DiagramKind::Class),
        ("statediagram", DiagramKind::State),
        ("erdiagram", DiagramKind::EntityRelationship),
    ];

    /// Classify a diagram body by its first non-blank line (case-insensitive).
    pub fn classify(body: &str) -> Self {
        let first_line = body
            .trim()
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| first_line.starts_with(prefix))
            .map(|(_, kind)| *kind)
            .unwrap_or(DiagramKind::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramKind::Graph => "graph",
            DiagramKind::Flowchart => "flowchart",
            DiagramKind::Sequence => "sequenceDiagram",
            DiagramKind::Class => "classDiagram",
            DiagramKind::State => "stateDiagram",
            DiagramKind::EntityRelationship => "erDiagram",
            DiagramKind::Other => "other",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of diagram fence openings anywhere in the text.
pub fn diagram_count(text: &str) -> usize {
    text.matches(&format!("```{}", DIAGRAM_TAG)).count()
}

/// Distinct kinds among the well-formed diagram blocks.
pub fn diagram_kinds(text: &str) -> BTreeSet<DiagramKind> {
    diagram_bodies(text)
        .into_iter()
        .map(DiagramKind::classify)
        .collect()
}

/// Placeholder node names that say nothing about the real system.
pub const GENERIC_SERVICE_NAMES: [&str; 18] = [
    "ServiceA",
    "ServiceB",
    "ServiceC",
    "service-a",
    "service-b",
    "service-c",
    "Service",
    "Microservice",
    "Backend",
    "Frontend",
    "API",
    "Client",
    "Server",
    "Database",
    "Cache",
    "Component",
    "Module",
    "System",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Generic,
    Specific,
    Unclassified,
}

fn bracket_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]").expect("valid regex"))
}

fn quoted_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]+)""#).expect("valid regex"))
}

fn hyphenated_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]+-[a-zA-Z]").expect("valid regex"))
}

fn camel_case_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z][a-z]+[A-Z]").expect("valid regex"))
}

impl LabelKind {
    /// Generic names are checked before any specificity pattern.
    pub fn classify(label: &str) -> Self {
        let clean = label.trim_matches('"').trim();
        if GENERIC_SERVICE_NAMES.contains(&clean) {
            LabelKind::Generic
        } else if hyphenated_re().is_match(clean)
            || camel_case_re().is_match(clean)
            || clean.split_whitespace().count() >= 2
        {
            LabelKind::Specific
        } else {
            LabelKind::Unclassified
        }
    }
}

/// Bracketed then quoted labels of a single diagram body.
pub fn diagram_labels(body: &str) -> Vec<&str> {
    let bracketed = bracket_label_re().captures_iter(body);
    let quoted = quoted_label_re().captures_iter(body);
    bracketed
        .chain(quoted)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelTally {
    pub generic: usize,
    pub specific: usize,
}

/// Count generic and specific node labels across all diagram blocks.
pub fn label_tally(text: &str) -> LabelTally {
    let mut tally = LabelTally::default();
    for body in diagram_bodies(text) {
        for label in diagram_labels(body) {
            match LabelKind::classify(label) {
                LabelKind::Generic => tally.generic += 1,
                LabelKind::Specific => tally.specific += 1,
                LabelKind::Unclassified => {}
            }
        }
    }
    tally
}
