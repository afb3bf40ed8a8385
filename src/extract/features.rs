use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::blocks::{fence_tags, strip_fenced, tagged_blocks, DIAGRAM_TAG};
use super::diagram::{diagram_count, diagram_kinds, label_tally, DiagramKind, LabelTally};
use super::sources::{sources_lines, PrecisionCounts};

/// Estimate prose length of mixed Japanese/Latin text.
///
/// Fenced blocks are dropped first. Each kana or CJK ideograph counts as one
/// word, and each run of ASCII letters counts as one word. Markdown markup
/// characters are neither, so they only ever separate runs.
pub fn word_count(text: &str) -> usize {
    let prose = strip_fenced(text);
    let mut count = 0;
    let mut in_latin_run = false;
    for c in prose.chars() {
        if c.is_ascii_alphabetic() {
            if !in_latin_run {
                count += 1;
                in_latin_run = true;
            }
            continue;
        }
        in_latin_run = false;
        if is_ideographic(c) {
            count += 1;
        }
    }
    count
}

fn is_ideographic(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' // hiragana
        | '\u{30A0}'..='\u{30FF}' // katakana
        | '\u{4E00}'..='\u{9FFF}' // CJK unified ideographs
    )
}

/// Fenced blocks with a non-diagram language tag.
pub fn snippet_count(text: &str) -> usize {
    fence_tags(text)
        .filter(|tag| !tag.is_empty() && *tag != DIAGRAM_TAG)
        .count()
}

// Infra/config files only need a path; source files must also name a line.
fn config_citation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(#|//|--)\s*\S+\.(ya?ml|tf|json|sql|conf|proto|toml)\s*[:\s]")
            .expect("valid regex")
    })
}

fn source_citation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"//\s*\S+\.(ts|js|py|go|rs|java)\s*[:\s]L[0-9]+").expect("valid regex")
    })
}

/// Non-diagram snippets containing at least one citation comment.
pub fn citation_count(text: &str) -> usize {
    tagged_blocks(text)
        .into_iter()
        .filter(|block| !block.is_diagram())
        .filter(|block| {
            config_citation_re().is_match(block.body) || source_citation_re().is_match(block.body)
        })
        .count()
}

fn table_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\|.*\|.*\|").expect("valid regex"))
}

fn table_separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\|[\s\-:]+\|[\s\-:]+\|").expect("valid regex"))
}

/// Header row directly followed by a separator row.
pub fn table_count(text: &str) -> usize {
    let lines: Vec<&str> = text.split('\n').collect();
    lines
        .windows(2)
        .filter(|pair| table_row_re().is_match(pair[0]) && table_separator_re().is_match(pair[1]))
        .count()
}

/// Second-level headings.
pub fn section_count(text: &str) -> usize {
    text.lines().filter(|line| line.starts_with("## ")).count()
}

/// Any prose line between the title and the first `##` heading.
pub fn has_overview_paragraph(text: &str) -> bool {
    let mut found_title = false;
    for line in text.split('\n') {
        if line.starts_with("# ") {
            found_title = true;
            continue;
        }
        if !found_title {
            continue;
        }
        if line.starts_with("## ") {
            break;
        }
        if !line.trim().is_empty()
            && !line.starts_with('#')
            && !line.starts_with("```")
            && !line.starts_with('>')
        {
            return true;
        }
    }
    false
}

fn related_links_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(関連ページ|Related|← 前|→ 次|参照)").expect("valid regex"))
}

pub fn has_related_links(text: &str) -> bool {
    related_links_re().is_match(text)
}

/// Protocol and messaging technologies, matched case-insensitively.
const PROTOCOL_PATTERNS: [(&str, &str); 11] = [
    ("REST", r"\bREST\b"),
    ("gRPC", r"\bgRPC\b"),
    ("HTTP", r"\bHTTP\b"),
    ("HTTPS", r"\bHTTPS\b"),
    ("Kafka", r"\bKafka\b"),
    ("RabbitMQ", r"\bRabbitMQ\b"),
    ("NATS", r"\bNATS\b"),
    ("SQS", r"\bSQS\b"),
    ("WebSocket", r"\bWebSocket\b"),
    ("GraphQL", r"\bGraphQL\b"),
    ("Event Streaming", r"\bEvent\b.*\bStreaming\b"),
];

fn protocol_res() -> &'static Vec<(&'static str, Regex)> {
    static RES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    RES.get_or_init(|| {
        PROTOCOL_PATTERNS
            .iter()
            .map(|(name, pattern)| {
                let re = Regex::new(&format!("(?i){}", pattern)).expect("valid regex");
                (*name, re)
            })
            .collect()
    })
}

/// Names of the distinct protocols mentioned, in pattern order.
pub fn protocol_mentions(text: &str) -> Vec<&'static str> {
    protocol_res()
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(name, _)| *name)
        .collect()
}

fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Every signal the rubric consumes, extracted in one pass over a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFeatures {
    pub words: usize,
    pub diagrams: usize,
    pub diagram_kinds: BTreeSet<DiagramKind>,
    pub snippets: usize,
    pub citations: usize,
    pub tables: usize,
    pub sources_lines: usize,
    pub line_precision: PrecisionCounts,
    pub sections: usize,
    pub has_overview: bool,
    pub has_related_links: bool,
    pub labels: LabelTally,
    pub protocols: Vec<&'static str>,
}

impl PageFeatures {
    /// CRLF line endings are folded to LF before any extractor runs.
    pub fn extract(text: &str) -> Self {
        let normalized = normalize_line_endings(text);
        let text: &str = &normalized;
        let sources = sources_lines(text);
        Self {
            words: word_count(text),
            diagrams: diagram_count(text),
            diagram_kinds: diagram_kinds(text),
            snippets: snippet_count(text),
            citations: citation_count(text),
            tables: table_count(text),
            sources_lines: sources.len(),
            line_precision: PrecisionCounts::tally(sources),
            sections: section_count(text),
            has_overview: has_overview_paragraph(text),
            has_related_links: has_related_links(text),
            labels: label_tally(text),
            protocols: protocol_mentions(text),
        }
    }
}
