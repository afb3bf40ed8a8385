use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Widest `L<start>-L<end>` span still counted as a precise reference.
pub const MAX_ACCEPTABLE_LINE_RANGE: u64 = 200;

fn sources_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)sources?:").expect("valid regex"))
}

fn line_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"L([0-9]+)[-–]L?([0-9]+)").expect("valid regex"))
}

fn line_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"L[0-9]+").expect("valid regex"))
}

/// Lines carrying a `Source:`/`Sources:` label, in document order.
pub fn sources_lines(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|line| sources_label_re().is_match(line))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePrecision {
    Precise,
    Imprecise,
    Missing,
}

impl LinePrecision {
    pub fn classify(line: &str) -> Self {
        let mut saw_range = false;
        for caps in line_range_re().captures_iter(line) {
            saw_range = true;
            let start = parse_line_number(&caps[1]);
            let end = parse_line_number(&caps[2]);
            // A reversed range has no span worth flagging.
            if end.saturating_sub(start) > MAX_ACCEPTABLE_LINE_RANGE {
                return LinePrecision::Imprecise;
            }
        }
        if saw_range || line_marker_re().is_match(line) {
            LinePrecision::Precise
        } else {
            LinePrecision::Missing
        }
    }
}

fn parse_line_number(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrecisionCounts {
    pub precise: usize,
    pub imprecise: usize,
    pub without_line_numbers: usize,
}

impl PrecisionCounts {
    pub fn tally<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = Self::default();
        for line in lines {
            match LinePrecision::classify(line) {
                LinePrecision::Precise => counts.precise += 1,
                LinePrecision::Imprecise => counts.imprecise += 1,
                LinePrecision::Missing => counts.without_line_numbers += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_lines_singular_plural_any_case() {
        let text = "intro\nSources: a.py:L1-L5\nsource: b.go\nSOURCES: c.rs\nno label here";
        assert_eq!(sources_lines(text).len(), 3);
    }

    #[test]
    fn test_sources_lines_require_colon() {
        assert!(sources_lines("the source code lives elsewhere").is_empty());
    }

    #[test]
    fn test_precise_range() {
        assert_eq!(
            LinePrecision::classify("Sources: app.py:L1-L50"),
            LinePrecision::Precise
        );
    }

    #[test]
    fn test_en_dash_and_bare_end() {
        assert_eq!(
            LinePrecision::classify("Sources: app.py:L10–20"),
            LinePrecision::Precise
        );
    }

    #[test]
    fn test_wide_range_is_imprecise() {
        assert_eq!(
            LinePrecision::classify("Sources: a.py:L1-L10, b.py:L1-L500"),
            LinePrecision::Imprecise
        );
    }

    #[test]
    fn test_boundary_span_is_precise() {
        assert_eq!(
            LinePrecision::classify("Sources: a.py:L100-L300"),
            LinePrecision::Precise
        );
    }

    #[test]
    fn test_single_line_marker_is_precise() {
        assert_eq!(
            LinePrecision::classify("Sources: main.go:L42"),
            LinePrecision::Precise
        );
    }

    #[test]
    fn test_full_width_digits_are_not_line_markers() {
        assert_eq!(
            LinePrecision::classify("Sources: a.py:L１-L５００"),
            LinePrecision::Missing
        );
    }

    #[test]
    fn test_missing_line_numbers() {
        assert_eq!(
            LinePrecision::classify("Sources: docker-compose.yml"),
            LinePrecision::Missing
        );
    }

    #[test]
    fn test_reversed_range_is_precise() {
        assert_eq!(
            LinePrecision::classify("Sources: a.py:L900-L1"),
            LinePrecision::Precise
        );
    }

    #[test]
    fn test_tally() {
        let lines = [
            "Sources: a.py:L1-L2",
            "Sources: b.py:L1-L999",
            "Sources: c.py",
            "Sources: d.py:L7",
        ];
        let counts = PrecisionCounts::tally(lines);
        assert_eq!(
            counts,
            PrecisionCounts {
                precise: 2,
                imprecise: 1,
                without_line_numbers: 1,
            }
        );
    }
}
