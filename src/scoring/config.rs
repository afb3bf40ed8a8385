use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// How much rigor a page is held to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImportanceTier {
    High,
    Medium,
    Low,
    Index,
}

fn numbered_page_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)\.([0-9]+)").expect("valid regex"))
}

impl ImportanceTier {
    /// Parse an untyped tier name, as library callers may hold one.
    /// Anything unrecognised is treated as `medium`.
    ///
    /// The CLI does not go through this: `--importance` is a closed
    /// `ValueEnum` and rejects unknown names.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "high" => ImportanceTier::High,
            "low" => ImportanceTier::Low,
            "index" => ImportanceTier::Index,
            _ => ImportanceTier::Medium,
        }
    }

    /// Infer the tier from a page's file name.
    ///
    /// `index.<ext>` is the index page; `1.x-*` (System Overview) and
    /// `2.x-*` (Service Communication) are high importance; everything else
    /// is medium.
    pub fn infer(path: &Path) -> Self {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return ImportanceTier::Medium;
        };
        if is_index_page(name) {
            return ImportanceTier::Index;
        }
        let section = numbered_page_re()
            .captures(name)
            .and_then(|caps| caps[1].parse::<u32>().ok());
        match section {
            Some(1) | Some(2) => ImportanceTier::High,
            _ => ImportanceTier::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportanceTier::High => "high",
            ImportanceTier::Medium => "medium",
            ImportanceTier::Low => "low",
            ImportanceTier::Index => "index",
        }
    }
}

impl fmt::Display for ImportanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `index.<ext>` (or a bare `index`).
pub fn is_index_page(file_name: &str) -> bool {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem == "index")
}

/// Minimum thresholds a page must meet for full credit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementProfile {
    pub min_words: usize,
    pub min_diagrams: usize,
    pub min_diagram_types: usize,
    pub min_snippets: usize,
    pub min_sources_lines: usize,
    pub sources_need_line_numbers: bool,
    pub min_sections: usize,
    pub min_tables: usize,
}

impl RequirementProfile {
    pub fn high() -> Self {
        Self {
            min_words: 1200,
            min_diagrams: 2,
            min_diagram_types: 2,
            min_snippets: 5,
            min_sources_lines: 4,
            sources_need_line_numbers: true,
            min_sections: 4,
            min_tables: 1,
        }
    }

    pub fn medium() -> Self {
        Self {
            min_words: 600,
            min_diagrams: 1,
            min_diagram_types: 1,
            min_snippets: 3,
            min_sources_lines: 3,
            sources_need_line_numbers: true,
            min_sections: 3,
            min_tables: 0,
        }
    }

    pub fn low() -> Self {
        Self {
            min_words: 300,
            min_diagrams: 1,
            min_diagram_types: 1,
            min_snippets: 1,
            min_sources_lines: 2,
            sources_need_line_numbers: true,
            min_sections: 2,
            min_tables: 0,
        }
    }

    pub fn index() -> Self {
        Self {
            min_words: 200,
            min_diagrams: 1,
            min_diagram_types: 1,
            min_snippets: 0,
            min_sources_lines: 0,
            sources_need_line_numbers: false,
            min_sections: 2,
            min_tables: 1,
        }
    }
}

/// One requirement profile per importance tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileTable {
    pub high: RequirementProfile,
    pub medium: RequirementProfile,
    pub low: RequirementProfile,
    pub index: RequirementProfile,
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self {
            high: RequirementProfile::high(),
            medium: RequirementProfile::medium(),
            low: RequirementProfile::low(),
            index: RequirementProfile::index(),
        }
    }
}

impl ProfileTable {
    pub fn get(&self, tier: ImportanceTier) -> &RequirementProfile {
        match tier {
            ImportanceTier::High => &self.high,
            ImportanceTier::Medium => &self.medium,
            ImportanceTier::Low => &self.low,
            ImportanceTier::Index => &self.index,
        }
    }

    /// Built-in profiles with any configured fields laid over them.
    pub fn with_overrides(overrides: &ProfileOverrides) -> Self {
        let base = Self::default();
        let apply = |o: &Option<ProfileOverride>, p: RequirementProfile| match o {
            Some(o) => o.apply(p),
            None => p,
        };
        Self {
            high: apply(&overrides.high, base.high),
            medium: apply(&overrides.medium, base.medium),
            low: apply(&overrides.low, base.low),
            index: apply(&overrides.index, base.index),
        }
    }
}

/// Per-tier threshold overrides from the config file.
///
/// Example YAML:
/// ```yaml
/// profiles:
///   high:
///     min_words: 1500
///   index:
///     min_tables: 0
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverrides {
    #[serde(default)]
    pub high: Option<ProfileOverride>,
    #[serde(default)]
    pub medium: Option<ProfileOverride>,
    #[serde(default)]
    pub low: Option<ProfileOverride>,
    #[serde(default)]
    pub index: Option<ProfileOverride>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverride {
    #[serde(default)]
    pub min_words: Option<usize>,
    #[serde(default)]
    pub min_diagrams: Option<usize>,
    #[serde(default)]
    pub min_diagram_types: Option<usize>,
    #[serde(default)]
    pub min_snippets: Option<usize>,
    #[serde(default)]
    pub min_sources_lines: Option<usize>,
    #[serde(default)]
    pub sources_need_line_numbers: Option<bool>,
    #[serde(default)]
    pub min_sections: Option<usize>,
    #[serde(default)]
    pub min_tables: Option<usize>,
}

impl ProfileOverride {
    pub fn apply(&self, base: RequirementProfile) -> RequirementProfile {
        RequirementProfile {
            min_words: self.min_words.unwrap_or(base.min_words),
            min_diagrams: self.min_diagrams.unwrap_or(base.min_diagrams),
            min_diagram_types: self.min_diagram_types.unwrap_or(base.min_diagram_types),
            min_snippets: self.min_snippets.unwrap_or(base.min_snippets),
            min_sources_lines: self.min_sources_lines.unwrap_or(base.min_sources_lines),
            sources_need_line_numbers: self
                .sources_need_line_numbers
                .unwrap_or(base.sources_need_line_numbers),
            min_sections: self.min_sections.unwrap_or(base.min_sections),
            min_tables: self.min_tables.unwrap_or(base.min_tables),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_falls_back_to_medium() {
        assert_eq!(ImportanceTier::from_name("HIGH"), ImportanceTier::High);
        assert_eq!(ImportanceTier::from_name("index"), ImportanceTier::Index);
        assert_eq!(ImportanceTier::from_name("critical"), ImportanceTier::Medium);
        assert_eq!(ImportanceTier::from_name(""), ImportanceTier::Medium);
    }

    #[test]
    fn test_infer_from_file_name() {
        assert_eq!(ImportanceTier::infer(Path::new("wiki/index.md")), ImportanceTier::Index);
        assert_eq!(
            ImportanceTier::infer(Path::new("1.1-system-overview.md")),
            ImportanceTier::High
        );
        assert_eq!(
            ImportanceTier::infer(Path::new("wiki/2.3-grpc-contracts.md")),
            ImportanceTier::High
        );
        assert_eq!(
            ImportanceTier::infer(Path::new("3.1-databases.md")),
            ImportanceTier::Medium
        );
        assert_eq!(ImportanceTier::infer(Path::new("notes.md")), ImportanceTier::Medium);
        // A section without a subsection number does not count as numbered.
        assert_eq!(ImportanceTier::infer(Path::new("1-intro.md")), ImportanceTier::Medium);
    }

    #[test]
    fn test_is_index_page() {
        assert!(is_index_page("index.md"));
        assert!(is_index_page("index.markdown"));
        assert!(!is_index_page("1.1-index.md"));
        assert!(!is_index_page("indexes.md"));
    }

    #[test]
    fn test_profile_table_lookup() {
        let table = ProfileTable::default();
        assert_eq!(table.get(ImportanceTier::High).min_words, 1200);
        assert_eq!(table.get(ImportanceTier::Medium).min_snippets, 3);
        assert_eq!(table.get(ImportanceTier::Low).min_sections, 2);
        assert!(!table.get(ImportanceTier::Index).sources_need_line_numbers);
    }

    #[test]
    fn test_overrides_only_touch_named_fields() {
        let yaml = r#"
high:
  min_words: 1500
index:
  min_tables: 0
"#;
        let overrides: ProfileOverrides = serde_saphyr::from_str(yaml).unwrap();
        let table = ProfileTable::with_overrides(&overrides);
        assert_eq!(table.high.min_words, 1500);
        assert_eq!(table.high.min_diagrams, 2);
        assert_eq!(table.index.min_tables, 0);
        assert_eq!(table.medium, RequirementProfile::medium());
    }

    #[test]
    fn test_overrides_reject_unknown_fields() {
        let yaml = "high:\n  min_pictures: 3\n";
        assert!(serde_saphyr::from_str::<ProfileOverrides>(yaml).is_err());
    }

    #[test]
    fn test_empty_overrides_parse() {
        let overrides: ProfileOverrides = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(ProfileTable::with_overrides(&overrides), ProfileTable::default());
    }
}
