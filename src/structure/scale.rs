use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size classification of a whole wiki.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScaleTier {
    Small,
    Medium,
    Large,
}

/// Expected shape of a wiki at a given scale. Ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleGuideline {
    pub label: &'static str,
    pub min_pages: usize,
    pub max_pages: usize,
    pub min_sections: usize,
    pub max_sections: usize,
}

const SMALL: ScaleGuideline = ScaleGuideline {
    label: "small (3-5 services)",
    min_pages: 10,
    max_pages: 18,
    min_sections: 3,
    max_sections: 5,
};

const MEDIUM: ScaleGuideline = ScaleGuideline {
    label: "medium (6-15 services)",
    min_pages: 18,
    max_pages: 30,
    min_sections: 4,
    max_sections: 6,
};

const LARGE: ScaleGuideline = ScaleGuideline {
    label: "large (16+ services)",
    min_pages: 30,
    max_pages: 50,
    min_sections: 5,
    max_sections: 8,
};

impl ScaleTier {
    /// Pick a scale from the number of non-index pages.
    pub fn infer(page_count: usize) -> Self {
        if page_count <= SMALL.max_pages {
            ScaleTier::Small
        } else if page_count <= MEDIUM.max_pages {
            ScaleTier::Medium
        } else {
            ScaleTier::Large
        }
    }

    pub fn guideline(&self) -> &'static ScaleGuideline {
        match self {
            ScaleTier::Small => &SMALL,
            ScaleTier::Medium => &MEDIUM,
            ScaleTier::Large => &LARGE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleTier::Small => "small",
            ScaleTier::Medium => "medium",
            ScaleTier::Large => "large",
        }
    }
}

impl FromStr for ScaleTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(ScaleTier::Small),
            "medium" => Ok(ScaleTier::Medium),
            "large" => Ok(ScaleTier::Large),
            other => bail!("Unknown scale '{}': expected small, medium or large", other),
        }
    }
}

impl fmt::Display for ScaleTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_boundaries() {
        assert_eq!(ScaleTier::infer(0), ScaleTier::Small);
        assert_eq!(ScaleTier::infer(18), ScaleTier::Small);
        assert_eq!(ScaleTier::infer(19), ScaleTier::Medium);
        assert_eq!(ScaleTier::infer(30), ScaleTier::Medium);
        assert_eq!(ScaleTier::infer(31), ScaleTier::Large);
    }

    #[test]
    fn test_parse_known_scales() {
        assert_eq!("small".parse::<ScaleTier>().unwrap(), ScaleTier::Small);
        assert_eq!(" Large ".parse::<ScaleTier>().unwrap(), ScaleTier::Large);
    }

    #[test]
    fn test_parse_rejects_unknown_scale() {
        let err = "huge".parse::<ScaleTier>().unwrap_err();
        assert!(err.to_string().contains("huge"));
    }

    #[test]
    fn test_serde_rejects_unknown_scale() {
        assert!(serde_saphyr::from_str::<ScaleTier>("huge").is_err());
        assert_eq!(
            serde_saphyr::from_str::<ScaleTier>("medium").unwrap(),
            ScaleTier::Medium
        );
    }

    #[test]
    fn test_guideline_ranges() {
        let small = ScaleTier::Small.guideline();
        assert_eq!((small.min_pages, small.max_pages), (10, 18));
        let large = ScaleTier::Large.guideline();
        assert_eq!((large.min_pages, large.max_pages), (30, 50));
    }
}
