use serde::{Deserialize, Serialize};

use crate::scoring::ProfileOverrides;
use crate::structure::ScaleTier;

/// Example YAML:
/// ```yaml
/// scale: medium
/// profiles:
///   high:
///     min_words: 1500
///     min_tables: 2
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Threshold overrides per importance tier
    #[serde(default)]
    pub profiles: ProfileOverrides,

    /// Default scale for directory validation (`--scale` wins)
    #[serde(default)]
    pub scale: Option<ScaleTier>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
scale: large
profiles:
  low:
    min_words: 250
    sources_need_line_numbers: false
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.scale, Some(ScaleTier::Large));
        let low = config.profiles.low.unwrap();
        assert_eq!(low.min_words, Some(250));
        assert_eq!(low.sources_need_line_numbers, Some(false));
        assert!(config.profiles.high.is_none());
    }

    #[test]
    fn test_unknown_scale_rejected() {
        assert!(serde_saphyr::from_str::<Config>("scale: enormous\n").is_err());
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let yaml = "profiles:\n  critical:\n    min_words: 10\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            scale: Some(ScaleTier::Small),
            ..Default::default()
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
