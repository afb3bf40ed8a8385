use super::config::{ProfileOverride, ProfileOverrides, RequirementProfile};
use crate::extract::DiagramKind;

/// Validate profile overrides at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_profiles(overrides: &ProfileOverrides) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let tiers = [
        ("high", &overrides.high, RequirementProfile::high()),
        ("medium", &overrides.medium, RequirementProfile::medium()),
        ("low", &overrides.low, RequirementProfile::low()),
        ("index", &overrides.index, RequirementProfile::index()),
    ];

    for (name, tier_override, base) in tiers {
        if let Some(o) = tier_override {
            validate_profile(name, o, base, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_profile(
    name: &str,
    tier_override: &ProfileOverride,
    base: RequirementProfile,
    errors: &mut Vec<String>,
) {
    let effective = tier_override.apply(base);
    let known_kinds = DiagramKind::ALL.len();

    if effective.min_diagram_types > known_kinds {
        errors.push(format!(
            "profiles.{}.min_diagram_types: {} exceeds the {} known diagram types",
            name, effective.min_diagram_types, known_kinds
        ));
    }

    // Each diagram has one type, so more types than diagrams can never be met.
    if effective.min_diagram_types > effective.min_diagrams {
        errors.push(format!(
            "profiles.{}.min_diagram_types: {} is greater than min_diagrams ({})",
            name, effective.min_diagram_types, effective.min_diagrams
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_types(types: usize, diagrams: Option<usize>) -> ProfileOverride {
        ProfileOverride {
            min_diagram_types: Some(types),
            min_diagrams: diagrams,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_overrides_are_valid() {
        assert!(validate_profiles(&ProfileOverrides::default()).is_ok());
    }

    #[test]
    fn test_valid_override() {
        let overrides = ProfileOverrides {
            high: Some(with_types(3, Some(3))),
            ..Default::default()
        };
        assert!(validate_profiles(&overrides).is_ok());
    }

    #[test]
    fn test_types_exceeding_diagrams() {
        let overrides = ProfileOverrides {
            medium: Some(with_types(2, None)),
            ..Default::default()
        };
        let errors = validate_profiles(&overrides).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("profiles.medium.min_diagram_types"));
        assert!(errors[0].contains("min_diagrams (1)"));
    }

    #[test]
    fn test_collects_all_errors() {
        let overrides = ProfileOverrides {
            high: Some(with_types(9, Some(9))), // Error 1: more than known kinds
            low: Some(with_types(2, None)),     // Error 2: more than diagrams
            ..Default::default()
        };
        let errors = validate_profiles(&overrides).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("profiles.high"));
        assert!(errors[1].contains("profiles.low"));
    }
}
