pub mod builtin;
pub mod normalize;
pub mod package;
pub mod schema;

use crate::error::TrSheetError;
use schema::RuleSet;
use std::collections::HashSet;
use std::path::Path;

/// Load a rule set from a JSON file.
pub fn load_ruleset(path: &Path) -> Result<RuleSet, TrSheetError> {
    let content = std::fs::read_to_string(path).map_err(|e| TrSheetError::RulesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_ruleset(&content, path)
}

/// Parse a rule set from a JSON string.
pub fn parse_ruleset(json: &str, source: &Path) -> Result<RuleSet, TrSheetError> {
    let ruleset: RuleSet = serde_json::from_str(json).map_err(|e| TrSheetError::RulesLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Parse a rule set from a JSON string (no file path context).
pub fn parse_ruleset_str(json: &str) -> Result<RuleSet, TrSheetError> {
    let ruleset: RuleSet = serde_json::from_str(json).map_err(TrSheetError::Json)?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Validate that a rule set is well-formed.
pub fn validate_ruleset(ruleset: &RuleSet) -> Result<(), TrSheetError> {
    for exp in &ruleset.name_expansions {
        if exp.prefix.trim().is_empty() {
            return Err(TrSheetError::RulesInvalid(
                "name expansion prefix must not be empty".into(),
            ));
        }
        if exp.full_name.trim().is_empty() {
            return Err(TrSheetError::RulesInvalid(format!(
                "name expansion '{}' has an empty full name",
                exp.prefix
            )));
        }
    }

    let package = &ruleset.package;
    if package.mdd_marker.trim().is_empty() {
        return Err(TrSheetError::RulesInvalid(
            "package mdd_marker must not be empty".into(),
        ));
    }
    if package.site_markers.is_empty() || package.site_markers.iter().any(|m| m.trim().is_empty())
    {
        return Err(TrSheetError::RulesInvalid(
            "package site_markers must be non-empty strings".into(),
        ));
    }

    let mut seen = HashSet::new();
    for bundle in &package.bundles {
        if bundle.name.trim().is_empty() {
            return Err(TrSheetError::RulesInvalid(format!(
                "package bundle ({}, {}) has an empty name",
                bundle.mdd, bundle.sites
            )));
        }
        if bundle.mdd == 0 || bundle.sites == 0 {
            return Err(TrSheetError::RulesInvalid(format!(
                "package bundle '{}' must have non-zero mdd and sites counts",
                bundle.name
            )));
        }
        if !seen.insert((bundle.mdd, bundle.sites)) {
            return Err(TrSheetError::RulesInvalid(format!(
                "duplicate package bundle for {} MDD x {} sites",
                bundle.mdd, bundle.sites
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "name": "Test",
        "version": "1.0",
        "name_expansions": [
            { "prefix": "WA 1.1: Short", "full_name": "WA 1.1: Short and Long" }
        ],
        "package": {
            "mdd_marker": "WA 133.1",
            "site_markers": ["WA 134.1"],
            "bundles": [ { "mdd": 1, "sites": 2, "name": "Pack" } ]
        }
    }"#;

    #[test]
    fn test_parse_valid_ruleset() {
        let rs = parse_ruleset_str(MINIMAL).unwrap();
        assert_eq!(rs.name, "Test");
        assert!(rs.description.is_none());
        assert_eq!(rs.name_expansions.len(), 1);
        assert_eq!(rs.package.bundles[0].name, "Pack");
    }

    #[test]
    fn test_duplicate_bundle_rejected() {
        let json = MINIMAL.replace(
            r#"[ { "mdd": 1, "sites": 2, "name": "Pack" } ]"#,
            r#"[ { "mdd": 1, "sites": 2, "name": "A" }, { "mdd": 1, "sites": 2, "name": "B" } ]"#,
        );
        assert!(matches!(
            parse_ruleset_str(&json),
            Err(TrSheetError::RulesInvalid(_))
        ));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let json = MINIMAL.replace(r#""prefix": "WA 1.1: Short""#, r#""prefix": " ""#);
        assert!(parse_ruleset_str(&json).is_err());
    }

    #[test]
    fn test_zero_count_bundle_rejected() {
        let json = MINIMAL.replace(r#""mdd": 1"#, r#""mdd": 0"#);
        assert!(parse_ruleset_str(&json).is_err());
    }

    #[test]
    fn test_missing_site_markers_rejected() {
        let json = MINIMAL.replace(r#"["WA 134.1"]"#, "[]");
        assert!(parse_ruleset_str(&json).is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_ruleset(Path::new("/nonexistent/rules.json")).unwrap_err();
        match err {
            TrSheetError::RulesLoad { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/rules.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
