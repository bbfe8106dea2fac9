use crate::error::TrSheetError;
use crate::rules::schema::RuleSet;

const CIVILPRO_JSON: &str = include_str!("../../../../rules/civilpro.json");

/// Available predefined rule sets.
pub const PRESETS: &[&str] = &["civilpro"];

/// The rule set used when no custom rules file is given.
pub fn default_ruleset() -> Result<RuleSet, TrSheetError> {
    load_preset("civilpro")
}

/// Load a predefined rule set by name.
pub fn load_preset(name: &str) -> Result<RuleSet, TrSheetError> {
    match name {
        "civilpro" => {
            let ruleset: RuleSet = serde_json::from_str(CIVILPRO_JSON)?;
            Ok(ruleset)
        }
        _ => Err(TrSheetError::RulesInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
