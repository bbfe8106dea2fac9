use crate::rules::schema::RuleSet;

/// Expand a scraped (often truncated) method name to its canonical form.
///
/// The first `name_expansions` entry whose prefix occurs anywhere in `name`
/// wins. Names matching no entry are returned unchanged.
pub fn normalize_method_name(name: &str, rules: &RuleSet) -> String {
    rules
        .name_expansions
        .iter()
        .find(|exp| name.contains(exp.prefix.as_str()))
        .map(|exp| exp.full_name.clone())
        .unwrap_or_else(|| name.to_string())
}
