use crate::model::{LocationMethod, MethodCount};
use crate::rules::normalize::normalize_method_name;
use crate::rules::schema::RuleSet;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// "3  WA 133.1: Dry Density/Moisture Content"
static COUNTED_METHOD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s+(WA|AS)\s+([\d\.]+):\s+([^\n]+)").expect("valid counted method regex")
});

// "1-2  WA 324.2: Determination of Field Density   0.0 0.00"
static LOCATED_METHOD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+-\d+\s+(WA|AS)\s+([\d\.]+):\s+([^\n]+)").expect("valid located method regex")
});

// Empty chainage/offset columns trailing a located method line.
static TRAILING_ZEROS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+0\.0+.*$").expect("valid trailing zeros regex"));

impl LocationMethod {
    /// Extract normalized method counts from a page using this location
    /// method's line format.
    pub fn extract_methods(&self, text: &str, rules: &RuleSet) -> Vec<MethodCount> {
        match self {
            LocationMethod::TesterLocates => extract_counted(text, rules),
            LocationMethod::LocationSpecified => extract_located(text, rules),
            LocationMethod::Unknown => Vec::new(),
        }
    }
}

/// One line per method with a leading test count. Repeated methods stay as
/// separate entries.
fn extract_counted(text: &str, rules: &RuleSet) -> Vec<MethodCount> {
    COUNTED_METHOD_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let count = match caps[1].parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    log::debug!("ignoring method line with count '{}'", &caps[1]);
                    return None;
                }
            };
            let name = method_name(&caps, 2, &caps[4]);
            Some(MethodCount::new(normalize_method_name(&name, rules), count))
        })
        .collect()
}

/// One line per test location. Lines are tallied per method in first-seen
/// order.
fn extract_located(text: &str, rules: &RuleSet) -> Vec<MethodCount> {
    let mut tally: IndexMap<String, u32> = IndexMap::new();

    for caps in LOCATED_METHOD_REGEX.captures_iter(text) {
        let description = TRAILING_ZEROS_REGEX.replace(&caps[3], "");
        let name = method_name(&caps, 1, &description);
        *tally.entry(normalize_method_name(&name, rules)).or_insert(0) += 1;
    }

    tally
        .into_iter()
        .map(|(method, count)| MethodCount::new(method, count))
        .collect()
}

/// `"<STD> <code>: <description>"` from the standard and code groups starting
/// at `std_group`.
fn method_name(caps: &Captures<'_>, std_group: usize, description: &str) -> String {
    format!(
        "{} {}: {}",
        &caps[std_group],
        &caps[std_group + 1],
        description.trim()
    )
}
