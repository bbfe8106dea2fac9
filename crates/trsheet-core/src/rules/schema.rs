use serde::{Deserialize, Serialize};

/// Rule configuration for one tracker export format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Ordered table of truncated-name keys; first match wins.
    pub name_expansions: Vec<NameExpansion>,
    pub package: PackageRule,
}

/// Replace a scraped method name containing `prefix` with `full_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameExpansion {
    pub prefix: String,
    pub full_name: String,
}

/// Field density packages: an MDD test count and a site test count that
/// together are billed as a single package line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRule {
    /// Substring identifying MDD method lines.
    pub mdd_marker: String,
    /// Substrings identifying field site method lines; their counts are added.
    pub site_markers: Vec<String>,
    pub bundles: Vec<PackageBundle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageBundle {
    pub mdd: u32,
    pub sites: u32,
    pub name: String,
}

impl PackageRule {
    /// Whether `method` is one of the lines a package replaces.
    pub fn is_component(&self, method: &str) -> bool {
        method.contains(self.mdd_marker.as_str())
            || self.site_markers.iter().any(|m| method.contains(m.as_str()))
    }

    pub fn bundle_for(&self, mdd: u64, sites: u64) -> Option<&PackageBundle> {
        self.bundles
            .iter()
            .find(|b| u64::from(b.mdd) == mdd && u64::from(b.sites) == sites)
    }
}
