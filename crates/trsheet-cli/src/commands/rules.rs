use trsheet_core::error::TrSheetError;
use trsheet_core::rules::builtin;
use trsheet_core::rules::schema::RuleSet;
use std::path::Path;

/// The custom rule file when given, otherwise the built-in CivilPro rules.
pub fn active_ruleset(path: Option<&Path>) -> Result<RuleSet, TrSheetError> {
    match path {
        Some(p) => trsheet_core::rules::load_ruleset(p),
        None => builtin::default_ruleset(),
    }
}

pub fn show(path: Option<&Path>) -> Result<(), TrSheetError> {
    let rs = active_ruleset(path)?;

    println!("{} (version {})\n", rs.name, rs.version);
    if let Some(ref desc) = rs.description {
        println!("{}\n", desc);
    }

    println!("Method name expansions (first match wins):\n");
    for (i, exp) in rs.name_expansions.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, exp.prefix);
        println!("      -> {}", exp.full_name);
    }
    println!();

    let package = &rs.package;
    println!("Field density packages:\n");
    println!("  MDD lines:  contain '{}'", package.mdd_marker);
    println!(
        "  Site lines: contain {}",
        package
            .site_markers
            .iter()
            .map(|m| format!("'{m}'"))
            .collect::<Vec<_>>()
            .join(" or ")
    );
    println!();
    println!("  {:<5}  {:<5}  Package", "MDD", "Sites");
    println!("  {}", "-".repeat(60));
    for bundle in &package.bundles {
        println!("  {:<5}  {:<5}  {}", bundle.mdd, bundle.sites, bundle.name);
    }
    println!();
    println!("Any other MDD/site combination keeps the individual method lines.\n");

    Ok(())
}

pub fn schema() -> Result<(), TrSheetError> {
    print!(
        r#"JSON Rule Schema
================

A rule file tells trsheet how to tidy up method names scraped from the
PDF and which field density test combinations are billed as packages.

Top-level fields:
  name             (string, required)  Human-readable name of the rule set
  description      (string, optional)  What this rule set is for
  version          (string, required)  Version identifier (e.g., "2025.1")
  name_expansions  (array, required)   Ordered list of name expansions.
                                       The first entry whose prefix occurs
                                       anywhere in a scraped method name
                                       replaces the whole name.
  package          (object, required)  Field density package rule

Each entry in "name_expansions":
  prefix           (string, required)  Text to look for in the scraped name
  full_name        (string, required)  Canonical method name to use instead

The "package" object:
  mdd_marker       (string, required)  Text identifying MDD method lines
  site_markers     (array, required)   Texts identifying field site lines;
                                       their counts are added together
  bundles          (array, required)   Known packages:
    mdd            (integer > 0)       Total MDD tests on the request
    sites          (integer > 0)       Total site tests on the request
    name           (string)            Package line that replaces them

Example:
{{
  "name": "My rules",
  "version": "1.0",
  "name_expansions": [
    {{
      "prefix": "WA 115.1: Particle Size Distribution",
      "full_name": "WA 115.1: Particle Size Distribution: Sieving and Decantation Method"
    }}
  ],
  "package": {{
    "mdd_marker": "WA 133.1",
    "site_markers": ["WA 134.1", "WA 324.2"],
    "bundles": [
      {{ "mdd": 2, "sites": 6, "name": "Field Density Package - 6 NDM Sites x 2 MDD" }}
    ]
  }}
}}

Run `trsheet rules show` to see the built-in CivilPro rules.
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), TrSheetError> {
    let rs = trsheet_core::rules::load_ruleset(file)?;

    println!("Rule set '{}' (v{}) is valid.", rs.name, rs.version);
    println!("  Name expansions: {}", rs.name_expansions.len());
    println!("  Packages: {}", rs.package.bundles.len());

    // Later entries shadowed by an earlier prefix can never fire.
    let mut warnings = Vec::new();
    for (i, later) in rs.name_expansions.iter().enumerate() {
        if let Some(earlier) = rs.name_expansions[..i]
            .iter()
            .find(|e| later.prefix.contains(e.prefix.as_str()))
        {
            warnings.push(format!(
                "expansion '{}' is shadowed by earlier prefix '{}'",
                later.prefix, earlier.prefix
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
