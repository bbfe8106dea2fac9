use crate::model::MethodCount;
use crate::rules::schema::PackageRule;

/// Replace field density component lines with a package line.
///
/// MDD lines are summed on one side and all site lines on the other. When the
/// pair of totals has a configured bundle, every component line is dropped and
/// a single `(bundle name, 1)` line is appended. Any other combination leaves
/// the methods untouched.
pub fn collapse_packages(methods: Vec<MethodCount>, rule: &PackageRule) -> Vec<MethodCount> {
    let mdd: u64 = methods
        .iter()
        .filter(|m| m.method.contains(rule.mdd_marker.as_str()))
        .map(|m| u64::from(m.count))
        .sum();
    let sites: u64 = rule
        .site_markers
        .iter()
        .map(|marker| {
            methods
                .iter()
                .filter(|m| m.method.contains(marker.as_str()))
                .map(|m| u64::from(m.count))
                .sum::<u64>()
        })
        .sum();

    let Some(bundle) = rule.bundle_for(mdd, sites) else {
        return methods;
    };

    log::debug!(
        "collapsing {} MDD x {} sites into '{}'",
        mdd,
        sites,
        bundle.name
    );
    let mut collapsed: Vec<MethodCount> = methods
        .into_iter()
        .filter(|m| !rule.is_component(&m.method))
        .collect();
    collapsed.push(MethodCount::new(bundle.name.clone(), 1));
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::default_ruleset;

    const MDD: &str = "WA 133.1: Dry Density/Moisture Content Relationship: Modified Compaction Fine and Medium Grained Soils";
    const NDM_134: &str = "WA 134.1: Dry Density Ratio";
    const NDM_324: &str = "WA 324.2: Determination of Field Density: Nuclear Method";
    const PSD: &str = "WA 115.1: Particle Size Distribution: Sieving and Decantation Method";

    fn rule() -> PackageRule {
        default_ruleset().unwrap().package
    }

    #[test]
    fn test_two_mdd_six_sites_collapses() {
        let methods = vec![
            MethodCount::new(PSD, 1),
            MethodCount::new(MDD, 2),
            MethodCount::new(NDM_134, 3),
            MethodCount::new(NDM_324, 3),
        ];
        let out = collapse_packages(methods, &rule());
        assert_eq!(
            out,
            vec![
                MethodCount::new(PSD, 1),
                MethodCount::new("Field Density Package - 6 NDM Sites x 2 MDD", 1),
            ]
        );
    }

    #[test]
    fn test_unmapped_combination_left_untouched() {
        let methods = vec![
            MethodCount::new(MDD, 2),
            MethodCount::new(NDM_134, 4),
            MethodCount::new(NDM_324, 3),
        ];
        let out = collapse_packages(methods.clone(), &rule());
        assert_eq!(out, methods);
    }

    #[test]
    fn test_repeated_lines_are_summed_before_lookup() {
        // Tester-locates pages keep duplicate lines, so the totals span rows.
        let methods = vec![
            MethodCount::new(MDD, 1),
            MethodCount::new(NDM_324, 1),
            MethodCount::new(MDD, 2),
            MethodCount::new(NDM_324, 2),
        ];
        let out = collapse_packages(methods, &rule());
        assert_eq!(
            out,
            vec![MethodCount::new(
                "Field Density Package - 3 NDM Sites x 3 MDD",
                1
            )]
        );
    }

    #[test]
    fn test_huge_counts_do_not_wrap_into_a_bundle() {
        // u32::MAX + 3 would wrap to 2 MDD in 32-bit arithmetic.
        let methods = vec![
            MethodCount::new(MDD, u32::MAX),
            MethodCount::new(MDD, 3),
            MethodCount::new(NDM_324, 6),
        ];
        let out = collapse_packages(methods.clone(), &rule());
        assert_eq!(out, methods);
    }

    #[test]
    fn test_no_components_unchanged() {
        let methods = vec![MethodCount::new(PSD, 2)];
        assert_eq!(collapse_packages(methods.clone(), &rule()), methods);
        assert!(collapse_packages(vec![], &rule()).is_empty());
    }
}
