//! Apply the settings from a `FilterConfig` to `Variant` records.

use crate::filters::{passes_contains, passes_set};
use crate::query::schema::{FilterConfig, Variant};

/// Inclusive check of an optional value against a `[low, high]` pair.
///
/// A missing value never satisfies a range pair; the pairs of a filter
/// configuration are always present, a record without the corresponding
/// value cannot be compared against them.
fn passes_range_pair(range: &[f64; 2], value: Option<f64>) -> bool {
    match value {
        Some(value) => value >= range[0] && value <= range[1],
        None => false,
    }
}

/// Membership check tolerating records without a value for the field.
fn passes_selection(selected: &[String], value: Option<&str>) -> bool {
    if selected.is_empty() {
        return true;
    }
    match value {
        Some(value) => selected.iter().any(|s| s == value),
        None => false,
    }
}

/// Determine whether the `Variant` passes all criteria of the `FilterConfig`.
pub fn passes(config: &FilterConfig, variant: &Variant) -> bool {
    let pass_pos = passes_range_pair(&config.pos_range, Some(variant.pos as f64));
    let pass_vaf = passes_range_pair(&config.vaf_range, variant.vaf);
    let pass_depth = passes_range_pair(&config.depth_range, variant.dp.map(|dp| dp as f64));
    let pass_allele = passes_contains(Some(&config.allele), Some(&variant.ref_alt));
    let pass_type = passes_set(Some(config.selected_types.as_slice()), &variant.var_type);
    let pass_gene = passes_selection(&config.selected_genes, variant.gene.as_deref());
    let pass_consequence = passes_selection(
        &config.selected_consequences,
        Some(&variant.consequence.name),
    );
    let pass_disease = passes_contains(Some(&config.disease), variant.disease.as_deref());
    let pass_mito_map = passes_contains(Some(&config.mito_map), variant.mito_map.as_deref());
    let pass_curated_refs =
        passes_contains(Some(&config.curated_refs), variant.curated_refs.as_deref());
    let pass_hgvsp = passes_contains(Some(&config.hgvsp), variant.hgvsp.as_deref());
    let pass_hgvsc = passes_contains(Some(&config.hgvsc), variant.hgvsc.as_deref());
    let pass_hgvs = passes_contains(Some(&config.hgvs), variant.hgvs.as_deref());

    let pass_all = pass_pos
        && pass_vaf
        && pass_depth
        && pass_allele
        && pass_type
        && pass_gene
        && pass_consequence
        && pass_disease
        && pass_mito_map
        && pass_curated_refs
        && pass_hgvsp
        && pass_hgvsc
        && pass_hgvs;
    if !pass_all {
        tracing::trace!("variant {:?} fails filter {:?}", variant, config);
    }
    pass_all
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use crate::query::schema::{Consequence, FilterConfig, Variant};

    fn example_variant() -> Variant {
        let mut variant = Variant {
            pos: 3243,
            reference: "A".into(),
            alternative: "G".into(),
            var_type: "SNP".into(),
            gene: Some("MT-TL1".into()),
            disease: Some("MELAS syndrome".into()),
            consequence: Consequence {
                id: "missense_variant".into(),
                name: String::new(),
            },
            vaf: Some(0.12),
            dp: Some(1523),
            hgvs: Some("m.3243A>G".into()),
            ..Default::default()
        };
        variant.normalize();
        variant
    }

    #[test]
    fn default_config_passes_complete_record() {
        assert!(super::passes(&FilterConfig::default(), &example_variant()));
    }

    #[rstest]
    // position range
    #[case(FilterConfig { pos_range: [3000.0, 3500.0], ..Default::default() }, true)]
    #[case(FilterConfig { pos_range: [3243.0, 3243.0], ..Default::default() }, true)]
    #[case(FilterConfig { pos_range: [0.0, 3000.0], ..Default::default() }, false)]
    // VAF range
    #[case(FilterConfig { vaf_range: [0.1, 0.2], ..Default::default() }, true)]
    #[case(FilterConfig { vaf_range: [0.5, 1.0], ..Default::default() }, false)]
    // depth range
    #[case(FilterConfig { depth_range: [1000.0, 2000.0], ..Default::default() }, true)]
    #[case(FilterConfig { depth_range: [0.0, 100.0], ..Default::default() }, false)]
    // allele substring on ref_alt
    #[case(FilterConfig { allele: "a/g".into(), ..Default::default() }, true)]
    #[case(FilterConfig { allele: "C/T".into(), ..Default::default() }, false)]
    // type selection
    #[case(FilterConfig { selected_types: vec!["SNP".into(), "DEL".into()], ..Default::default() }, true)]
    #[case(FilterConfig { selected_types: vec!["DEL".into()], ..Default::default() }, false)]
    // gene selection
    #[case(FilterConfig { selected_genes: vec!["MT-TL1".into()], ..Default::default() }, true)]
    #[case(FilterConfig { selected_genes: vec!["MT-ND1".into()], ..Default::default() }, false)]
    // consequence selection matches on the resolved display name
    #[case(FilterConfig { selected_consequences: vec!["missense_variant".into()], ..Default::default() }, true)]
    #[case(FilterConfig { selected_consequences: vec!["stop_gained".into()], ..Default::default() }, false)]
    // disease substring
    #[case(FilterConfig { disease: "melas".into(), ..Default::default() }, true)]
    #[case(FilterConfig { disease: "LHON".into(), ..Default::default() }, false)]
    // HGVS substring
    #[case(FilterConfig { hgvs: "3243a>g".into(), ..Default::default() }, true)]
    #[case(FilterConfig { hgvs: "3460".into(), ..Default::default() }, false)]
    fn passes_single_criterion(#[case] config: FilterConfig, #[case] expected: bool) {
        assert_eq!(super::passes(&config, &example_variant()), expected);
    }

    #[test]
    fn missing_vaf_fails_the_vaf_range() {
        let variant = Variant {
            vaf: None,
            ..example_variant()
        };
        assert!(!super::passes(&FilterConfig::default(), &variant));
    }

    #[test]
    fn missing_annotation_passes_substring_filter() {
        // the substring predicate treats missing values as satisfied
        let variant = Variant {
            disease: None,
            ..example_variant()
        };
        let config = FilterConfig {
            disease: "melas".into(),
            ..Default::default()
        };
        assert!(super::passes(&config, &variant));
    }

    #[test]
    fn missing_gene_fails_a_non_empty_selection() {
        let variant = Variant {
            gene: None,
            ..example_variant()
        };
        let config = FilterConfig {
            selected_genes: vec!["MT-TL1".into()],
            ..Default::default()
        };
        assert!(!super::passes(&config, &variant));
    }
}
