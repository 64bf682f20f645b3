//! Data structures for variant records and filter configurations.

use crate::common::{MAX_POS, MAX_READ_DEPTH};

/// Display names for the consequence identifiers known to the review app.
///
/// Lookup misses fall back to the identifier itself, so unknown consequences
/// still render with a non-empty name.
pub const CONSEQUENCE_NAMES: &[(&str, &str)] = &[
    ("frameshift_variant", "frameshift_variant"),
    ("inframe_deletion", "inframe_deletion"),
    ("missense_variant", "missense_variant"),
    ("stop_gained", "stop_gained"),
    ("synonymous_variant", "synonymous_variant"),
    ("upstream_gene_variant", "upstream_gene_variant"),
];

/// Resolve a consequence identifier to its display name.
pub fn resolve_consequence_name(consequence_id: &str) -> &str {
    CONSEQUENCE_NAMES
        .iter()
        .find(|(id, _)| *id == consequence_id)
        .map(|(_, name)| *name)
        .unwrap_or(consequence_id)
}

/// Functional-impact classification of a variant.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone, Default)]
pub struct Consequence {
    /// Consequence identifier as delivered by the annotation pipeline.
    pub id: String,
    /// Display name, resolved during normalization; never empty afterwards.
    #[serde(default)]
    pub name: String,
}

/// A single mitochondrial variant call as shown to the reviewer.
///
/// Fields not modeled here (curation payloads and the like) are carried
/// through unchanged in `extra`.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone, Default)]
pub struct Variant {
    /// 1-based position on the mitochondrial genome.
    pub pos: i64,
    /// Reference allele.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Alternative allele.
    #[serde(rename = "alt")]
    pub alternative: String,
    /// Derived `ref/alt` display string, recomputed during normalization.
    #[serde(default)]
    pub ref_alt: String,
    /// Variant type, e.g., "SNP", "INS", "DEL".
    #[serde(rename = "type", default)]
    pub var_type: String,
    /// Gene symbol, if annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene: Option<String>,
    /// Associated disease annotation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease: Option<String>,
    /// Consequence annotation.
    #[serde(default)]
    pub consequence: Consequence,
    /// Variant allele fraction in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaf: Option<f64>,
    /// Total read depth at the site.
    #[serde(rename = "DP", default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<i64>,
    /// HGVS genomic notation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hgvs: Option<String>,
    /// HGVS coding notation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hgvsc: Option<String>,
    /// HGVS protein notation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hgvsp: Option<String>,
    /// MitoMap annotation.
    #[serde(rename = "mitoMap", default, skip_serializing_if = "Option::is_none")]
    pub mito_map: Option<String>,
    /// Curated literature references.
    #[serde(
        rename = "curatedRefs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub curated_refs: Option<String>,
    /// Passthrough for fields the worker does not interpret.
    #[serde(flatten)]
    pub extra: indexmap::IndexMap<String, serde_json::Value>,
}

impl Variant {
    /// Bring a raw record into display-ready form.
    ///
    /// Resolves the consequence display name and recomputes `ref_alt`; all
    /// other fields are kept verbatim.
    pub fn normalize(&mut self) {
        self.consequence.name = resolve_consequence_name(&self.consequence.id).to_string();
        self.ref_alt = format!("{}/{}", self.reference, self.alternative);
    }
}

/// Normalize a whole collection of raw variant records in place.
pub fn normalize_variants(variants: &mut [Variant]) {
    for variant in variants.iter_mut() {
        variant.normalize();
    }
}

/// Maximal read depth over `variants`.
///
/// Records without a depth are skipped; an empty collection yields 0.
pub fn max_read_depth(variants: &[Variant]) -> i64 {
    variants
        .iter()
        .filter_map(|variant| variant.dp)
        .max()
        .unwrap_or(0)
}

/// Structured filter criteria of one variant search.
///
/// Range fields are `[low, high]` pairs, inclusive both ends; text fields
/// are matched as case-insensitive substrings; selection fields restrict to
/// the listed discrete values when non-empty.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// Position range.
    pub pos_range: [f64; 2],
    /// Substring filter on the `ref/alt` display string.
    pub allele: String,
    /// Selected variant types.
    pub selected_types: Vec<String>,
    /// Selected gene symbols.
    pub selected_genes: Vec<String>,
    /// Selected consequence display names.
    pub selected_consequences: Vec<String>,
    /// Variant allele fraction range.
    pub vaf_range: [f64; 2],
    /// Read depth range.
    pub depth_range: [f64; 2],
    /// Substring filter on the disease annotation.
    pub disease: String,
    /// Substring filter on the MitoMap annotation.
    pub mito_map: String,
    /// Substring filter on the curated references.
    pub curated_refs: String,
    /// Substring filter on the HGVS protein notation.
    pub hgvsp: String,
    /// Substring filter on the HGVS coding notation.
    pub hgvsc: String,
    /// Substring filter on the HGVS genomic notation.
    pub hgvs: String,
}

impl Default for FilterConfig {
    /// Returns the configuration of the built-in search which makes all
    /// variants pass.
    fn default() -> Self {
        Self {
            pos_range: [0.0, MAX_POS],
            allele: String::new(),
            selected_types: Vec::new(),
            selected_genes: Vec::new(),
            selected_consequences: Vec::new(),
            vaf_range: [0.0, 1.0],
            depth_range: [0.0, MAX_READ_DEPTH],
            disease: String::new(),
            mito_map: String::new(),
            curated_refs: String::new(),
            hgvsp: String::new(),
            hgvsc: String::new(),
            hgvs: String::new(),
        }
    }
}
