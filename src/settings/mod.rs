//! Per-sample settings and saved variant searches.

pub mod cli;

use crate::query::schema::FilterConfig;

/// File name of the settings export artifact.
pub const SETTINGS_EXPORT_FILENAME: &str = "mitoSettings.json";

/// Validation error for saved-search candidates.
///
/// The store itself silently ignores invalid candidates (mirroring the
/// review app); callers that want strict behaviour run `validate()` first.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchValidationError {
    #[error("saved search has no name")]
    MissingName,
    #[error("saved search {0:?} has no filter configuration")]
    MissingFilterConfig(String),
}

/// A named filter configuration saved by the reviewer.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct VariantSearch {
    /// Search name; the unique key within a sample.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Whether the search was created by the reviewer.  The built-in
    /// default search is not custom and can neither be updated by name
    /// nor deleted.
    #[serde(default)]
    pub custom: bool,
    /// The filter criteria; absent only on malformed input.
    #[serde(default)]
    pub filter_config: Option<FilterConfig>,
}

impl VariantSearch {
    /// The built-in search that applies no filters.
    pub fn default_search() -> Self {
        Self {
            name: String::from("None"),
            description: String::from("No filters applied"),
            custom: false,
            filter_config: Some(FilterConfig::default()),
        }
    }

    /// Check that the search can be stored.
    pub fn validate(&self) -> Result<(), SearchValidationError> {
        if self.name.is_empty() {
            Err(SearchValidationError::MissingName)
        } else if self.filter_config.is_none() {
            Err(SearchValidationError::MissingFilterConfig(
                self.name.clone(),
            ))
        } else {
            Ok(())
        }
    }
}

/// Settings record of a single sample.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SampleSettings {
    /// Unique sample identifier.
    pub id: String,
    /// Directory holding the sample's BAM file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bam_dir: Option<String>,
    /// File name of the sample's BAM file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bam_filename: Option<String>,
    /// Saved variant searches, built-in default included.
    #[serde(default)]
    pub variant_searches: Vec<VariantSearch>,
}

impl SampleSettings {
    /// Full path of the sample's BAM file, if both parts are configured.
    pub fn bam_file(&self) -> Option<String> {
        match (&self.bam_dir, &self.bam_filename) {
            (Some(dir), Some(filename)) => Some(format!("{}{}", dir, filename)),
            _ => None,
        }
    }

    /// Look up a saved search by name.
    pub fn search_by_name(&self, name: &str) -> Option<&VariantSearch> {
        self.variant_searches.iter().find(|vs| vs.name == name)
    }

    /// Create or update a saved search by name.
    ///
    /// Candidates without a name or without a filter configuration are
    /// dropped without changing state.  The name lookup is restricted to
    /// custom entries so that the built-in default can never be renamed or
    /// overwritten through this path.  Returns whether the list changed.
    pub fn upsert_search(&mut self, candidate: &VariantSearch) -> bool {
        if let Err(e) = candidate.validate() {
            tracing::warn!("ignoring invalid saved search: {}", e);
            return false;
        }

        let existing = self
            .variant_searches
            .iter_mut()
            .filter(|vs| vs.custom)
            .find(|vs| vs.name == candidate.name);
        match existing {
            Some(existing) => {
                existing.description = candidate.description.clone();
                existing.filter_config = candidate.filter_config.clone();
            }
            None => self.variant_searches.push(candidate.clone()),
        }
        true
    }

    /// Delete saved searches by name.
    ///
    /// No-op when the candidate is not custom; otherwise every entry with
    /// the candidate's name is removed.  Returns whether the list changed.
    pub fn delete_search(&mut self, candidate: &VariantSearch) -> bool {
        if !candidate.custom {
            return false;
        }
        let before = self.variant_searches.len();
        self.variant_searches.retain(|vs| vs.name != candidate.name);
        before != self.variant_searches.len()
    }
}

/// The full settings aggregate persisted by the review app.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Per-sample settings records.
    #[serde(default)]
    pub samples: Vec<SampleSettings>,
    /// Host of the IGV instance to link out to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub igv_host: Option<String>,
    /// Passthrough for settings the worker does not interpret.
    #[serde(flatten)]
    pub extra: indexmap::IndexMap<String, serde_json::Value>,
}

impl Settings {
    /// Look up the settings record of one sample.
    pub fn sample(&self, id: &str) -> Option<&SampleSettings> {
        self.samples.iter().find(|sample| sample.id == id)
    }

    /// Mutable variant of `sample()`.
    pub fn sample_mut(&mut self, id: &str) -> Option<&mut SampleSettings> {
        self.samples.iter_mut().find(|sample| sample.id == id)
    }
}
