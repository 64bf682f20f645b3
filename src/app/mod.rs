//! Application state coordination for the review app.
//!
//! The state lives in a single owned `AppState`; derivations are plain
//! functions of a snapshot and mutations go through explicitly scoped
//! methods.  External I/O is reached through the `Backend` trait only.

pub mod local;

use indexmap::IndexMap;

use crate::query::schema::{self, Variant};
use crate::settings::{Settings, VariantSearch};

/// Sentinel shown when the deletions mapping names no sample.
pub const NO_SAMPLE: &str = "No Sample";

/// Default timeout of the transient notification, in milliseconds.
pub const DEFAULT_SNACKBAR_TIMEOUT_MS: u32 = 3_000;

/// Colors of the transient notification.
#[derive(
    serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy, Default, strum::Display,
)]
pub enum SnackbarColor {
    /// Informational.
    #[default]
    #[serde(rename = "green")]
    #[strum(serialize = "green")]
    Green,
    /// Error.
    #[serde(rename = "red")]
    #[strum(serialize = "red")]
    Red,
}

/// State of the transient notification.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone)]
pub struct Snackbar {
    /// Whether the notification is shown.
    pub active: bool,
    /// Display color.
    pub color: SnackbarColor,
    /// Message text, if any.
    pub message: Option<String>,
    /// Timeout in milliseconds.
    pub timeout: u32,
}

impl Default for Snackbar {
    fn default() -> Self {
        Self {
            active: false,
            color: SnackbarColor::default(),
            message: None,
            timeout: DEFAULT_SNACKBAR_TIMEOUT_MS,
        }
    }
}

/// Options for activating the notification.
///
/// Fields left at `None` fall back to the defaults rather than to the
/// previous notification state.
#[derive(Debug, Clone, Default)]
pub struct SnackbarUpdate {
    /// Display color override.
    pub color: Option<SnackbarColor>,
    /// Message text.
    pub message: Option<String>,
    /// Timeout override, in milliseconds.
    pub timeout: Option<u32>,
}

/// The full state of one review session.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Settings of all samples, stored verbatim from the backend.
    pub settings: Settings,
    /// Whether the initial load is in flight.
    pub loading: bool,
    /// Transient notification state.
    pub snackbar: Snackbar,
    /// Deletion records keyed by sample id; the first key is the active
    /// sample.
    pub deletions: IndexMap<String, serde_json::Value>,
    /// Normalized variant records; only mutated through `set_variants` so
    /// that `max_read_depth` stays consistent.
    variants: Vec<Variant>,
    /// Maximal read depth over `variants`.
    max_read_depth: i64,
}

impl AppState {
    /// The normalized variant records.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Maximal read depth over the current variant records.
    pub fn max_read_depth(&self) -> i64 {
        self.max_read_depth
    }

    /// Store raw variant records, normalizing them and recomputing the
    /// maximal read depth.
    pub fn set_variants(&mut self, mut variants: Vec<Variant>) {
        schema::normalize_variants(&mut variants);
        self.max_read_depth = schema::max_read_depth(&variants);
        self.variants = variants;
    }

    /// Identifier of the active sample: the first key of the deletions
    /// mapping, or `NO_SAMPLE`.
    pub fn sample(&self) -> &str {
        self.deletions
            .keys()
            .next()
            .map(String::as_str)
            .unwrap_or(NO_SAMPLE)
    }

    /// Settings record of the active sample.
    pub fn sample_settings(&self) -> Option<&crate::settings::SampleSettings> {
        self.settings.sample(self.sample())
    }

    /// Mutable variant of `sample_settings()`.
    pub fn sample_settings_mut(&mut self) -> Option<&mut crate::settings::SampleSettings> {
        let sample = self.sample().to_owned();
        self.settings.sample_mut(&sample)
    }

    /// Full BAM file path of the active sample, if configured.
    pub fn bam_file(&self) -> Option<String> {
        self.sample_settings().and_then(|sample| sample.bam_file())
    }

    /// Show the notification, merging `update` over the defaults.
    pub fn activate_snackbar(&mut self, update: SnackbarUpdate) {
        self.snackbar = Snackbar {
            active: true,
            color: update.color.unwrap_or_default(),
            message: update.message,
            timeout: update.timeout.unwrap_or(DEFAULT_SNACKBAR_TIMEOUT_MS),
        };
    }

    /// Reset the notification to its inactive default.
    pub fn close_snackbar(&mut self) {
        self.snackbar = Snackbar::default();
    }
}

/// Contract of the external data collaborators.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Load the settings aggregate.
    async fn load_settings(&self) -> Result<Settings, anyhow::Error>;
    /// Load the raw variant records.
    async fn get_variants(&self) -> Result<Vec<Variant>, anyhow::Error>;
    /// Load the deletion records keyed by sample id.
    async fn get_deletions(&self) -> Result<IndexMap<String, serde_json::Value>, anyhow::Error>;
    /// Persist the settings aggregate.
    async fn save_settings(&self, settings: &Settings) -> Result<(), anyhow::Error>;
}

/// Owner of the application state, routing user actions to the store and
/// the backend.
#[derive(Debug)]
pub struct App<B> {
    /// The application state.
    pub state: AppState,
    /// External data collaborator.
    backend: B,
}

impl<B> App<B>
where
    B: Backend,
{
    /// Construct with empty state.
    pub fn new(backend: B) -> Self {
        Self {
            state: AppState::default(),
            backend,
        }
    }

    /// Run the initial load.
    ///
    /// All three requests are fired concurrently; any failure turns the
    /// whole load into a failure with a single red notification.  The
    /// loading flag is cleared in every path.  There is no reentrancy
    /// guard and no timeout.
    pub async fn fetch_data(&mut self) {
        self.state.loading = true;

        let (settings, variants, deletions) = futures::join!(
            self.backend.load_settings(),
            self.backend.get_variants(),
            self.backend.get_deletions()
        );

        let error = match (settings, variants, deletions) {
            (Ok(settings), Ok(variants), Ok(deletions)) => {
                self.state.settings = settings;
                self.state.set_variants(variants);
                self.state.deletions = deletions;
                None
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => Some(e),
        };
        if let Some(e) = error {
            tracing::warn!("initial load failed: {}", e);
            self.state.activate_snackbar(SnackbarUpdate {
                color: Some(SnackbarColor::Red),
                message: Some(format!("There was a problem fetching data: {}", e)),
                timeout: None,
            });
        }

        self.state.loading = false;
    }

    /// Update the active sample's BAM directory in place.
    pub fn save_bam_dir(&mut self, new_bam_dir: &str) {
        if let Some(sample) = self.state.sample_settings_mut() {
            sample.bam_dir = Some(new_bam_dir.to_owned());
        } else {
            tracing::debug!("no active sample record, not updating BAM directory");
        }
    }

    /// Create or update a saved search of the active sample.
    pub fn save_search(&mut self, search: &VariantSearch) -> bool {
        self.state
            .sample_settings_mut()
            .map(|sample| sample.upsert_search(search))
            .unwrap_or(false)
    }

    /// Delete a saved search of the active sample.
    ///
    /// Gated on the `custom` flag here as well as in the store.
    pub fn delete_search(&mut self, search: &VariantSearch) -> bool {
        if !search.custom {
            return false;
        }
        self.state
            .sample_settings_mut()
            .map(|sample| sample.delete_search(search))
            .unwrap_or(false)
    }

    /// Persist the current settings through the backend.
    ///
    /// Failures surface as a red notification, without retry.
    pub async fn save_settings(&mut self) {
        let result = self.backend.save_settings(&self.state.settings).await;
        if let Err(e) = result {
            tracing::warn!("saving settings failed: {}", e);
            self.state.activate_snackbar(SnackbarUpdate {
                color: Some(SnackbarColor::Red),
                message: Some(format!("There was a problem saving settings: {}", e)),
                timeout: None,
            });
        }
    }

    /// Serialize the current settings for export, pretty-printed with
    /// 2-space indentation.
    pub fn settings_json(&self) -> Result<String, anyhow::Error> {
        serde_json::to_string_pretty(&self.state.settings)
            .map_err(|e| anyhow::anyhow!("could not serialize settings: {}", e))
    }
}
