//! Backend reading from and writing to a local data directory.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::query::schema::Variant;
use crate::settings::Settings;

use super::Backend;

/// File-based backend with one JSON document per collaborator contract.
#[derive(Debug, Clone)]
pub struct LocalData {
    /// Directory holding `settings.json`, `variants.json`, and
    /// `deletions.json`.
    base: PathBuf,
}

impl LocalData {
    pub fn new<P: AsRef<Path>>(base: P) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    /// Path of the settings document.
    pub fn settings_path(&self) -> PathBuf {
        self.base.join("settings.json")
    }

    fn variants_path(&self) -> PathBuf {
        self.base.join("variants.json")
    }

    fn deletions_path(&self) -> PathBuf {
        self.base.join("deletions.json")
    }

    async fn read_json<T>(&self, path: &Path) -> Result<T, anyhow::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| anyhow::anyhow!("could not read {}: {}", path.display(), e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| anyhow::anyhow!("could not parse {}: {}", path.display(), e))
    }
}

impl Backend for LocalData {
    async fn load_settings(&self) -> Result<Settings, anyhow::Error> {
        self.read_json(&self.settings_path()).await
    }

    async fn get_variants(&self) -> Result<Vec<Variant>, anyhow::Error> {
        self.read_json(&self.variants_path()).await
    }

    async fn get_deletions(&self) -> Result<IndexMap<String, serde_json::Value>, anyhow::Error> {
        self.read_json(&self.deletions_path()).await
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), anyhow::Error> {
        let path = self.settings_path();
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| anyhow::anyhow!("could not serialize settings: {}", e))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| anyhow::anyhow!("could not write {}: {}", path.display(), e))
    }
}
