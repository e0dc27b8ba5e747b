use crate::{
    config::ProfileStoreConfig,
    error::{CreativeError, Result},
    models::Profile,
    storage::traits::ProfileStore,
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;

/// A JSON object on disk used like browser local storage: each key holds one
/// JSON value, and this store owns exactly one key.
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn from_config(config: &ProfileStoreConfig) -> Self {
        Self::new(config.path.clone(), config.key.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(CreativeError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&raw)
            .map_err(|e| CreativeError::Serialization(e.to_string()))?
        {
            Value::Object(entries) => Ok(entries),
            _ => Err(CreativeError::Storage(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }
}

#[async_trait]
impl ProfileStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<Profile>> {
        let mut entries = self.read_entries().await?;
        match entries.remove(&self.key) {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| CreativeError::Serialization(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn save_all(&self, profiles: &[Profile]) -> Result<()> {
        let mut entries = self.read_entries().await?;
        let value =
            serde_json::to_value(profiles).map_err(|e| CreativeError::Serialization(e.to_string()))?;
        entries.insert(self.key.clone(), value);

        let body = serde_json::to_string_pretty(&Value::Object(entries))
            .map_err(|e| CreativeError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CreativeError::Storage(e.to_string()))?;
        }

        // Write-then-rename so a crash never leaves a half-written store.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)
            .await
            .map_err(|e| CreativeError::Storage(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| CreativeError::Storage(e.to_string()))?;

        log::debug!(
            "Saved {} profiles under `{}` in {}",
            profiles.len(),
            self.key,
            self.path.display()
        );
        Ok(())
    }
}
