pub mod file;
pub mod memory;
pub mod traits;

use crate::{
    config::ProfileStoreConfig,
    error::{CreativeError, Result},
    models::{CreativeBrief, Profile},
};
use std::sync::Arc;

pub use file::JsonFileStore;
pub use memory::MemoryProfileStore;
pub use traits::ProfileStore;

/// Profile CRUD on top of a whole-array store.
#[derive(Clone)]
pub struct ProfileRepository {
    backend: Arc<dyn ProfileStore>,
}

impl ProfileRepository {
    pub fn new(backend: Arc<dyn ProfileStore>) -> Self {
        Self { backend }
    }

    pub fn from_config(config: &ProfileStoreConfig) -> Self {
        Self::new(Arc::new(JsonFileStore::from_config(config)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryProfileStore::new()))
    }

    pub async fn list(&self) -> Result<Vec<Profile>> {
        self.backend.load_all().await
    }

    /// Append a snapshot of `brief` under `name`. Names are trimmed and need
    /// not be unique.
    pub async fn save(&self, name: &str, brief: &CreativeBrief) -> Result<Profile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CreativeError::InvalidInput(
                "Profile name cannot be empty".into(),
            ));
        }

        let mut profiles = self.backend.load_all().await?;
        let profile = Profile::new(name, brief.clone());
        profiles.push(profile.clone());
        self.backend.save_all(&profiles).await?;

        log::info!("Saved profile '{}' ({})", profile.name, profile.id);
        Ok(profile)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Profile>> {
        Ok(self
            .backend
            .load_all()
            .await?
            .into_iter()
            .find(|profile| profile.id == id))
    }

    /// Returns whether a profile was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut profiles = self.backend.load_all().await?;
        let before = profiles.len();
        profiles.retain(|profile| profile.id != id);

        if profiles.len() == before {
            log::warn!("No profile with id {} to delete", id);
            return Ok(false);
        }

        self.backend.save_all(&profiles).await?;
        log::info!("Deleted profile {}", id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_get_delete() {
        let repo = ProfileRepository::in_memory();
        let brief = CreativeBrief::new("launch teaser").with_colors(["#010203"]);

        let saved = repo.save("  Launch  ", &brief).await.unwrap();
        assert_eq!(saved.name, "Launch");
        assert_eq!(saved.brief, brief);

        let loaded = repo.get(&saved.id).await.unwrap().unwrap();
        assert_eq!(loaded, saved);

        assert!(repo.delete(&saved.id).await.unwrap());
        assert!(!repo.delete(&saved.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_names_are_kept_in_save_order() {
        let repo = ProfileRepository::in_memory();
        let first = repo.save("Promo", &CreativeBrief::new("a")).await.unwrap();
        let second = repo.save("Promo", &CreativeBrief::new("b")).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn blank_names_are_rejected() {
        let repo = ProfileRepository::in_memory();
        assert!(matches!(
            repo.save("   ", &CreativeBrief::default()).await,
            Err(CreativeError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn file_backed_repository_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProfileStoreConfig::new().with_path(dir.path().join("profiles.json"));

        let saved = ProfileRepository::from_config(&config)
            .save("Winter", &CreativeBrief::new("snow banner"))
            .await
            .unwrap();

        let reopened = ProfileRepository::from_config(&config);
        let loaded = reopened.get(&saved.id).await.unwrap().unwrap();
        assert_eq!(loaded.brief.objective, "snow banner");
    }
}
