use crate::{
    error::{CreativeError, Result},
    models::Profile,
    storage::traits::ProfileStore,
};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<Vec<Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load_all(&self) -> Result<Vec<Profile>> {
        self.profiles
            .lock()
            .map(|profiles| profiles.clone())
            .map_err(|e| CreativeError::Storage(format!("profile store poisoned: {}", e)))
    }

    async fn save_all(&self, profiles: &[Profile]) -> Result<()> {
        let mut stored = self
            .profiles
            .lock()
            .map_err(|e| CreativeError::Storage(format!("profile store poisoned: {}", e)))?;
        *stored = profiles.to_vec();
        Ok(())
    }
}
