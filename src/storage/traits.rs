use crate::{error::Result, models::Profile};
use async_trait::async_trait;

/// Whole-array persistence for profiles. There are no partial updates: every
/// change rewrites the full list under the store's key.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load_all(&self) -> Result<Vec<Profile>>;
    async fn save_all(&self, profiles: &[Profile]) -> Result<()>;
}
