use crate::models::brief::CreativeBrief;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named snapshot of a brief. Stored flat: `id`, `name` and the brief fields
/// side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub brief: CreativeBrief,
}

impl Profile {
    pub fn new(name: impl Into<String>, brief: CreativeBrief) -> Self {
        Self {
            id: timestamped_id(),
            name: name.into(),
            brief,
        }
    }
}

/// `<unix millis>-<8 hex chars>`; the suffix keeps two saves in the same
/// millisecond apart.
pub fn timestamped_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..8])
}
