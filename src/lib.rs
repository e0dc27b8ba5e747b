//! Marketing-visual generation on top of Gemini image models.
//!
//! A [`CreativeBrief`] (objective, logo, icon, inspiration images, palette,
//! aspect ratio, optional text overlay) is composed into a multi-part request
//! by [`RequestComposer`] and sent through an [`ImageGenerator`]. The returned
//! image can then be refined with an [`EditRequest`]. [`CreativeStudio`] ties
//! these together with palette extraction from logos and saved profiles.

pub mod composer;
pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod palette;
pub mod storage;
pub mod studio;

pub use composer::RequestComposer;
pub use config::{Config, ExtractionConfig, GeminiConfig, ProfileStoreConfig};
pub use error::{CreativeError, Result};
pub use gemini::{GeminiClient, ImageClient, ImageGenerator};
pub use models::{
    aspect_ratio_token, AspectRatio, Color, ComposedRequest, CreativeBrief, DataUrl, EditRequest,
    GenerationMode, InlineImage, Part, Profile, TextInputs, TextMode,
};
pub use palette::{extract_palette, PaletteExtractor};
pub use storage::{JsonFileStore, MemoryProfileStore, ProfileRepository, ProfileStore};
pub use studio::CreativeStudio;
