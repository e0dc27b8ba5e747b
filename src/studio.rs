//! A working session: the brief being edited, the last generated image, and
//! the actions that operate on them.
//!
//! `generate` and `refine` borrow the session mutably for the whole remote
//! call, so a second call against the same working image cannot start until
//! the first one has finished.

use crate::{
    composer::RequestComposer,
    error::{CreativeError, Result},
    gemini::ImageGenerator,
    models::{
        aspect_ratio_token, timestamped_id, CreativeBrief, DataUrl, EditRequest, GenerationMode,
        InlineImage, Profile,
    },
    palette::PaletteExtractor,
    storage::ProfileRepository,
};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

pub const DOWNLOAD_PREFIX: &str = "creative-";

pub struct CreativeStudio {
    generator: Arc<dyn ImageGenerator>,
    profiles: ProfileRepository,
    composer: RequestComposer,
    extractor: PaletteExtractor,
    brief: CreativeBrief,
    generated: Option<InlineImage>,
    error: Option<String>,
}

impl CreativeStudio {
    pub fn new(generator: Arc<dyn ImageGenerator>, profiles: ProfileRepository) -> Self {
        Self {
            generator,
            profiles,
            composer: RequestComposer::new(),
            extractor: PaletteExtractor::default(),
            brief: CreativeBrief::default(),
            generated: None,
            error: None,
        }
    }

    pub fn with_extractor(mut self, extractor: PaletteExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn brief(&self) -> &CreativeBrief {
        &self.brief
    }

    pub fn brief_mut(&mut self) -> &mut CreativeBrief {
        &mut self.brief
    }

    pub fn generated(&self) -> Option<&InlineImage> {
        self.generated.as_ref()
    }

    /// Use an existing image (for example a previous download) as the one
    /// `refine` edits.
    pub fn adopt_image(&mut self, image: InlineImage) {
        self.generated = Some(image);
        self.error = None;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_objective(&mut self, objective: impl Into<String>) {
        self.brief.objective = objective.into();
    }

    /// Set the logo and, when its colors can be read, replace the palette with
    /// them. Extraction failures keep the current palette.
    pub fn set_logo(&mut self, logo: DataUrl) {
        match self.extractor.extract_data_url(&logo) {
            Ok(colors) if !colors.is_empty() => {
                log::info!("Palette populated from logo: {} colors", colors.len());
                self.brief.colors = colors.iter().map(|c| c.to_hex()).collect();
            }
            Ok(_) => log::debug!("Logo has no opaque colors, keeping palette"),
            Err(e) => log::warn!("Skipping palette extraction: {}", e),
        }
        self.brief.logo = Some(logo);
    }

    pub fn clear_logo(&mut self) {
        self.brief.logo = None;
    }

    pub fn set_icon(&mut self, icon: Option<DataUrl>) {
        self.brief.icon = icon;
    }

    pub async fn set_logo_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let logo = read_image_file(path.as_ref()).await?;
        self.set_logo(logo);
        Ok(())
    }

    /// Read every file concurrently and append the readable ones in input
    /// order. Returns how many were added.
    pub async fn add_inspiration_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        let results = join_all(paths.iter().map(|p| read_image_file(p.as_ref()))).await;

        let mut added = 0;
        for (path, result) in paths.iter().zip(results) {
            match result {
                Ok(url) => {
                    self.brief.inspiration.push(url);
                    added += 1;
                }
                Err(e) => log::warn!(
                    "Skipping inspiration image {}: {}",
                    path.as_ref().display(),
                    e
                ),
            }
        }
        added
    }

    pub fn remove_inspiration(&mut self, index: usize) -> Option<DataUrl> {
        (index < self.brief.inspiration.len()).then(|| self.brief.inspiration.remove(index))
    }

    pub fn add_color(&mut self, color: impl Into<String>) {
        self.brief.colors.push(color.into());
    }

    pub fn set_color(&mut self, index: usize, color: impl Into<String>) -> bool {
        match self.brief.colors.get_mut(index) {
            Some(slot) => {
                *slot = color.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_color(&mut self, index: usize) -> Option<String> {
        (index < self.brief.colors.len()).then(|| self.brief.colors.remove(index))
    }

    pub fn can_generate(&self) -> bool {
        !self.brief.objective.trim().is_empty()
    }

    pub fn can_refine(&self, instruction: &str) -> bool {
        self.generated.is_some() && !instruction.trim().is_empty()
    }

    /// Create a new image from the working brief. On failure the previous
    /// image stays in place and `last_error` holds the message to show.
    pub async fn generate(&mut self) -> Result<&InlineImage> {
        self.error = None;

        if !self.can_generate() {
            return Err(self.fail(CreativeError::InvalidInput(
                "Please provide a creative brief.".into(),
            )));
        }

        let mut snapshot = self.brief.clone();
        snapshot.aspect_ratio = aspect_ratio_token(&snapshot.aspect_ratio).to_string();

        let mode = GenerationMode::Create(snapshot);
        let result = self.run(&mode).await;
        match result {
            Ok(image) => Ok(&*self.generated.insert(image)),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Edit the current image with `instruction`.
    pub async fn refine(&mut self, instruction: &str) -> Result<&InlineImage> {
        self.error = None;

        let base_image = match (&self.generated, instruction.trim().is_empty()) {
            (Some(image), false) => image.to_data_url(),
            (None, _) => {
                return Err(CreativeError::InvalidInput(
                    "There is no generated image to refine.".into(),
                ))
            }
            (_, true) => {
                return Err(CreativeError::InvalidInput(
                    "Please describe the change to make.".into(),
                ))
            }
        };

        let mode = GenerationMode::Edit(EditRequest::new(instruction, base_image));
        let result = self.run(&mode).await;
        match result {
            Ok(image) => Ok(&*self.generated.insert(image)),
            Err(e) => Err(self.fail(e)),
        }
    }

    async fn run(&self, mode: &GenerationMode) -> Result<InlineImage> {
        let request = self.composer.build(mode)?;
        self.generator.invoke(&request).await
    }

    fn fail(&mut self, error: CreativeError) -> CreativeError {
        log::error!("Generation failed: {}", error);
        self.error = Some(error.user_message());
        error
    }

    pub async fn profiles(&self) -> Result<Vec<Profile>> {
        self.profiles.list().await
    }

    pub async fn save_profile(&self, name: &str) -> Result<Profile> {
        self.profiles.save(name, &self.brief).await
    }

    /// Replace every working brief field with the stored one. Returns false
    /// when no profile has that id.
    pub async fn load_profile(&mut self, id: &str) -> Result<bool> {
        match self.profiles.get(id).await? {
            Some(profile) => {
                log::info!("Loaded profile '{}'", profile.name);
                self.brief = profile.brief;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn delete_profile(&self, id: &str) -> Result<bool> {
        self.profiles.delete(id).await
    }

    /// Write the current image into `dir` as `creative-<millis>-<suffix>.png`.
    /// An existing file is never overwritten.
    pub async fn download(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let image = self
            .generated
            .as_ref()
            .ok_or_else(|| CreativeError::InvalidInput("Nothing to download yet.".into()))?;

        let path = dir.as_ref().join(download_file_name());
        let write_error =
            |e: std::io::Error| CreativeError::Storage(format!("Failed to write {}: {}", path.display(), e));
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(write_error)?;
        file.write_all(&image.data).await.map_err(write_error)?;
        file.flush().await.map_err(write_error)?;

        log::info!("Image saved to: {}", path.display());
        Ok(path)
    }
}

pub fn download_file_name() -> String {
    format!("{}{}.png", DOWNLOAD_PREFIX, timestamped_id())
}

/// Load an image file as a data URL, sniffing the MIME type from its bytes.
pub async fn read_image_file(path: &Path) -> Result<DataUrl> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CreativeError::Storage(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(InlineImage::from_bytes(bytes)?.to_data_url())
}
