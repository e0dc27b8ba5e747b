pub mod image_client;

use crate::{
    config::GeminiConfig,
    error::{CreativeError, Result},
    models::{ComposedRequest, InlineImage},
};
use async_trait::async_trait;
use reqwest::Client;

pub use image_client::{extract_image, ImageClient};

/// Anything that can turn a composed request into one image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn invoke(&self, request: &ComposedRequest) -> Result<InlineImage>;
}

#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CreativeError::Config("Gemini API key is required".into()))?;

        let client = Client::builder()
            .build()
            .map_err(|e| CreativeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            image_client: ImageClient::new(
                client,
                api_key,
                config.model().to_string(),
                config.endpoint().to_string(),
            ),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn invoke(&self, request: &ComposedRequest) -> Result<InlineImage> {
        self.image_client.generate(request).await
    }
}
