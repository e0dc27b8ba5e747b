use crate::{
    error::{CreativeError, Result},
    logger,
    models::{
        gemini::{GenerateContentRequest, GenerateContentResponse},
        ComposedRequest, InlineImage,
    },
};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;

use super::ImageGenerator;

const ERROR_BODY_LIMIT: usize = 200;

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl ImageClient {
    pub fn new(client: Client, api_key: String, model: String, endpoint: String) -> Self {
        Self {
            client,
            api_key,
            model,
            endpoint,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint, self.model)
    }

    pub async fn generate(&self, request: &ComposedRequest) -> Result<InlineImage> {
        if request.is_empty() {
            return Err(CreativeError::InvalidInput(
                "Cannot send an empty request".into(),
            ));
        }

        let payload = GenerateContentRequest::image_only(request);

        log::info!(
            "Generating image with model: {} ({} parts, {} images)",
            self.model,
            request.len(),
            request.image_count()
        );
        let _timer = logger::timer("gemini generateContent");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini transport error: {:?}", e);
                CreativeError::request_with_source("Gemini request failed", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let truncated: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            log::error!("Gemini returned {}: {}", status, truncated);
            return Err(CreativeError::request(format!(
                "Gemini API error {}: {}",
                status, truncated
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CreativeError::Response(format!("Failed to decode Gemini response: {}", e)))?;

        extract_image(&parsed)
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn invoke(&self, request: &ComposedRequest) -> Result<InlineImage> {
        self.generate(request).await
    }
}

/// First non-empty inline image of the first candidate. Text parts are skipped.
pub fn extract_image(response: &GenerateContentResponse) -> Result<InlineImage> {
    let candidate = response.candidates.first().ok_or_else(|| {
        log::warn!("Gemini response had no candidates");
        CreativeError::NoImageReturned
    })?;

    let parts = candidate
        .content
        .as_ref()
        .map(|content| content.parts.as_slice())
        .unwrap_or_default();

    for inline in parts.iter().filter_map(|part| part.inline_data.as_ref()) {
        let data = general_purpose::STANDARD
            .decode(&inline.data)
            .map_err(|e| CreativeError::Response(format!("Image payload is not base64: {}", e)))?;
        if data.is_empty() {
            log::warn!("Skipping empty {} part", inline.mime_type);
            continue;
        }
        return Ok(InlineImage::new(inline.mime_type.clone(), data));
    }

    log::warn!(
        "Gemini candidate had no image part (finish reason: {})",
        candidate.finish_reason.as_deref().unwrap_or("unknown")
    );
    Err(CreativeError::NoImageReturned)
}
