use crate::error::{CreativeError, Result};
use base64::{engine::general_purpose, Engine as _};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `data:<mime>;base64,<payload>` image envelope, kept verbatim so that
/// briefs and profiles store exactly what the user supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUrl(String);

impl DataUrl {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the envelope into its MIME type and decoded payload.
    pub fn parse(&self) -> Result<InlineImage> {
        let rest = self.0.strip_prefix("data:").ok_or_else(|| {
            CreativeError::InvalidImageEnvelope("missing `data:` prefix".into())
        })?;

        let (mime_type, payload) = rest.split_once(";base64,").ok_or_else(|| {
            CreativeError::InvalidImageEnvelope("missing `;base64,` separator".into())
        })?;

        if mime_type.is_empty() {
            return Err(CreativeError::InvalidImageEnvelope(
                "empty MIME type".into(),
            ));
        }
        if payload.is_empty() {
            return Err(CreativeError::InvalidImageEnvelope("empty payload".into()));
        }

        let data = general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| CreativeError::InvalidImageEnvelope(format!("bad base64: {}", e)))?;

        Ok(InlineImage {
            mime_type: mime_type.to_string(),
            data,
        })
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&InlineImage> for DataUrl {
    fn from(image: &InlineImage) -> Self {
        image.to_data_url()
    }
}

/// Raw image bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Sniff the format from the bytes themselves; file extensions are not trusted.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&data)
            .map_err(|e| CreativeError::ImageDecode(format!("unrecognised image format: {}", e)))?;

        Ok(Self {
            mime_type: format.to_mime_type().to_string(),
            data,
        })
    }

    pub fn base64_data(&self) -> String {
        general_purpose::STANDARD.encode(&self.data)
    }

    pub fn to_data_url(&self) -> DataUrl {
        DataUrl(format!("data:{};base64,{}", self.mime_type, self.base64_data()))
    }

    pub fn decode(&self) -> Result<DynamicImage> {
        image::load_from_memory(&self.data).map_err(|e| CreativeError::ImageDecode(e.to_string()))
    }
}
