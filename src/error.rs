use thiserror::Error;

#[derive(Debug, Error)]
pub enum CreativeError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("Render context error: {0}")]
    RenderContext(String),
    #[error("Invalid image envelope: {0}")]
    InvalidImageEnvelope(String),
    #[error("The model did not return an image")]
    NoImageReturned,
    #[error("Request error: {message}")]
    Request {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    #[error("Response error: {0}")]
    Response(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CreativeError {
    pub fn request(message: impl Into<String>) -> Self {
        CreativeError::Request {
            message: message.into(),
            source: None,
        }
    }

    pub fn request_with_source(message: impl Into<String>, source: reqwest::Error) -> Self {
        CreativeError::Request {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Local palette-extraction failures. Callers skip auto-palette on these.
    pub fn is_extraction_error(&self) -> bool {
        matches!(
            self,
            CreativeError::ImageDecode(_) | CreativeError::RenderContext(_)
        )
    }

    /// Message shown to the user when an action fails. The underlying cause
    /// is logged separately and never shown verbatim for remote failures.
    pub fn user_message(&self) -> String {
        match self {
            CreativeError::InvalidInput(msg) => msg.clone(),
            CreativeError::NoImageReturned => {
                "Image generation failed: the model did not return an image.".to_string()
            }
            CreativeError::InvalidImageEnvelope(_) => {
                "Image generation failed: one of the attached images is not a valid image."
                    .to_string()
            }
            _ => "Image generation failed. Check the logs for more details.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CreativeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_errors_are_flagged() {
        assert!(CreativeError::ImageDecode("bad png".into()).is_extraction_error());
        assert!(CreativeError::RenderContext("0x0".into()).is_extraction_error());
        assert!(!CreativeError::NoImageReturned.is_extraction_error());
        assert!(!CreativeError::request("quota").is_extraction_error());
    }

    #[test]
    fn request_errors_hide_the_cause_from_users() {
        let err = CreativeError::request("403 API key invalid: AIza...");
        assert!(!err.user_message().contains("AIza"));
        assert_eq!(
            CreativeError::InvalidInput("Please provide a creative brief.".into()).user_message(),
            "Please provide a creative brief."
        );
    }
}
