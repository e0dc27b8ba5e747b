use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_PROFILE_KEY: &str = "creative-profiles";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub sample_stride: usize,
    pub alpha_threshold: u8,
    pub color_count: usize,
}

#[derive(Debug, Clone)]
pub struct ProfileStoreConfig {
    pub path: PathBuf,
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub extraction: ExtractionConfig,
    pub profiles: ProfileStoreConfig,
    pub output_dir: PathBuf,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: None,
            endpoint: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model = env::var("GEMINI_MODEL").ok();
        let endpoint = env::var("GEMINI_ENDPOINT").ok();

        GeminiConfig {
            api_key,
            model,
            endpoint,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or(DEFAULT_ENDPOINT)
            .trim_end_matches('/')
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            sample_stride: 5,
            alpha_threshold: 128,
            color_count: 5,
        }
    }
}

impl ExtractionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let sample_stride = env::var("PALETTE_SAMPLE_STRIDE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|stride| *stride > 0)
            .unwrap_or(defaults.sample_stride);
        let alpha_threshold = env::var("PALETTE_ALPHA_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.alpha_threshold);
        let color_count = env::var("PALETTE_COLOR_COUNT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.color_count);

        ExtractionConfig {
            sample_stride,
            alpha_threshold,
            color_count,
        }
    }

    /// A stride of zero is treated as one (every pixel).
    pub fn with_sample_stride(mut self, stride: usize) -> Self {
        self.sample_stride = stride.max(1);
        self
    }

    pub fn with_alpha_threshold(mut self, threshold: u8) -> Self {
        self.alpha_threshold = threshold;
        self
    }

    pub fn with_color_count(mut self, count: usize) -> Self {
        self.color_count = count;
        self
    }
}

impl Default for ProfileStoreConfig {
    fn default() -> Self {
        ProfileStoreConfig {
            path: PathBuf::from("profiles.json"),
            key: DEFAULT_PROFILE_KEY.to_string(),
        }
    }
}

impl ProfileStoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let path = env::var("PROFILE_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.path);
        let key = env::var("PROFILE_STORE_KEY").unwrap_or(defaults.key);

        ProfileStoreConfig { path, key }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini: GeminiConfig::default(),
            extraction: ExtractionConfig::default(),
            profiles: ProfileStoreConfig::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let output_dir = env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Config {
            gemini: GeminiConfig::from_env(),
            extraction: ExtractionConfig::from_env(),
            profiles: ProfileStoreConfig::from_env(),
            output_dir,
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_extraction(mut self, config: ExtractionConfig) -> Self {
        self.extraction = config;
        self
    }

    pub fn with_profiles(mut self, config: ProfileStoreConfig) -> Self {
        self.profiles = config;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_defaults() {
        let config = GeminiConfig::new();
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);

        let custom = GeminiConfig::new()
            .with_model("gemini-3-pro-image-preview")
            .with_endpoint("http://localhost:9000/models/");
        assert_eq!(custom.model(), "gemini-3-pro-image-preview");
        assert_eq!(custom.endpoint(), "http://localhost:9000/models");
    }

    #[test]
    fn extraction_defaults_and_builders() {
        let config = ExtractionConfig::new();
        assert_eq!(config.sample_stride, 5);
        assert_eq!(config.alpha_threshold, 128);
        assert_eq!(config.color_count, 5);

        let config = config.with_sample_stride(0).with_color_count(3);
        assert_eq!(config.sample_stride, 1);
        assert_eq!(config.color_count, 3);
    }

    #[test]
    fn profile_store_defaults() {
        let config = Config::new().with_profiles(ProfileStoreConfig::new().with_path("/tmp/p.json"));
        assert_eq!(config.profiles.key, "creative-profiles");
        assert_eq!(config.profiles.path, PathBuf::from("/tmp/p.json"));
    }
}
