use crate::models::{aspect::AspectRatio, image::DataUrl};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PALETTE: [&str; 3] = ["#4A90E2", "#50E3C2", "#000000"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextMode {
    WithText,
    #[default]
    NoText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInputs {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub subheading: String,
}

/// Everything the user filled in for a new creative. Field names on the wire
/// match the stored profile layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeBrief {
    #[serde(rename = "prompt")]
    pub objective: String,
    #[serde(default)]
    pub logo: Option<DataUrl>,
    #[serde(default)]
    pub icon: Option<DataUrl>,
    #[serde(default)]
    pub inspiration: Vec<DataUrl>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub aspect_ratio: String,
    #[serde(rename = "textOption", default)]
    pub text_mode: TextMode,
    #[serde(rename = "textInputs", default)]
    pub text: TextInputs,
}

impl Default for CreativeBrief {
    fn default() -> Self {
        Self {
            objective: String::new(),
            logo: None,
            icon: None,
            inspiration: Vec::new(),
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            aspect_ratio: AspectRatio::Square.label(),
            text_mode: TextMode::NoText,
            text: TextInputs::default(),
        }
    }
}

impl CreativeBrief {
    pub fn new(objective: impl Into<String>) -> Self {
        Self {
            objective: objective.into(),
            ..Default::default()
        }
    }

    pub fn with_logo(mut self, logo: DataUrl) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn with_icon(mut self, icon: DataUrl) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_inspiration(mut self, images: Vec<DataUrl>) -> Self {
        self.inspiration = images;
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = aspect_ratio.into();
        self
    }

    pub fn with_text_mode(mut self, mode: TextMode) -> Self {
        self.text_mode = mode;
        self
    }

    /// Sets the overlay copy and switches the brief to `WithText`.
    pub fn with_text(mut self, headline: impl Into<String>, subheading: impl Into<String>) -> Self {
        self.text = TextInputs {
            headline: headline.into(),
            subheading: subheading.into(),
        };
        self.text_mode = TextMode::WithText;
        self
    }

    /// True only when text was requested and there is some copy to place.
    pub fn has_text_overlay(&self) -> bool {
        self.text_mode == TextMode::WithText
            && (!self.text.headline.trim().is_empty() || !self.text.subheading.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub instruction: String,
    pub base_image: DataUrl,
}

impl EditRequest {
    pub fn new(instruction: impl Into<String>, base_image: DataUrl) -> Self {
        Self {
            instruction: instruction.into(),
            base_image,
        }
    }
}

/// What a single generation call does. Creation and editing never share fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationMode {
    Create(CreativeBrief),
    Edit(EditRequest),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_requires_mode_and_copy() {
        let brief = CreativeBrief::new("banner").with_text("", "  ");
        assert!(!brief.has_text_overlay());

        let brief = brief.with_text("Summer Sale", "");
        assert!(brief.has_text_overlay());

        let brief = brief.with_text_mode(TextMode::NoText);
        assert!(!brief.has_text_overlay());
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let brief = CreativeBrief::new("banner")
            .with_colors(["#112233"])
            .with_aspect_ratio("16:9");
        let json = serde_json::to_value(&brief).unwrap();

        assert_eq!(json["prompt"], "banner");
        assert_eq!(json["aspectRatio"], "16:9");
        assert_eq!(json["textOption"], "noText");
        assert_eq!(json["textInputs"]["headline"], "");
        assert!(json["logo"].is_null());
    }
}
