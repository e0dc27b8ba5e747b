//! Turns a creative brief or an edit request into the ordered text and image
//! parts sent to the image model.

use crate::{
    error::Result,
    models::{ComposedRequest, CreativeBrief, DataUrl, EditRequest, GenerationMode},
};

pub const LOGO_LABEL: &str = "Logo:";
pub const ICON_LABEL: &str = "Icon:";
pub const INSPIRATION_LABEL: &str = "Inspiration Images:";

pub const DERIVE_PALETTE_DIRECTIVE: &str =
    "No brand colors were supplied: derive a professional, attractive palette from the provided logo.";
pub const NO_TEXT_DIRECTIVE: &str = "The design must be purely visual, with no text.";

#[derive(Debug, Clone, Copy, Default)]
pub struct RequestComposer;

impl RequestComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, mode: &GenerationMode) -> Result<ComposedRequest> {
        match mode {
            GenerationMode::Create(brief) => self.build_create(brief),
            GenerationMode::Edit(edit) => self.build_edit(edit),
        }
    }

    fn build_edit(&self, edit: &EditRequest) -> Result<ComposedRequest> {
        let base = edit.base_image.parse()?;

        let mut request = ComposedRequest::new();
        request.push_text(edit_directive(&edit.instruction));
        request.push_image(base);

        log::debug!("Composed edit request: {} parts", request.len());
        Ok(request)
    }

    fn build_create(&self, brief: &CreativeBrief) -> Result<ComposedRequest> {
        // Parse every envelope before emitting anything so a bad attachment
        // fails the whole request.
        let logo = brief.logo.as_ref().map(DataUrl::parse).transpose()?;
        let icon = brief.icon.as_ref().map(DataUrl::parse).transpose()?;
        let inspiration = brief
            .inspiration
            .iter()
            .map(DataUrl::parse)
            .collect::<Result<Vec<_>>>()?;

        let mut request = ComposedRequest::new();
        request.push_text(create_directive(brief));

        if let Some(logo) = logo {
            request.push_text(LOGO_LABEL);
            request.push_image(logo);
        }
        if let Some(icon) = icon {
            request.push_text(ICON_LABEL);
            request.push_image(icon);
        }
        if !inspiration.is_empty() {
            request.push_text(INSPIRATION_LABEL);
            for image in inspiration {
                request.push_image(image);
            }
        }

        log::debug!(
            "Composed create request: {} parts, {} images, aspect ratio {}",
            request.len(),
            request.image_count(),
            brief.aspect_ratio
        );
        Ok(request)
    }
}

fn edit_directive(instruction: &str) -> String {
    format!(
        "You are an expert photo editor. The user has provided a base image and an editing instruction.\n\
         **Editing instruction:** {instruction}\n\n\
         Modify the base image according to the instruction. Keep the rest of the image and its style consistent.\n\
         **CRITICAL:** Your output must be ONLY the final edited image. Do not generate text, commentary or alternatives."
    )
}

fn create_directive(brief: &CreativeBrief) -> String {
    let palette = if brief.colors.is_empty() {
        DERIVE_PALETTE_DIRECTIVE.to_string()
    } else {
        format!(
            "Adhere strictly to this brand color palette: [{}].",
            brief.colors.join(", ")
        )
    };

    format!(
        "You are an expert graphic designer creating a high-quality marketing asset.\n\n\
         **Objective:** {objective}\n\n\
         **Provided assets:**\n\
         - If a \"Logo\" is provided, incorporate it naturally and professionally. It is the primary brand element.\n\
         - If an \"Icon\" is provided, use it as a secondary graphic element that supports the design.\n\n\
         **Style and inspiration:**\n\
         - Base the visual style, mood and composition on the \"Inspiration Images\" if provided.\n\
         - {palette}\n\n\
         {text}\n\n\
         **Layout and format:**\n\
         - The final image must have an aspect ratio of exactly {aspect_ratio}.\n\
         - Render the image in high resolution.\n\n\
         **CRITICAL:** Your output must be ONLY the final image. Do not generate text descriptions, commentary or multiple options.",
        objective = brief.objective,
        palette = palette,
        text = text_directive(brief),
        aspect_ratio = brief.aspect_ratio,
    )
}

fn text_directive(brief: &CreativeBrief) -> String {
    if !brief.has_text_overlay() {
        return NO_TEXT_DIRECTIVE.to_string();
    }

    let mut lines = vec!["**Text to include:**".to_string()];
    if !brief.text.headline.trim().is_empty() {
        lines.push(format!("- Headline: \"{}\"", brief.text.headline));
    }
    if !brief.text.subheading.trim().is_empty() {
        lines.push(format!("- Subheading: \"{}\"", brief.text.subheading));
    }
    lines.push(
        "Integrate this text naturally into the design, using professional, legible typography that complements the overall style."
            .to_string(),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::CreativeError,
        models::{InlineImage, Part, TextMode},
    };

    fn png(tag: u8) -> DataUrl {
        InlineImage::new("image/png", vec![tag, tag, tag]).to_data_url()
    }

    fn compose(mode: GenerationMode) -> ComposedRequest {
        RequestComposer::new().build(&mode).unwrap()
    }

    #[test]
    fn edit_request_is_instruction_then_image() {
        let request = compose(GenerationMode::Edit(EditRequest::new(
            "make the sky purple",
            png(7),
        )));

        assert_eq!(request.len(), 2);
        let prompt = request.prompt().unwrap();
        assert!(prompt.contains("make the sky purple"));
        assert!(prompt.contains("ONLY the final edited image"));
        assert!(!prompt.contains("aspect ratio"));
        assert!(!prompt.contains("palette"));
        assert!(!prompt.contains("Text to include"));
        assert_eq!(
            request.parts()[1],
            Part::Image(InlineImage::new("image/png", vec![7, 7, 7]))
        );
    }

    #[test]
    fn empty_palette_falls_back_to_logo_colors() {
        let brief = CreativeBrief::new("logo reveal").with_colors(Vec::<String>::new());
        let request = compose(GenerationMode::Create(brief));
        let prompt = request.prompt().unwrap();

        assert!(prompt.contains(DERIVE_PALETTE_DIRECTIVE));
        assert!(!prompt.contains("[]"));
    }

    #[test]
    fn colors_are_comma_joined() {
        let brief = CreativeBrief::new("x").with_colors(["#112233", "#AABBCC"]);
        let request = compose(GenerationMode::Create(brief));
        assert!(request.prompt().unwrap().contains("[#112233, #AABBCC]"));
    }

    #[test]
    fn no_text_mode_ignores_headline_copy() {
        let brief = CreativeBrief::new("poster")
            .with_text("BIG SALE", "today only")
            .with_text_mode(TextMode::NoText);
        let prompt = compose(GenerationMode::Create(brief)).prompt().unwrap().to_string();

        assert!(!prompt.contains("BIG SALE"));
        assert!(!prompt.contains("today only"));
        assert!(!prompt.contains("Headline"));
        assert!(prompt.contains(NO_TEXT_DIRECTIVE));
    }

    #[test]
    fn with_text_mode_includes_only_filled_lines() {
        let brief = CreativeBrief::new("poster").with_text("BIG SALE", "");
        let prompt = compose(GenerationMode::Create(brief)).prompt().unwrap().to_string();

        assert!(prompt.contains("- Headline: \"BIG SALE\""));
        assert!(!prompt.contains("Subheading"));
        assert!(!prompt.contains(NO_TEXT_DIRECTIVE));
    }

    #[test]
    fn attachments_follow_their_labels_in_order() {
        let brief = CreativeBrief::new("banner")
            .with_logo(png(1))
            .with_icon(png(2))
            .with_inspiration(vec![png(3), png(4)]);
        let request = compose(GenerationMode::Create(brief));

        let labels: Vec<Option<&str>> = request.parts().iter().map(Part::as_text).collect();
        assert_eq!(request.len(), 8);
        assert_eq!(labels[1], Some(LOGO_LABEL));
        assert_eq!(labels[3], Some(ICON_LABEL));
        assert_eq!(labels[5], Some(INSPIRATION_LABEL));

        let tags: Vec<u8> = request
            .parts()
            .iter()
            .filter_map(Part::as_image)
            .map(|image| image.data[0])
            .collect();
        assert_eq!(tags, vec![1, 2, 3, 4]);
    }

    #[test]
    fn missing_assets_emit_no_labels() {
        let request = compose(GenerationMode::Create(CreativeBrief::new("plain")));
        assert_eq!(request.len(), 1);
        assert_eq!(request.image_count(), 0);
    }

    #[test]
    fn bad_envelope_fails_the_request() {
        let brief = CreativeBrief::new("banner")
            .with_logo(png(1))
            .with_inspiration(vec![png(2), DataUrl::new("data:image/png;base64")]);
        let err = RequestComposer::new()
            .build(&GenerationMode::Create(brief))
            .unwrap_err();
        assert!(matches!(err, CreativeError::InvalidImageEnvelope(_)));

        let err = RequestComposer::new()
            .build(&GenerationMode::Edit(EditRequest::new(
                "brighter",
                DataUrl::new("https://example.com/a.png"),
            )))
            .unwrap_err();
        assert!(matches!(err, CreativeError::InvalidImageEnvelope(_)));
    }

    #[test]
    fn summer_shoe_banner() {
        let brief = CreativeBrief::new("banner for summer shoe sale")
            .with_colors(["#112233"])
            .with_aspect_ratio("16:9")
            .with_text_mode(TextMode::NoText);
        let request = compose(GenerationMode::Create(brief));
        let prompt = request.prompt().unwrap();

        assert!(prompt.contains("16:9"));
        assert!(prompt.contains("#112233"));
        assert!(prompt.contains("banner for summer shoe sale"));
        assert!(!prompt.contains("Headline"));
        assert!(!prompt.contains("Subheading"));
    }
}
