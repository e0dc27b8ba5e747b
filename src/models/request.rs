use crate::models::image::InlineImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    Image(InlineImage),
}

impl Part {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(text) => Some(text),
            Part::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&InlineImage> {
        match self {
            Part::Image(image) => Some(image),
            Part::Text(_) => None,
        }
    }
}

/// Ordered text and image parts for one model call. Position matters: a text
/// label is followed by the attachments it names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedRequest {
    parts: Vec<Part>,
}

impl ComposedRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.parts.push(Part::Text(text.into()));
    }

    pub fn push_image(&mut self, image: InlineImage) {
        self.parts.push(Part::Image(image));
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The directive text, always the first part.
    pub fn prompt(&self) -> Option<&str> {
        self.parts.first().and_then(Part::as_text)
    }

    pub fn image_count(&self) -> usize {
        self.parts.iter().filter(|p| p.as_image().is_some()).count()
    }
}
