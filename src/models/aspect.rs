use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Square,
    Landscape,
    Portrait,
    Standard,
    Photo,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Standard,
        AspectRatio::Photo,
    ];

    /// The bare ratio sent to the model.
    pub fn token(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Standard => "4:3",
            AspectRatio::Photo => "3:2",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AspectRatio::Square => "Square",
            AspectRatio::Landscape => "Landscape",
            AspectRatio::Portrait => "Portrait",
            AspectRatio::Standard => "Standard",
            AspectRatio::Photo => "Photo",
        }
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.token(), self.description())
    }

    pub fn from_token(token: &str) -> Option<Self> {
        let token = aspect_ratio_token(token);
        Self::ALL.into_iter().find(|ratio| ratio.token() == token)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Strip a human label such as `16:9 (Landscape)` down to `16:9`.
pub fn aspect_ratio_token(label: &str) -> &str {
    label.split_whitespace().next().unwrap_or("")
}
