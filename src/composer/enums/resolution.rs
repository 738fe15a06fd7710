use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resolution {
    Square512,
    Square768,
    #[default]
    Square1024,
    Portrait768x1024,
    Landscape1024x768,
    Widescreen1280x720,
}

impl Resolution {
    pub const ALL: [Resolution; 6] = [
        Self::Square512,
        Self::Square768,
        Self::Square1024,
        Self::Portrait768x1024,
        Self::Landscape1024x768,
        Self::Widescreen1280x720,
    ];

    pub fn value(&self) -> &str {
        match *self {
            Self::Square512 => "512x512",
            Self::Square768 => "768x768",
            Self::Square1024 => "1024x1024",
            Self::Portrait768x1024 => "768x1024",
            Self::Landscape1024x768 => "1024x768",
            Self::Widescreen1280x720 => "1280x720",
        }
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match *self {
            Self::Square512 => (512, 512),
            Self::Square768 => (768, 768),
            Self::Square1024 => (1024, 1024),
            Self::Portrait768x1024 => (768, 1024),
            Self::Landscape1024x768 => (1024, 768),
            Self::Widescreen1280x720 => (1280, 720),
        }
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|r| r.value() == s.trim())
            .copied()
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|r| r.value()).collect();
                ["Resolution must be one of: ", &valid.join(",")].concat()
            })
    }
}
