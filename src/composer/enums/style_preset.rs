use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StylePreset {
    #[default]
    None,
    Photographic,
    Anime,
    DigitalArt,
    Cinematic,
    Watercolor,
    PixelArt,
}

impl StylePreset {
    pub fn value(&self) -> &str {
        match *self {
            Self::None => "none",
            Self::Photographic => "photographic",
            Self::Anime => "anime",
            Self::DigitalArt => "digital_art",
            Self::Cinematic => "cinematic",
            Self::Watercolor => "watercolor",
            Self::PixelArt => "pixel_art",
        }
    }

    fn suffix(&self) -> Option<&'static str> {
        match *self {
            Self::None => None,
            Self::Photographic => Some(
                "photorealistic, 35mm photograph, natural lighting, highly detailed",
            ),
            Self::Anime => Some("anime style, vibrant colors, cel shading"),
            Self::DigitalArt => Some("digital art, concept art, trending on artstation"),
            Self::Cinematic => Some(
                "cinematic still, dramatic lighting, shallow depth of field",
            ),
            Self::Watercolor => Some("watercolor painting, soft washes, paper texture"),
            Self::PixelArt => Some("pixel art, 16-bit, limited palette"),
        }
    }

    pub fn apply(&self, prompt: &str) -> String {
        match self.suffix() {
            Some(suffix) => [prompt, ", ", suffix].concat(),
            None => prompt.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_leaves_prompt_untouched() {
        assert_eq!(StylePreset::None.apply("a red cube"), "a red cube");
        assert_eq!(StylePreset::default().value(), "none");
    }

    #[test]
    fn preset_appends_suffix() {
        let styled = StylePreset::Anime.apply("a red cube");
        assert!(styled.starts_with("a red cube, "));
        assert!(styled.contains("anime style"));
    }
}
