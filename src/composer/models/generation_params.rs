use validator::Validate;

use crate::{
    composer::{
        enums::{resolution::Resolution, style_preset::StylePreset},
        errors::ComposerError,
    },
    generations::dtos::generate_image_dto::{GenerateImageDto, RESPONSE_FORMAT_URL},
};

pub const DEFAULT_STEPS: u32 = 30;
pub const DEFAULT_GUIDANCE_SCALE: f64 = 7.5;

/// Parameters as the user entered them.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct GenerationParams {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "prompt must be between 1 and 1000 characters."
    ))]
    pub prompt: String,
    pub negative_prompt: String,
    pub resolution: Resolution,
    #[validate(range(min = 10, max = 50, message = "steps must be between 10 and 50."))]
    pub num_inference_steps: u32,
    #[validate(range(
        min = 1.0,
        max = 15.0,
        message = "guidance scale must be between 1 and 15."
    ))]
    pub guidance_scale: f64,
    pub style: StylePreset,
}

impl GenerationParams {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            negative_prompt: String::new(),
            resolution: Resolution::default(),
            num_inference_steps: DEFAULT_STEPS,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
            style: StylePreset::default(),
        }
    }

    pub fn sanitized(&self) -> Self {
        Self {
            prompt: self.prompt.trim().to_string(),
            negative_prompt: self.negative_prompt.trim().to_string(),
            ..self.clone()
        }
    }

    /// Builds the gateway payload. Fails on an empty prompt or out of range
    /// values without touching the network.
    pub fn to_dto(&self) -> Result<GenerateImageDto, ComposerError> {
        let params = self.sanitized();

        if params.prompt.is_empty() {
            return Err(ComposerError::EmptyPrompt);
        }

        if let Err(e) = params.validate() {
            return Err(ComposerError::InvalidParams(e.to_string()));
        }

        let (width, height) = params.resolution.dimensions();

        Ok(GenerateImageDto {
            prompt: params.style.apply(&params.prompt),
            negative_prompt: match params.negative_prompt.is_empty() {
                true => None,
                false => Some(params.negative_prompt),
            },
            num_inference_steps: params.num_inference_steps,
            guidance_scale: params.guidance_scale,
            width,
            height,
            response_format: RESPONSE_FORMAT_URL.to_string(),
        })
    }
}
