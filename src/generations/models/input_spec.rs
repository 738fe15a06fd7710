use serde::Serialize;

use crate::generations::dtos::generate_image_dto::GenerateImageDto;

/// Payload sent to the provider. `model` always comes from server
/// configuration.
#[derive(Debug, Serialize)]
pub struct InputSpec {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    pub num_inference_steps: u32,
    pub guidance_scale: f64,
    pub width: u32,
    pub height: u32,
    pub response_format: String,
}

impl InputSpec {
    pub fn new(dto: &GenerateImageDto, model: &str) -> Self {
        Self {
            model: model.to_string(),
            prompt: dto.prompt.to_string(),
            negative_prompt: dto.negative_prompt.clone(),
            num_inference_steps: dto.num_inference_steps,
            guidance_scale: dto.guidance_scale,
            width: dto.width,
            height: dto.height,
            response_format: dto.response_format.to_string(),
        }
    }
}
