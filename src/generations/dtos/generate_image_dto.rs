use serde::{Deserialize, Serialize};

pub const RESPONSE_FORMAT_URL: &str = "url";

/// Body of `POST /api/generate`. Bounds on steps and guidance are a client
/// concern; the gateway only requires that the body parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateImageDto {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    pub num_inference_steps: u32,
    pub guidance_scale: f64,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_response_format")]
    pub response_format: String,
}

fn default_response_format() -> String {
    RESPONSE_FORMAT_URL.to_string()
}
