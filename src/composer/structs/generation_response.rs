use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    #[serde(default)]
    pub url: Option<String>,
}

impl GenerationResponse {
    pub fn first_url(&self) -> Option<&str> {
        self.data
            .first()
            .and_then(|image| image.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}
