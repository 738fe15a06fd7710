use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("Please enter a prompt.")]
    EmptyPrompt,
    #[error("{0}")]
    InvalidParams(String),
    #[error("A generation is already in progress.")]
    RequestInFlight,
    /// Message produced by the gateway, shown verbatim.
    #[error("{message}")]
    Gateway { status: u16, message: String },
    #[error("Image generation failed with status {0}.")]
    UnexpectedStatus(u16),
    #[error("Response structure unexpected.")]
    MalformedResponse,
    #[error("Failed to reach the image service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("No image to download.")]
    NothingToDownload,
    #[error("Failed to download image: {0}")]
    Download(#[source] reqwest::Error),
    #[error("Failed to save image: {0}")]
    Io(#[from] std::io::Error),
}

impl ComposerError {
    /// HTTP status reported by the gateway, when there was one.
    pub fn status(&self) -> Option<u16> {
        match *self {
            Self::Gateway { status, .. } => Some(status),
            Self::UnexpectedStatus(status) => Some(status),
            _ => None,
        }
    }
}
