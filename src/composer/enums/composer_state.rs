#[derive(Debug, Clone, PartialEq)]
pub enum ComposerState {
    Idle,
    InFlight { token: u64 },
    Success { image_url: String, prompt: String },
    Error { message: String },
}

impl ComposerState {
    pub fn value(&self) -> &str {
        match *self {
            Self::Idle => "idle",
            Self::InFlight { .. } => "in_flight",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }
}
