use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RATE_LIMIT_PER_SECOND: u64 = 10;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Process configuration, loaded once from the environment.
///
/// The provider values stay optional so that a misconfigured server still
/// boots and answers every generation with a configuration error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envy {
    pub app_env: Option<String>,
    pub port: Option<u16>,

    pub friendli_token: Option<String>,
    pub friendli_endpoint_url: Option<String>,
    pub friendli_endpoint_id: Option<String>,

    pub rate_limit_per_second: Option<u64>,
    pub body_limit_bytes: Option<usize>,
}

impl Envy {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn rate_limit_per_second(&self) -> u64 {
        self.rate_limit_per_second
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_RATE_LIMIT_PER_SECOND)
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_bytes.unwrap_or(DEFAULT_BODY_LIMIT_BYTES)
    }
}
