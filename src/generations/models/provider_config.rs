use std::fmt;

use crate::{app::env::Envy, generations::errors::GenerationsApiError};

/// The three values needed to reach the provider. Built per request from
/// [`Envy`] so a missing value fails that request before any outbound call.
#[derive(Clone)]
pub struct ProviderConfig {
    pub token: String,
    pub endpoint_url: String,
    pub endpoint_id: String,
}

impl ProviderConfig {
    pub fn from_envy(envy: &Envy) -> Result<Self, GenerationsApiError> {
        let Some(token) = required(&envy.friendli_token) else {
            return Err(GenerationsApiError::MissingToken);
        };
        let Some(endpoint_url) = required(&envy.friendli_endpoint_url) else {
            return Err(GenerationsApiError::MissingEndpointUrl);
        };
        let Some(endpoint_id) = required(&envy.friendli_endpoint_id) else {
            return Err(GenerationsApiError::MissingEndpointId);
        };

        Ok(Self {
            token,
            endpoint_url,
            endpoint_id,
        })
    }
}

fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("token", &"<redacted>")
            .field("endpoint_url", &self.endpoint_url)
            .field("endpoint_id", &self.endpoint_id)
            .finish()
    }
}
