use std::{
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use bytes::Bytes;

use crate::{
    app::{models::api_error::ApiErrorBody, util::time::current_time_in_millis},
    generations::dtos::generate_image_dto::GenerateImageDto,
};

use super::{
    enums::composer_state::ComposerState,
    errors::ComposerError,
    models::{
        generation_params::GenerationParams,
        history::{History, HistoryEntry},
    },
    structs::generation_response::GenerationResponse,
};

pub const GENERATE_PATH: &str = "/api/generate";

/// Client side of a generation: builds the payload, posts it to the gateway
/// and keeps the resulting state and history.
///
/// Only one generation runs at a time. Each accepted generation gets a
/// request token, and a completion is applied only while the composer is
/// still in flight with that token.
pub struct Composer {
    client: reqwest::Client,
    generate_url: String,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    state: ComposerState,
    history: History,
    next_token: u64,
}

/// Leaves `InFlight { token }` for `Idle` if the generation it belongs to
/// never reached `complete`.
struct InFlightGuard<'a> {
    composer: &'a Composer,
    token: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.composer.lock();

        if inner.state == (ComposerState::InFlight { token: self.token }) {
            tracing::debug!(token = self.token, "generation dropped before completion");
            inner.state = ComposerState::Idle;
        }
    }
}

struct Ticket {
    token: u64,
    prompt: String,
    dto: GenerateImageDto,
}

impl Composer {
    pub fn new(gateway_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), gateway_url)
    }

    pub fn with_client(client: reqwest::Client, gateway_url: &str) -> Self {
        Self {
            client,
            generate_url: [gateway_url.trim_end_matches('/'), GENERATE_PATH].concat(),
            inner: Mutex::new(Inner {
                state: ComposerState::Idle,
                history: History::default(),
                next_token: 0,
            }),
        }
    }

    /// Runs one generation and returns the image url on success.
    ///
    /// Dropping the returned future before it resolves returns the composer
    /// to `Idle`.
    pub async fn generate(&self, params: &GenerationParams) -> Result<String, ComposerError> {
        let ticket = self.begin(params)?;
        let _guard = InFlightGuard {
            composer: self,
            token: ticket.token,
        };
        let result = self.post_generation(&ticket.dto).await;
        self.complete(ticket.token, &ticket.prompt, result)
    }

    /// Returns to `Idle`. A generation still running is left to finish but
    /// its result is discarded.
    pub fn reset(&self) {
        self.lock().state = ComposerState::Idle;
    }

    pub fn state(&self) -> ComposerState {
        self.lock().state.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.lock().state, ComposerState::InFlight { .. })
    }

    pub fn image_url(&self) -> Option<String> {
        match &self.lock().state {
            ComposerState::Success { image_url, .. } => Some(image_url.to_string()),
            _ => None,
        }
    }

    pub fn prompt_of_record(&self) -> Option<String> {
        match &self.lock().state {
            ComposerState::Success { prompt, .. } => Some(prompt.to_string()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<String> {
        match &self.lock().state {
            ComposerState::Error { message } => Some(message.to_string()),
            _ => None,
        }
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().history.entries()
    }

    pub async fn download_current(&self) -> Result<Bytes, ComposerError> {
        let Some(url) = self.image_url() else {
            return Err(ComposerError::NothingToDownload);
        };

        self.download(&url).await
    }

    /// Fetches an already generated image. Independent of any generation.
    pub async fn download(&self, url: &str) -> Result<Bytes, ComposerError> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(ComposerError::Download)?;

        res.bytes().await.map_err(ComposerError::Download)
    }

    /// Downloads the displayed image into `dir` and returns the written path.
    pub async fn save_current(&self, dir: &Path) -> Result<PathBuf, ComposerError> {
        let bytes = self.download_current().await?;
        let path = dir.join(format!("generated-{}.png", current_time_in_millis()));

        tokio::fs::write(&path, &bytes).await?;
        tracing::info!(path = %path.display(), size = bytes.len(), "saved generated image");

        Ok(path)
    }

    fn begin(&self, params: &GenerationParams) -> Result<Ticket, ComposerError> {
        let mut inner = self.lock();

        if let ComposerState::InFlight { token } = inner.state {
            tracing::debug!(token, "generation already in flight");
            return Err(ComposerError::RequestInFlight);
        }

        let dto = match params.to_dto() {
            Ok(dto) => dto,
            Err(e) => {
                inner.state = ComposerState::Error {
                    message: e.to_string(),
                };
                return Err(e);
            }
        };

        inner.next_token += 1;
        let token = inner.next_token;
        inner.state = ComposerState::InFlight { token };
        tracing::debug!(
            token,
            style = params.style.value(),
            resolution = params.resolution.value(),
            "generation started"
        );

        Ok(Ticket {
            token,
            prompt: params.sanitized().prompt,
            dto,
        })
    }

    fn complete(
        &self,
        token: u64,
        prompt: &str,
        result: Result<String, ComposerError>,
    ) -> Result<String, ComposerError> {
        let mut inner = self.lock();

        if inner.state != (ComposerState::InFlight { token }) {
            tracing::debug!(token, "discarding stale generation result");
            return result;
        }

        match &result {
            Ok(image_url) => {
                inner.state = ComposerState::Success {
                    image_url: image_url.to_string(),
                    prompt: prompt.to_string(),
                };
                inner.history.push(HistoryEntry::new(image_url, prompt));
            }
            Err(e) => {
                tracing::warn!(%e, "generation failed");
                inner.state = ComposerState::Error {
                    message: e.to_string(),
                };
            }
        }

        tracing::debug!(
            token,
            state = inner.state.value(),
            history = inner.history.len(),
            "generation completed"
        );

        result
    }

    async fn post_generation(&self, dto: &GenerateImageDto) -> Result<String, ComposerError> {
        let res = self.client.post(&self.generate_url).json(dto).send().await?;
        let status = res.status();

        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();

            return Err(match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(body) if !body.error.is_empty() => ComposerError::Gateway {
                    status: status.as_u16(),
                    message: body.error,
                },
                _ => ComposerError::UnexpectedStatus(status.as_u16()),
            });
        }

        let response = match res.json::<GenerationResponse>().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(%e, "gateway returned an unreadable body");
                return Err(ComposerError::MalformedResponse);
            }
        };

        match response.first_url() {
            Some(url) => Ok(url.to_string()),
            None => Err(ComposerError::MalformedResponse),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
