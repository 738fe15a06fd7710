use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum GenerationsApiError {
    MissingToken,
    MissingEndpointUrl,
    MissingEndpointId,
    ProviderUnreachable,
    UnexpectedContentType,
    MalformedProviderResponse,
}

impl GenerationsApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::MissingToken => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Server configuration error: FRIENDLI_TOKEN is not set.".to_string(),
            },
            Self::MissingEndpointUrl => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Server configuration error: FRIENDLI_ENDPOINT_URL is not set."
                    .to_string(),
            },
            Self::MissingEndpointId => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Server configuration error: FRIENDLI_ENDPOINT_ID is not set."
                    .to_string(),
            },
            Self::ProviderUnreachable => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to reach the image provider.".to_string(),
            },
            Self::UnexpectedContentType => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Received an unexpected response format from the image provider."
                    .to_string(),
            },
            Self::MalformedProviderResponse => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to parse the image provider response.".to_string(),
            },
        }
    }
}
