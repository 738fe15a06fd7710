use axum::{extract::State, Json};
use serde_json::Value;

use crate::{
    app::models::{api_error::ApiError, json_from_request::JsonFromRequest},
    AppState,
};

use super::{dtos::generate_image_dto::GenerateImageDto, service};

pub async fn generate_image(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<GenerateImageDto>,
) -> Result<Json<Value>, ApiError> {
    match service::generate_image(&dto, &state).await {
        Ok(value) => Ok(Json(value)),
        Err(e) => Err(e),
    }
}
