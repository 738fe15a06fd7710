use reqwest::{header, Response, StatusCode};
use serde_json::Value;

use crate::{app::models::api_error::ApiError, AppState};

use super::{
    dtos::generate_image_dto::GenerateImageDto,
    errors::GenerationsApiError,
    models::{input_spec::InputSpec, provider_config::ProviderConfig},
};

pub const PROVIDER_ERROR_PREFIX: &str = "Friendli API Error: ";

pub async fn generate_image(dto: &GenerateImageDto, state: &AppState) -> Result<Value, ApiError> {
    let config = match ProviderConfig::from_envy(&state.envy) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("generate_image refused, provider not configured: {:?}", e);
            return Err(e.value());
        }
    };

    let input_spec = InputSpec::new(dto, &config.endpoint_id);

    tracing::info!(
        endpoint_id = %config.endpoint_id,
        width = input_spec.width,
        height = input_spec.height,
        steps = input_spec.num_inference_steps,
        "forwarding generation request"
    );

    let result = state
        .client
        .post(&config.endpoint_url)
        .bearer_auth(&config.token)
        .json(&input_spec)
        .send()
        .await;

    match result {
        Ok(res) => parse_provider_response(res).await,
        Err(e) => {
            tracing::error!(%e, "generate_image failed to reach provider");
            Err(GenerationsApiError::ProviderUnreachable.value())
        }
    }
}

async fn parse_provider_response(res: Response) -> Result<Value, ApiError> {
    let status = res.status();

    if !status.is_success() {
        let message = read_error_message(status, res).await;
        tracing::warn!(status = status.as_u16(), %message, "provider returned an error");

        return Err(ApiError {
            code: status,
            message: [PROVIDER_ERROR_PREFIX, &message].concat(),
        });
    }

    if !is_json_content_type(res.headers().get(header::CONTENT_TYPE)) {
        tracing::error!(
            content_type = ?res.headers().get(header::CONTENT_TYPE),
            "provider succeeded with a non json body"
        );
        return Err(GenerationsApiError::UnexpectedContentType.value());
    }

    match res.json::<Value>().await {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::error!(%e);
            Err(GenerationsApiError::MalformedProviderResponse.value())
        }
    }
}

async fn read_error_message(status: StatusCode, res: Response) -> String {
    let status_text = status
        .canonical_reason()
        .unwrap_or("Unknown Error")
        .to_string();

    match res.text().await {
        Ok(text) => match extract_error_message(&text) {
            Some(message) => message,
            None if text.trim().is_empty() => status_text,
            None => text,
        },
        Err(e) => {
            tracing::error!(%e);
            status_text
        }
    }
}

/// Picks the provider's error message out of a JSON body, trying `detail`,
/// then `error.message`, then `error`.
pub fn extract_error_message(text: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return None;
    };

    if let Some(message) = value.get("detail").and_then(message_from_value) {
        return Some(message);
    }

    let error = value.get("error");

    if let Some(message) = error
        .and_then(|e| e.get("message"))
        .and_then(message_from_value)
    {
        return Some(message);
    }

    error.and_then(message_from_value)
}

/// `null` and empty strings count as absent. Any other non-string value is
/// reported as its JSON text.
fn message_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.to_string()),
        other => Some(other.to_string()),
    }
}

fn is_json_content_type(value: Option<&header::HeaderValue>) -> bool {
    let Some(value) = value.and_then(|v| v.to_str().ok()) else {
        return false;
    };

    match value.parse::<mime::Mime>() {
        Ok(m) => {
            m.type_() == mime::APPLICATION
                && (m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn detail_wins_over_error_fields() {
        let text = r#"{"detail":"invalid width","error":{"message":"other"}}"#;
        assert_eq!(extract_error_message(text).as_deref(), Some("invalid width"));
    }

    #[test]
    fn nested_message_before_plain_error() {
        let text = r#"{"error":{"message":"rate limited","type":"quota"}}"#;
        assert_eq!(extract_error_message(text).as_deref(), Some("rate limited"));
    }

    #[test]
    fn plain_error_string() {
        let text = r#"{"error":"model not found"}"#;
        assert_eq!(extract_error_message(text).as_deref(), Some("model not found"));
    }

    #[test]
    fn error_object_without_message_is_serialized() {
        let text = r#"{"error":{"code":42}}"#;
        assert_eq!(extract_error_message(text).as_deref(), Some(r#"{"code":42}"#));
    }

    #[test]
    fn non_string_detail_is_serialized() {
        let text = r#"{"detail":[{"loc":["body","width"],"msg":"too large"}]}"#;
        let message = extract_error_message(text).unwrap();
        assert!(message.contains("too large"));
    }

    #[test]
    fn only_null_and_empty_strings_are_skipped() {
        assert_eq!(
            extract_error_message(r#"{"detail":null,"error":false}"#).as_deref(),
            Some("false")
        );
        assert_eq!(
            extract_error_message(r#"{"detail":"","error":0}"#).as_deref(),
            Some("0")
        );
        assert_eq!(
            extract_error_message(r#"{"error":{"message":null}}"#).as_deref(),
            Some(r#"{"message":null}"#)
        );
    }

    #[test]
    fn none_for_plain_text_or_unknown_shape() {
        assert!(extract_error_message("upstream exploded").is_none());
        assert!(extract_error_message(r#"{"status":"bad"}"#).is_none());
        assert!(extract_error_message(r#"{"detail":"","error":null}"#).is_none());
    }

    #[test]
    fn recognizes_json_content_types() {
        assert!(is_json_content_type(Some(&HeaderValue::from_static(
            "application/json"
        ))));
        assert!(is_json_content_type(Some(&HeaderValue::from_static(
            "application/json; charset=utf-8"
        ))));
        assert!(is_json_content_type(Some(&HeaderValue::from_static(
            "application/problem+json"
        ))));
        assert!(!is_json_content_type(Some(&HeaderValue::from_static(
            "text/html"
        ))));
        assert!(!is_json_content_type(None));
    }
}
