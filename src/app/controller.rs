use axum::http::StatusCode;

/// Liveness probe for load balancers.
pub async fn get_root() -> StatusCode {
    StatusCode::OK
}
