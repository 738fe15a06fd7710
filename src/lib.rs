use std::{any::Any, sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::header::CONTENT_TYPE,
    http::Method,
    response::{IntoResponse, Response},
    routing::{get, post},
    BoxError, Router,
};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::app::{env::Envy, errors::DefaultApiError};

pub mod app;
pub mod composer;
pub mod generations;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(envy: Envy) -> Self {
        Self {
            envy: Arc::new(envy),
            client: reqwest::Client::new(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let rate_limit = state.envy.rate_limit_per_second();
    let body_limit = state.envy.body_limit_bytes();

    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/", get(app::controller::get_root))
        .route("/api/generate", post(generations::controller::generate_image))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    tracing::error!(%err, "request rejected by middleware");
                    DefaultApiError::ServiceOverloaded.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(rate_limit, Duration::from_secs(1))),
        )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    tracing::error!(details, "handler panicked");
    DefaultApiError::InternalServerError.value().into_response()
}
