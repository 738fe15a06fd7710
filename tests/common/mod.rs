#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use axum::{
    extract::State,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use genframe::{app::env::Envy, build_router, AppState};
use serde_json::Value;

pub const TEST_TOKEN: &str = "flp_test_token";
pub const TEST_ENDPOINT_ID: &str = "ep-test-123";
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 1, 2, 3];

#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(status: StatusCode, content_type: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type,
            body: body.to_string(),
        }
    }
}

/// Stand-in for the hosted inference endpoint. Records every call.
pub struct MockProvider {
    pub base_url: String,
    calls: AtomicUsize,
    last_body: Mutex<Option<Value>>,
    last_authorization: Mutex<Option<String>>,
    reply: Mutex<Reply>,
    delay: Mutex<Duration>,
}

impl MockProvider {
    pub fn endpoint_url(&self) -> String {
        [&self.base_url, "/v1/images/generations"].concat()
    }

    pub fn image_url(&self) -> String {
        [&self.base_url, "/images/cube.png"].concat()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.last_authorization.lock().unwrap().clone()
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Replies 200 with a single image pointing back at this provider.
    pub fn reply_with_image(&self) {
        self.set_reply(Reply::json(
            StatusCode::OK,
            serde_json::json!({ "created": 1700000000, "data": [{ "url": self.image_url() }] }),
        ));
    }
}

pub async fn spawn(app: Router) -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .expect("server from listener")
            .serve(app.into_make_service())
            .await
            .expect("serve app")
    });

    addr
}

pub async fn spawn_provider() -> Arc<MockProvider> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("local addr");

    let provider = Arc::new(MockProvider {
        base_url: format!("http://{}", addr),
        calls: AtomicUsize::new(0),
        last_body: Mutex::new(None),
        last_authorization: Mutex::new(None),
        reply: Mutex::new(Reply::json(StatusCode::OK, serde_json::json!({ "data": [] }))),
        delay: Mutex::new(Duration::ZERO),
    });

    let app = Router::new()
        .route("/v1/images/generations", post(handle_generation))
        .route("/images/cube.png", get(serve_image))
        .with_state(provider.clone());

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .expect("server from listener")
            .serve(app.into_make_service())
            .await
            .expect("serve provider")
    });

    provider
}

async fn handle_generation(
    State(provider): State<Arc<MockProvider>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    provider.calls.fetch_add(1, Ordering::SeqCst);
    *provider.last_authorization.lock().unwrap() = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *provider.last_body.lock().unwrap() = serde_json::from_str(&body).ok();

    let delay = *provider.delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let reply = provider.reply.lock().unwrap().clone();
    (reply.status, [(CONTENT_TYPE, reply.content_type)], reply.body).into_response()
}

async fn serve_image() -> Response {
    ([(CONTENT_TYPE, "image/png")], PNG_BYTES.to_vec()).into_response()
}

pub fn configured_envy(provider: &MockProvider) -> Envy {
    Envy {
        friendli_token: Some(TEST_TOKEN.to_string()),
        friendli_endpoint_url: Some(provider.endpoint_url()),
        friendli_endpoint_id: Some(TEST_ENDPOINT_ID.to_string()),
        rate_limit_per_second: Some(1000),
        ..Default::default()
    }
}

/// Starts the gateway and returns its base url.
pub async fn spawn_gateway(envy: Envy) -> String {
    let addr = spawn(build_router(AppState::new(envy))).await;
    format!("http://{}", addr)
}

/// An address nothing listens on.
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind listener");
    listener.local_addr().expect("local addr")
}
