#![forbid(unsafe_code)]

//! Configuration-driven replacement for the fleet of near-duplicate SPA
//! dev/prod servers: one process that forwards `/api*` traffic to the
//! backend origin (collapsing the doubled `/api/api` prefix) and serves the
//! built dashboard bundle with history-mode fallback for everything else.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

mod assets;
mod middleware;
mod proxy;
mod rewrite;

pub use rewrite::RewriteRule;

pub const CRATE_NAME: &str = "citybrain-gateway";

#[derive(Debug)]
pub struct GatewayError(pub String);

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for GatewayError {}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    /// Scheme + authority of the backend, no trailing slash.
    pub backend_origin: String,
    pub api_prefixes: Vec<String>,
    pub doubled_prefix: String,
    pub collapsed_prefix: String,
    /// Asset roots probed in declared order (built bundle first).
    pub asset_roots: Vec<PathBuf>,
    pub fallback_document: String,
    pub upstream_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 9002)),
            backend_origin: "http://127.0.0.1:9003".to_string(),
            api_prefixes: vec!["/api".to_string()],
            doubled_prefix: "/api/api".to_string(),
            collapsed_prefix: "/api".to_string(),
            asset_roots: vec![PathBuf::from("dist"), PathBuf::from("public")],
            fallback_document: "index.html".to_string(),
            upstream_timeout: Duration::from_secs(60),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub(crate) rule: Arc<RewriteRule>,
    pub(crate) http: reqwest::Client,
    request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|err| GatewayError(format!("upstream client init failed: {err}")))?;
        let rule = RewriteRule::new(
            config.api_prefixes.clone(),
            config.doubled_prefix.clone(),
            config.collapsed_prefix.clone(),
        );
        Ok(Self {
            config: Arc::new(config),
            rule: Arc::new(rule),
            http,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        })
    }

    pub(crate) fn next_request_id(&self) -> String {
        format!("req-{}", self.request_id_seed.fetch_add(1, Ordering::Relaxed))
    }
}

#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing_middleware,
        ))
        .with_state(state)
}

async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = request.uri().path().to_string();
    if state.rule.matches(&path) {
        return proxy::forward(&state, request).await;
    }
    if request.method() == Method::GET || request.method() == Method::HEAD {
        return assets::serve(&state, &path);
    }
    StatusCode::NOT_FOUND.into_response()
}
