#![forbid(unsafe_code)]

use citybrain_gateway::{build_router, AppState, GatewayConfig, CRATE_NAME};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn env_str(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_path_list(name: &str, default: &[&str]) -> Vec<PathBuf> {
    let raw = env::var(name).unwrap_or_default();
    let parsed: Vec<PathBuf> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect();
    if parsed.is_empty() {
        default.iter().map(PathBuf::from).collect()
    } else {
        parsed
    }
}

fn config_from_env() -> GatewayConfig {
    let defaults = GatewayConfig::default();
    let bind_addr = env_str("CITYBRAIN_GATEWAY_BIND", "0.0.0.0:9002")
        .parse::<SocketAddr>()
        .unwrap_or(defaults.bind_addr);
    GatewayConfig {
        bind_addr,
        backend_origin: env_str("CITYBRAIN_BACKEND_ORIGIN", &defaults.backend_origin),
        asset_roots: env_path_list("CITYBRAIN_ASSET_ROOTS", &["dist", "public"]),
        fallback_document: env_str("CITYBRAIN_FALLBACK_DOCUMENT", &defaults.fallback_document),
        upstream_timeout: Duration::from_secs(env_u64("CITYBRAIN_UPSTREAM_TIMEOUT_SECS", 60)),
        max_body_bytes: env_usize("CITYBRAIN_MAX_BODY_BYTES", defaults.max_body_bytes),
        ..defaults
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config_from_env();
    let bind_addr = config.bind_addr;
    let backend_origin = config.backend_origin.clone();

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(err) => {
            error!("{CRATE_NAME} init failed: {err}");
            std::process::exit(1);
        }
    };
    let app = build_router(state);

    let listener = match TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(addr = %bind_addr, "bind failed: {err}");
            std::process::exit(1);
        }
    };
    info!(addr = %bind_addr, backend = %backend_origin, "{CRATE_NAME} listening");

    if let Err(err) = axum::serve(listener, app).await {
        error!("server exited: {err}");
        std::process::exit(1);
    }
}
