// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::body::{to_bytes, Body};
use axum::http::header::HeaderName;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use citybrain_api::ErrorEnvelope;
use tokio::time::timeout;
use tracing::{error, warn};

// Connection-scoped headers must not cross the proxy hop. Host and
// content-length are recomputed by the upstream client.
const HOP_BY_HOP: [&str; 10] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

fn envelope(status: StatusCode, detail: String) -> Response {
    (status, Json(ErrorEnvelope { detail })).into_response()
}

/// Forward one API request to the backend origin with the prefix rewrite
/// applied, streaming the backend's status, headers, and body back unchanged.
pub(crate) async fn forward(state: &AppState, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let rewritten = state.rule.rewrite(parts.uri.path()).into_owned();
    let mut target = format!("{}{rewritten}", state.config.backend_origin);
    if let Some(query) = parts.uri.query() {
        target.push('?');
        target.push_str(query);
    }

    let body_bytes = match to_bytes(body, state.config.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(target = %target, "refusing proxy body: {err}");
            return envelope(
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("request body too large: {err}"),
            );
        }
    };

    let mut headers = HeaderMap::new();
    for (name, value) in &parts.headers {
        if !is_hop_by_hop(name) {
            headers.append(name.clone(), value.clone());
        }
    }

    let send = state
        .http
        .request(parts.method.clone(), &target)
        .headers(headers)
        .body(body_bytes)
        .send();
    let upstream = match timeout(state.config.upstream_timeout, send).await {
        Err(_) => {
            error!(target = %target, "backend did not answer in time");
            return envelope(
                StatusCode::GATEWAY_TIMEOUT,
                format!(
                    "backend timed out after {}s",
                    state.config.upstream_timeout.as_secs()
                ),
            );
        }
        Ok(Err(err)) if err.is_timeout() => {
            error!(target = %target, "backend request timed out: {err}");
            return envelope(
                StatusCode::GATEWAY_TIMEOUT,
                format!(
                    "backend timed out after {}s",
                    state.config.upstream_timeout.as_secs()
                ),
            );
        }
        Ok(Err(err)) => {
            error!(target = %target, "backend request failed: {err}");
            return envelope(StatusCode::BAD_GATEWAY, format!("backend unreachable: {err}"));
        }
        Ok(Ok(upstream)) => upstream,
    };

    let status = upstream.status();
    let mut response_headers = HeaderMap::new();
    for (name, value) in upstream.headers() {
        if !is_hop_by_hop(name) {
            response_headers.append(name.clone(), value.clone());
        }
    }

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    response
}
