// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;
use std::fs;
use std::path::Path;
use tracing::error;

/// Resolve a non-API GET under the configured asset roots, in declared
/// order. Misses fall back to the SPA entry document with status 200 so
/// client-side routing can take over.
pub(crate) fn serve(state: &AppState, raw_path: &str) -> Response {
    let decoded = percent_decode_str(raw_path).decode_utf8_lossy().to_string();
    let relative = decoded.trim_start_matches('/');

    if !relative.is_empty() {
        for root in &state.config.asset_roots {
            if let Some(response) = try_file(root, relative) {
                return response;
            }
        }
    }

    for root in &state.config.asset_roots {
        let entry = root.join(&state.config.fallback_document);
        if let Ok(bytes) = fs::read(&entry) {
            return (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/html; charset=utf-8"),
                )],
                bytes,
            )
                .into_response();
        }
    }

    error!(
        document = %state.config.fallback_document,
        "fallback document missing under all asset roots"
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!(
            "server misconfigured: {} not found under any asset root",
            state.config.fallback_document
        ),
    )
        .into_response()
}

fn try_file(root: &Path, relative: &str) -> Option<Response> {
    let candidate = root.join(relative);
    if !is_within_root(root, &candidate) {
        return None;
    }
    if !candidate.is_file() {
        return None;
    }
    let bytes = fs::read(&candidate).ok()?;
    let mime = mime_guess::from_path(&candidate).first_or_octet_stream();
    let content_type = HeaderValue::from_str(mime.as_ref()).ok()?;
    Some(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

// Canonicalize both sides; a candidate that escapes the root (or does not
// exist) is treated as a miss.
fn is_within_root(root: &Path, candidate: &Path) -> bool {
    match (root.canonicalize(), candidate.canonicalize()) {
        (Ok(root), Ok(candidate)) => candidate.starts_with(&root),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn traversal_outside_the_root_is_a_miss() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("dist");
        fs::create_dir(&root).expect("mkdir");
        fs::write(dir.path().join("secret.txt"), b"nope").expect("write");

        assert!(try_file(&root, "../secret.txt").is_none());
        assert!(try_file(&root, "missing.js").is_none());
    }

    #[test]
    fn hits_carry_a_guessed_content_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("app.css"), b"body{}").expect("write");

        let response = try_file(dir.path(), "app.css").expect("hit");
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("content type");
        assert_eq!(content_type, "text/css");
    }
}
