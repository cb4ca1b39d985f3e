// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Error body the backend emits for 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A failed API call, normalized for display: backend rejections keep the
/// verbatim `detail` text, transport problems collapse to a generic
/// network-error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: Option<u16>,
    pub title: String,
    pub detail: String,
}

impl ApiFailure {
    #[must_use]
    pub fn backend(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            title: format!("request failed ({status})"),
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            title: "network error".to_string(),
            detail: detail.into(),
        }
    }

    /// 5xx and transport failures escalate to `Error`; other backend
    /// rejections stay at `Warning`.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self.status {
            Some(status) if status < 500 => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.detail)
    }
}

impl std::error::Error for ApiFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_rejection_keeps_detail_verbatim() {
        let failure = ApiFailure::backend(422, "企业名称不能为空");
        assert_eq!(failure.detail, "企业名称不能为空");
        assert_eq!(failure.title, "request failed (422)");
        assert_eq!(failure.severity(), Severity::Warning);
    }

    #[test]
    fn server_errors_and_transport_failures_escalate() {
        assert_eq!(ApiFailure::backend(503, "x").severity(), Severity::Error);
        assert_eq!(ApiFailure::transport("timed out").severity(), Severity::Error);
    }

    #[test]
    fn envelope_parses_backend_detail_field() {
        let env: ErrorEnvelope =
            serde_json::from_str(r#"{"detail": "ticket owner is required"}"#).expect("parse");
        assert_eq!(env.detail, "ticket owner is required");
    }
}
