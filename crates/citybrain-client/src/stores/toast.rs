// SPDX-License-Identifier: Apache-2.0

use citybrain_api::{ApiFailure, Severity, ToastVariant};
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_DURATION_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
    pub duration_ms: Option<u64>,
}

/// Transient notification queue. Expiry is the renderer's concern; the store
/// only records the intended duration.
#[derive(Debug, Default)]
pub struct ToastStore {
    toasts: Vec<Toast>,
    id_seed: AtomicU64,
}

impl ToastStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Appends a toast and returns its assigned id.
    pub fn enqueue(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        variant: ToastVariant,
    ) -> String {
        let id = format!("toast-{}", self.id_seed.fetch_add(1, Ordering::Relaxed));
        self.toasts.push(Toast {
            id: id.clone(),
            title: title.into(),
            description,
            variant,
            duration_ms: Some(DEFAULT_DURATION_MS),
        });
        id
    }

    /// Surfaces a failed API call with severity mapped to the toast variant.
    pub fn enqueue_failure(&mut self, failure: &ApiFailure) -> String {
        let variant = match failure.severity() {
            Severity::Error => ToastVariant::Error,
            Severity::Warning => ToastVariant::Warning,
        };
        self.enqueue(failure.title.clone(), Some(failure.detail.clone()), variant)
    }

    pub fn remove(&mut self, id: &str) {
        self.toasts.retain(|toast| toast.id != id);
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}
