// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

/// Immutable path-rewrite rule, constructed once at server start.
///
/// Dashboard callers sometimes prepend `/api` on top of an already-prefixed
/// base URL, producing `/api/api/v1/...`. The rule collapses the doubled
/// prefix exactly once, so both spellings reach the backend as the same path.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    prefixes: Vec<String>,
    doubled: String,
    collapsed: String,
}

impl RewriteRule {
    #[must_use]
    pub fn new(
        prefixes: Vec<String>,
        doubled: impl Into<String>,
        collapsed: impl Into<String>,
    ) -> Self {
        Self {
            prefixes,
            doubled: doubled.into(),
            collapsed: collapsed.into(),
        }
    }

    /// True iff `path` starts with a configured API prefix at a segment
    /// boundary. `/api` matches `/api` and `/api/v1/x`, never `/apiary`.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| {
            path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Collapse a leading doubled prefix once. Idempotent: a path already
    /// carrying the single prefix passes through unchanged.
    #[must_use]
    pub fn rewrite<'a>(&self, path: &'a str) -> Cow<'a, str> {
        match path.strip_prefix(self.doubled.as_str()) {
            Some("") => Cow::Owned(self.collapsed.clone()),
            Some(rest) if rest.starts_with('/') => {
                Cow::Owned(format!("{}{rest}", self.collapsed))
            }
            _ => Cow::Borrowed(path),
        }
    }
}
