// SPDX-License-Identifier: Apache-2.0

use crate::client::ApiClient;
use citybrain_api::OpportunitiesSearchResponse;
use std::sync::Arc;

/// Cross-source opportunity search (AS, IPG, enterprise profiles, work
/// orders). A failed search clears the previous result; the views render
/// counts straight off the summary.
pub struct OpportunitiesStore {
    client: Arc<ApiClient>,
    pub search_result: Option<OpportunitiesSearchResponse>,
    pub loading: bool,
    pub error: Option<String>,
}

impl OpportunitiesStore {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            search_result: None,
            loading: false,
            error: None,
        }
    }

    pub async fn search(&mut self, company_name: &str, limit_per_source: u32) {
        self.loading = true;
        self.error = None;
        match self
            .client
            .search_opportunities(company_name, limit_per_source)
            .await
        {
            Ok(response) => self.search_result = Some(response),
            Err(failure) => {
                self.error = Some(failure.detail);
                self.search_result = None;
            }
        }
        self.loading = false;
    }

    pub fn clear_results(&mut self) {
        self.search_result = None;
        self.error = None;
    }

    #[must_use]
    pub fn has_results(&self) -> bool {
        self.total_count() > 0
    }

    #[must_use]
    pub fn as_count(&self) -> u64 {
        self.search_result
            .as_ref()
            .map_or(0, |r| r.summary.as_count)
    }

    #[must_use]
    pub fn ipg_count(&self) -> u64 {
        self.search_result
            .as_ref()
            .map_or(0, |r| r.summary.ipg_count)
    }

    #[must_use]
    pub fn qd_count(&self) -> u64 {
        self.search_result
            .as_ref()
            .map_or(0, |r| r.summary.qd_count)
    }

    #[must_use]
    pub fn work_order_count(&self) -> u64 {
        self.search_result
            .as_ref()
            .map_or(0, |r| r.summary.work_order_count)
    }

    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.search_result
            .as_ref()
            .map_or(0, |r| r.summary.total_count)
    }
}
