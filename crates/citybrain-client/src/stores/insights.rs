// SPDX-License-Identifier: Apache-2.0

use crate::client::ApiClient;
use citybrain_api::CombinedStatistics;
use std::sync::Arc;

/// The insights panel is backed by the combined opportunity statistics; the
/// backend has no time-series API, so the panel was repurposed onto it.
pub struct InsightsStore {
    client: Arc<ApiClient>,
    pub data: Option<CombinedStatistics>,
    pub loading: bool,
    pub error: Option<String>,
}

impl InsightsStore {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            data: None,
            loading: false,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.client.opportunity_statistics().await {
            Ok(statistics) => self.data = Some(statistics),
            Err(failure) => self.error = Some(failure.detail),
        }
        self.loading = false;
    }
}
