// SPDX-License-Identifier: Apache-2.0

use crate::client::ApiClient;
use crate::stores::GlobalFilters;
use citybrain_api::DashboardSnapshot;
use std::sync::Arc;

pub struct DashboardStore {
    client: Arc<ApiClient>,
    pub snapshot: Option<DashboardSnapshot>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DashboardStore {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            snapshot: None,
            loading: false,
            error: None,
        }
    }

    pub async fn load(&mut self, filters: &GlobalFilters) {
        self.loading = true;
        self.error = None;
        match self.client.dashboard_snapshot(&filters.as_query()).await {
            Ok(snapshot) => self.snapshot = Some(snapshot),
            Err(failure) => self.error = Some(failure.detail),
        }
        self.loading = false;
    }
}
