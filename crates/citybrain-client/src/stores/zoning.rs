// SPDX-License-Identifier: Apache-2.0

use crate::client::ApiClient;
use citybrain_api::ZoningLayer;
use std::sync::Arc;

pub struct ZoningStore {
    client: Arc<ApiClient>,
    pub layers: Vec<ZoningLayer>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ZoningStore {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            layers: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.client.zoning_layers().await {
            Ok(response) => self.layers = response.layers,
            Err(failure) => self.error = Some(failure.detail),
        }
        self.loading = false;
    }
}
