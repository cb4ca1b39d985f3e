// SPDX-License-Identifier: Apache-2.0

use crate::client::ApiClient;
use citybrain_api::CompanyResponse;
use std::sync::Arc;

pub struct CompanyStore {
    client: Arc<ApiClient>,
    pub result: Option<CompanyResponse>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CompanyStore {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            result: None,
            loading: false,
            error: None,
        }
    }

    pub async fn search_company(&mut self, input_text: &str) {
        self.loading = true;
        self.error = None;
        match self.client.process_company(input_text).await {
            Ok(response) => self.result = Some(response),
            Err(failure) => self.error = Some(failure.detail),
        }
        self.loading = false;
    }

    pub fn clear_result(&mut self) {
        self.result = None;
        self.error = None;
    }
}
