// SPDX-License-Identifier: Apache-2.0

use crate::client::ApiClient;
use citybrain_api::Identity;
use std::sync::Arc;

/// Holds the locally stored operator identity and keeps the client's bearer
/// token in step with it.
pub struct IdentityStore {
    client: Arc<ApiClient>,
    identity: Option<Identity>,
}

impl IdentityStore {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            identity: None,
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn set_identity(&mut self, identity: Identity) {
        self.client.set_bearer_token(Some(identity.id.clone()));
        self.identity = Some(identity);
    }

    pub fn clear(&mut self) {
        self.client.set_bearer_token(None);
        self.identity = None;
    }
}
