// SPDX-License-Identifier: Apache-2.0

use crate::client::ApiClient;
use crate::stores::GlobalFilters;
use chrono::Utc;
use citybrain_api::{ApiFailure, CreateTicketPayload, OperationTicket, TicketStatus};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Lifecycle of one optimistic create, keyed by its shadow id.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingState {
    Pending,
    Confirmed(OperationTicket),
    RolledBack,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingCreate {
    pub shadow_id: String,
    pub state: PendingState,
}

/// Operation-ticket queue with optimistic create: the payload is shown
/// immediately under a client-generated shadow id, then replaced by the
/// backend's authoritative record or rolled back in full. Replacement is
/// guarded by id, so two in-flight creates reconcile independently.
pub struct OperationsStore {
    client: Arc<ApiClient>,
    shadow_seed: AtomicU64,
    pub tickets: Vec<OperationTicket>,
    pub pending: Vec<PendingCreate>,
    pub loading: bool,
    pub creating: bool,
    pub error: Option<String>,
}

impl OperationsStore {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            shadow_seed: AtomicU64::new(1),
            tickets: Vec::new(),
            pending: Vec::new(),
            loading: false,
            creating: false,
            error: None,
        }
    }

    pub async fn load(&mut self, filters: &GlobalFilters) {
        self.loading = true;
        self.error = None;
        match self.client.operation_tickets(&filters.as_query()).await {
            Ok(response) => {
                self.tickets = response.tickets;
                // a fresh list supersedes any reconciled history
                self.pending.retain(|p| p.state == PendingState::Pending);
            }
            Err(failure) => self.error = Some(failure.detail),
        }
        self.loading = false;
    }

    pub async fn create_ticket(
        &mut self,
        payload: CreateTicketPayload,
    ) -> Result<OperationTicket, ApiFailure> {
        self.creating = true;
        let shadow_id = self.insert_shadow(&payload);
        match self.client.create_operation_ticket(&payload).await {
            Ok(ticket) => {
                self.resolve_shadow(&shadow_id, PendingState::Confirmed(ticket.clone()));
                self.creating = false;
                Ok(ticket)
            }
            Err(failure) => {
                self.resolve_shadow(&shadow_id, PendingState::RolledBack);
                self.error = Some(failure.detail.clone());
                self.creating = false;
                Err(failure)
            }
        }
    }

    fn insert_shadow(&mut self, payload: &CreateTicketPayload) -> String {
        let shadow_id = format!(
            "ticket-temp-{}",
            self.shadow_seed.fetch_add(1, Ordering::Relaxed)
        );
        let shadow = OperationTicket {
            id: shadow_id.clone(),
            title: payload.title.clone(),
            status: TicketStatus::Open,
            priority: payload.priority,
            owner: payload.owner.clone(),
            updated_at: Utc::now().to_rfc3339(),
        };
        self.tickets.insert(0, shadow);
        self.pending.push(PendingCreate {
            shadow_id: shadow_id.clone(),
            state: PendingState::Pending,
        });
        shadow_id
    }

    fn resolve_shadow(&mut self, shadow_id: &str, outcome: PendingState) {
        self.tickets.retain(|ticket| ticket.id != shadow_id);
        if let PendingState::Confirmed(ticket) = &outcome {
            self.tickets.insert(0, ticket.clone());
        }
        if let Some(entry) = self
            .pending
            .iter_mut()
            .find(|entry| entry.shadow_id == shadow_id)
        {
            entry.state = outcome;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citybrain_api::TicketPriority;

    fn store_with_one_ticket() -> OperationsStore {
        let client = Arc::new(ApiClient::new("http://127.0.0.1:1/api").expect("client"));
        let mut store = OperationsStore::new(client);
        store.tickets.push(OperationTicket {
            id: "ticket-1".to_string(),
            title: "智慧路灯离线排查".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::High,
            owner: "张三".to_string(),
            updated_at: "2024-03-20T08:00:00Z".to_string(),
        });
        store
    }

    fn payload(title: &str) -> CreateTicketPayload {
        CreateTicketPayload {
            title: title.to_string(),
            priority: TicketPriority::Medium,
            owner: "李四".to_string(),
        }
    }

    #[test]
    fn shadow_ticket_is_prepended_while_pending() {
        let mut store = store_with_one_ticket();
        let shadow_id = store.insert_shadow(&payload("新建停车场规划"));

        assert_eq!(store.tickets.len(), 2);
        assert_eq!(store.tickets[0].id, shadow_id);
        assert_eq!(store.tickets[0].title, "新建停车场规划");
        assert_eq!(store.tickets[1].id, "ticket-1");
        assert_eq!(store.pending[0].state, PendingState::Pending);
    }

    #[test]
    fn confirmation_swaps_the_shadow_for_the_server_record() {
        let mut store = store_with_one_ticket();
        let shadow_id = store.insert_shadow(&payload("新建停车场规划"));

        let server = OperationTicket {
            id: "ticket-2".to_string(),
            title: "新建停车场规划".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::Medium,
            owner: "李四".to_string(),
            updated_at: "2024-03-21T02:00:00Z".to_string(),
        };
        store.resolve_shadow(&shadow_id, PendingState::Confirmed(server));

        let ids: Vec<&str> = store.tickets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["ticket-2", "ticket-1"]);
    }

    #[test]
    fn rollback_restores_the_original_list_exactly() {
        let mut store = store_with_one_ticket();
        let shadow_id = store.insert_shadow(&payload("测试失败"));
        store.resolve_shadow(&shadow_id, PendingState::RolledBack);

        assert_eq!(store.tickets.len(), 1);
        assert_eq!(store.tickets[0].id, "ticket-1");
        assert_eq!(store.pending[0].state, PendingState::RolledBack);
    }

    #[test]
    fn interleaved_creates_reconcile_independently() {
        let mut store = store_with_one_ticket();
        let first = store.insert_shadow(&payload("巡检排班"));
        let second = store.insert_shadow(&payload("井盖更换"));

        // second rolls back while first is still pending
        store.resolve_shadow(&second, PendingState::RolledBack);
        assert_eq!(store.tickets[0].id, first);
        assert_eq!(store.tickets.len(), 2);

        let server = OperationTicket {
            id: "ticket-9".to_string(),
            title: "巡检排班".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::Medium,
            owner: "李四".to_string(),
            updated_at: "2024-03-21T02:00:00Z".to_string(),
        };
        store.resolve_shadow(&first, PendingState::Confirmed(server));

        let ids: Vec<&str> = store.tickets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["ticket-9", "ticket-1"]);
    }
}
