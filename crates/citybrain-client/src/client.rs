// SPDX-License-Identifier: Apache-2.0

use citybrain_api::{
    ApiFailure, AsOpportunity, AsStatistics, CombinedStatistics, CompanyRequest, CompanyResponse,
    CreateTicketPayload, DashboardSnapshot, ErrorEnvelope, IpgClient, IpgStatistics,
    OperationTicket, OpportunitiesSearchResponse, SourcedResponse, TicketList, ZoningLayers,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::RwLock;
use std::time::Duration;

/// Dashboard default: requests go through the local gateway, which owns the
/// prefix rewrite toward the backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:9002/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Typed client for the backend REST surface consumed by the dashboard.
///
/// Bearer attachment mirrors the deployed system: the token is the locally
/// stored identity id, attached when present. The backend does not enforce
/// it; it is kept as observable behavior only.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiFailure> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ApiFailure::transport(format!("client init failed: {err}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: RwLock::new(None),
        })
    }

    pub fn set_bearer_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.bearer_token.write() {
            *slot = token;
        }
    }

    fn bearer_header(&self) -> Option<HeaderValue> {
        let token = self.bearer_token.read().ok()?.clone()?;
        HeaderValue::from_str(&format!("Bearer {token}")).ok()
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiFailure> {
        let mut request = self.http.get(format!("{}{path}", self.base_url));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(value) = self.bearer_header() {
            request = request.header(AUTHORIZATION, value);
        }
        let response = request.send().await.map_err(transport)?;
        decode(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiFailure> {
        let mut request = self.http.post(format!("{}{path}", self.base_url)).json(body);
        if let Some(value) = self.bearer_header() {
            request = request.header(AUTHORIZATION, value);
        }
        let response = request.send().await.map_err(transport)?;
        decode(response).await
    }

    pub async fn dashboard_snapshot(
        &self,
        filters: &[(String, String)],
    ) -> Result<DashboardSnapshot, ApiFailure> {
        self.get("/v1/dashboard/snapshot", filters).await
    }

    pub async fn operation_tickets(
        &self,
        filters: &[(String, String)],
    ) -> Result<TicketList, ApiFailure> {
        self.get("/v1/operations/tickets", filters).await
    }

    pub async fn create_operation_ticket(
        &self,
        payload: &CreateTicketPayload,
    ) -> Result<OperationTicket, ApiFailure> {
        self.post("/v1/operations/tickets", payload).await
    }

    pub async fn zoning_layers(&self) -> Result<ZoningLayers, ApiFailure> {
        self.get("/v1/zoning/layers", &[]).await
    }

    pub async fn search_opportunities(
        &self,
        company_name: &str,
        limit_per_source: u32,
    ) -> Result<OpportunitiesSearchResponse, ApiFailure> {
        let query = [
            ("company_name".to_string(), company_name.to_string()),
            (
                "limit_per_source".to_string(),
                limit_per_source.to_string(),
            ),
        ];
        self.get("/v1/opportunities/search", &query).await
    }

    pub async fn opportunity_statistics(&self) -> Result<CombinedStatistics, ApiFailure> {
        self.get("/v1/opportunities/statistics", &[]).await
    }

    pub async fn as_search(
        &self,
        params: &AsSearchParams,
    ) -> Result<SourcedResponse<Vec<AsOpportunity>>, ApiFailure> {
        self.get("/v1/opportunities/as/search", &params.as_query())
            .await
    }

    pub async fn as_statistics(&self) -> Result<SourcedResponse<AsStatistics>, ApiFailure> {
        self.get("/v1/opportunities/as/statistics", &[]).await
    }

    pub async fn ipg_search(
        &self,
        params: &IpgSearchParams,
    ) -> Result<SourcedResponse<Vec<IpgClient>>, ApiFailure> {
        self.get("/v1/opportunities/ipg/search", &params.as_query())
            .await
    }

    pub async fn ipg_statistics(&self) -> Result<SourcedResponse<IpgStatistics>, ApiFailure> {
        self.get("/v1/opportunities/ipg/statistics", &[]).await
    }

    pub async fn opportunities_health(&self) -> Result<serde_json::Value, ApiFailure> {
        self.get("/v1/opportunities/health", &[]).await
    }

    pub async fn process_company(&self, input_text: &str) -> Result<CompanyResponse, ApiFailure> {
        let request = CompanyRequest {
            input_text: input_text.to_string(),
        };
        self.post("/v1/company/process", &request).await
    }
}

/// AS-system search filters; unset fields are omitted from the query string.
#[derive(Debug, Clone, Default)]
pub struct AsSearchParams {
    pub customer_name: Option<String>,
    pub keyword: Option<String>,
    pub partner: Option<String>,
    pub area: Option<String>,
    pub limit: Option<u32>,
}

impl AsSearchParams {
    #[must_use]
    pub fn as_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push_opt(&mut query, "customer_name", self.customer_name.as_deref());
        push_opt(&mut query, "keyword", self.keyword.as_deref());
        push_opt(&mut query, "partner", self.partner.as_deref());
        push_opt(&mut query, "area", self.area.as_deref());
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Default)]
pub struct IpgSearchParams {
    pub client_name: Option<String>,
    pub keyword: Option<String>,
    pub reseller: Option<String>,
    pub province: Option<String>,
    pub limit: Option<u32>,
}

impl IpgSearchParams {
    #[must_use]
    pub fn as_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push_opt(&mut query, "client_name", self.client_name.as_deref());
        push_opt(&mut query, "keyword", self.keyword.as_deref());
        push_opt(&mut query, "reseller", self.reseller.as_deref());
        push_opt(&mut query, "province", self.province.as_deref());
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        query
    }
}

fn push_opt(query: &mut Vec<(String, String)>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        query.push((name.to_string(), value.to_string()));
    }
}

fn transport(err: reqwest::Error) -> ApiFailure {
    ApiFailure::transport(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiFailure> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(transport)?;
    if status.is_success() {
        serde_json::from_slice(&bytes)
            .map_err(|err| ApiFailure::transport(format!("malformed response body: {err}")))
    } else {
        let detail = serde_json::from_slice::<ErrorEnvelope>(&bytes)
            .map(|envelope| envelope.detail)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(ApiFailure::backend(status.as_u16(), detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_its_trailing_slash() {
        let client = ApiClient::new("http://127.0.0.1:9002/api/").expect("client");
        assert_eq!(client.base_url, "http://127.0.0.1:9002/api");
    }

    #[test]
    fn search_params_skip_unset_fields() {
        let params = AsSearchParams {
            customer_name: Some("青岛数科".to_string()),
            limit: Some(20),
            ..AsSearchParams::default()
        };
        assert_eq!(
            params.as_query(),
            vec![
                ("customer_name".to_string(), "青岛数科".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
    }
}
