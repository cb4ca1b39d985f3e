// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetric {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub trend: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAlert {
    pub id: String,
    pub title: String,
    pub severity: AlertSeverity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub metrics: Vec<DashboardMetric>,
    pub alerts: Vec<DashboardAlert>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationTicket {
    pub id: String,
    pub title: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub owner: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketList {
    pub tickets: Vec<OperationTicket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTicketPayload {
    pub title: String,
    pub priority: TicketPriority,
    pub owner: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    Polygon,
    Line,
    Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoningLayer {
    pub id: String,
    pub name: String,
    pub description: String,
    pub geometry_type: GeometryType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoningLayers {
    pub layers: Vec<ZoningLayer>,
}

/// AS-system sales opportunity. The backend row carries several dozen
/// optional CRM columns; the ones the dashboard renders are typed and the
/// rest ride along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsOpportunity {
    pub id: i64,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// IPG-system client record, same shape discipline as [`AsOpportunity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpgClient {
    pub id: i64,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_num: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reseller_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnterpriseQd {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub record_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunitySearchSummary {
    pub as_count: u64,
    pub ipg_count: u64,
    pub qd_count: u64,
    pub work_order_count: u64,
    pub total_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunitySearchData {
    pub as_opportunities: Vec<AsOpportunity>,
    pub ipg_clients: Vec<IpgClient>,
    pub qd_enterprises: Vec<EnterpriseQd>,
    pub work_orders: Vec<WorkOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunitiesSearchResponse {
    pub success: bool,
    pub company_name: String,
    pub summary: OpportunitySearchSummary,
    pub data: OpportunitySearchData,
}

/// `{success, count, data}` wrapper used by the per-source search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub count: u64,
    pub data: T,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsStatistics {
    pub total_count: u64,
    pub unique_customers: u64,
    pub unique_partners: u64,
    pub unique_areas: u64,
    pub total_budget: f64,
    pub avg_budget: f64,
    #[serde(default)]
    pub status_distribution: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpgStatistics {
    pub total_count: u64,
    pub unique_clients: u64,
    pub unique_resellers: u64,
    pub unique_provinces: u64,
    pub total_agent_num: u64,
    pub avg_agent_num: f64,
    #[serde(default)]
    pub status_distribution: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedStatisticsData {
    #[serde(rename = "as")]
    pub as_system: AsStatistics,
    pub ipg: IpgStatistics,
    pub total_opportunities: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedStatistics {
    pub success: bool,
    pub data: CombinedStatisticsData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRequest {
    pub input_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetails {
    pub name: String,
    pub region: String,
    pub address: String,
    pub industry: String,
    pub industry_brain: String,
    pub chain_status: String,
    pub revenue_info: String,
    pub company_status: String,
    pub data_source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsInfo {
    pub summary: String,
    pub references: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub status: String,
    pub message: String,
    pub company_name: String,
    pub details: CompanyDetails,
    pub structured_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_search_info: Option<NewsInfo>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    pub role: String,
    pub role_label: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Success,
    Warning,
    Error,
    #[default]
    Info,
}

/// One message on the server-push notification channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ToastVariant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_round_trips_with_camel_case_keys() {
        let json = r#"{
            "id": "ticket-1",
            "title": "智慧路灯离线排查",
            "status": "in_progress",
            "priority": "high",
            "owner": "张三",
            "updatedAt": "2024-03-20T08:00:00Z"
        }"#;
        let ticket: OperationTicket = serde_json::from_str(json).expect("parse ticket");
        assert_eq!(ticket.status, TicketStatus::InProgress);
        let out = serde_json::to_value(&ticket).expect("serialize ticket");
        assert_eq!(out["updatedAt"], "2024-03-20T08:00:00Z");
        assert_eq!(out["status"], "in_progress");
    }

    #[test]
    fn as_opportunity_keeps_unknown_columns_in_extra() {
        let json = r#"{"id": 7, "customer_name": "青岛数科", "mobile": "130", "statename": "跟进中"}"#;
        let row: AsOpportunity = serde_json::from_str(json).expect("parse row");
        assert_eq!(row.customer_name, "青岛数科");
        assert_eq!(row.extra["statename"], "跟进中");
    }

    #[test]
    fn combined_statistics_maps_the_as_keyword_field() {
        let json = r#"{
            "success": true,
            "data": {
                "as": {"total_count": 3, "unique_customers": 2, "unique_partners": 1,
                       "unique_areas": 1, "total_budget": 10.0, "avg_budget": 5.0,
                       "status_distribution": {"open": 3}},
                "ipg": {"total_count": 1, "unique_clients": 1, "unique_resellers": 1,
                        "unique_provinces": 1, "total_agent_num": 4, "avg_agent_num": 4.0},
                "total_opportunities": 4
            }
        }"#;
        let stats: CombinedStatistics = serde_json::from_str(json).expect("parse stats");
        assert_eq!(stats.data.as_system.total_count, 3);
        assert_eq!(stats.data.total_opportunities, 4);
    }

    #[test]
    fn notification_variant_defaults_to_none_not_error() {
        let n: Notification =
            serde_json::from_str(r#"{"id": "n-1", "title": "告警", "message": "内涝点位超阈值"}"#)
                .expect("parse notification");
        assert_eq!(n.variant, None);
        assert_eq!(n.variant.unwrap_or_default(), ToastVariant::Info);
    }
}
