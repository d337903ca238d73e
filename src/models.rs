use crate::shots::{HistoryPoint, LimitStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    #[default]
    Active,
    Maintenance,
    Retired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShotSource {
    #[default]
    Manual,
    Imported,
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Open,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub asset_number: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub cavity_count: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: ToolStatus,
    #[serde(default)]
    pub initial_shot_count: u64,
    #[serde(default)]
    pub max_shot_count: Option<u64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotCounterEntry {
    pub id: String,
    pub tool_id: String,
    pub shot_count: u64,
    #[serde(default)]
    pub source: ShotSource,
    #[serde(default)]
    pub recorded_by: Option<String>,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceLog {
    pub id: String,
    pub tool_id: String,
    pub performed_by: String,
    #[serde(default)]
    pub performed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub follow_up_required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureCode {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub severity_default: Severity,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureReport {
    pub id: String,
    pub tool_id: String,
    pub reported_by: String,
    #[serde(default)]
    pub failure_code_id: Option<String>,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub containment_action: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: String,
    pub tool_id: String,
    #[serde(default)]
    pub failure_report_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub assigned_to: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ActionStatus,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// The full working set, replaced wholesale on each load from disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkingSet {
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub shot_counters: Vec<ShotCounterEntry>,
    #[serde(default)]
    pub maintenance_logs: Vec<MaintenanceLog>,
    #[serde(default)]
    pub failure_codes: Vec<FailureCode>,
    #[serde(default)]
    pub failure_reports: Vec<FailureReport>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

impl WorkingSet {
    pub fn tool(&self, tool_id: &str) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.id == tool_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateToolRequest {
    pub asset_number: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub cavity_count: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: ToolStatus,
    #[serde(default)]
    pub initial_shot_count: u64,
    #[serde(default)]
    pub max_shot_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateShotCounterRequest {
    pub tool_id: String,
    pub shot_count: u64,
    #[serde(default)]
    pub source: ShotSource,
    #[serde(default)]
    pub recorded_by: Option<String>,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMaintenanceLogRequest {
    pub tool_id: String,
    pub performed_by: String,
    #[serde(default)]
    pub performed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub follow_up_required: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateFailureCodeRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub severity_default: Severity,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateFailureReportRequest {
    pub tool_id: String,
    pub reported_by: String,
    #[serde(default)]
    pub failure_code_id: Option<String>,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub containment_action: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShotSummaryResponse {
    pub tool_id: String,
    pub current_total: u64,
    pub limit: LimitStatus,
    pub history: Vec<HistoryPoint>,
}

#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub tool_id: String,
    pub current_total: u64,
    pub pending_increment: u64,
    pub projected_total: u64,
    pub limit: LimitStatus,
}

#[derive(Debug, Deserialize)]
pub struct ProjectionQuery {
    pub increment: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateActionItemRequest {
    pub tool_id: String,
    #[serde(default)]
    pub failure_report_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub assigned_to: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ActionStatus,
}
