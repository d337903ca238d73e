use crate::errors::AppError;
use crate::models::{
    ActionItem, CreateActionItemRequest, CreateFailureCodeRequest, CreateFailureReportRequest,
    CreateMaintenanceLogRequest, CreateShotCounterRequest, CreateToolRequest, FailureCode,
    FailureReport, MaintenanceLog, ProjectionQuery, ProjectionResponse, ShotCounterEntry,
    ShotSummaryResponse, Tool,
};
use crate::shots;
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(render_index(state.policy, &data))
}

pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<Tool>> {
    let data = state.data.lock().await;
    Json(data.tools.clone())
}

pub async fn create_tool(
    State(state): State<AppState>,
    Json(payload): Json<CreateToolRequest>,
) -> Result<Json<Tool>, AppError> {
    let asset_number = payload.asset_number.trim().to_string();
    if asset_number.is_empty() {
        return Err(AppError::bad_request("asset_number must not be empty"));
    }

    let mut data = state.data.lock().await;
    if data.tools.iter().any(|tool| tool.asset_number == asset_number) {
        return Err(AppError::bad_request(format!(
            "asset_number {asset_number:?} already exists"
        )));
    }

    let tool = Tool {
        id: Uuid::new_v4().to_string(),
        asset_number,
        name: payload.name,
        manufacturer: payload.manufacturer,
        cavity_count: payload.cavity_count,
        location: payload.location,
        status: payload.status,
        initial_shot_count: payload.initial_shot_count,
        max_shot_count: payload.max_shot_count,
        created_at: Utc::now(),
    };
    data.tools.push(tool.clone());
    persist_data(&state.data_path, &data).await?;
    Ok(Json(tool))
}

pub async fn tool_shots(
    State(state): State<AppState>,
    Path(tool_id): Path<String>,
) -> Result<Json<ShotSummaryResponse>, AppError> {
    let data = state.data.lock().await;
    let tool = data
        .tool(&tool_id)
        .ok_or_else(|| AppError::not_found("Tool not found"))?;

    let current = shots::current_total(state.policy, tool, &data.shot_counters);
    Ok(Json(ShotSummaryResponse {
        tool_id,
        current_total: current,
        limit: shots::remaining_before_limit(tool, current),
        history: shots::history(state.policy, tool, &data.shot_counters),
    }))
}

pub async fn tool_projection(
    State(state): State<AppState>,
    Path(tool_id): Path<String>,
    Query(query): Query<ProjectionQuery>,
) -> Result<Json<ProjectionResponse>, AppError> {
    if query.increment < 0 {
        return Err(AppError::bad_request("increment must be a non-negative number"));
    }
    let pending = query.increment as u64;

    let data = state.data.lock().await;
    let tool = data
        .tool(&tool_id)
        .ok_or_else(|| AppError::not_found("Tool not found"))?;

    let current = shots::current_total(state.policy, tool, &data.shot_counters);
    let projected = shots::projected_total(state.policy, tool, &data.shot_counters, pending);
    Ok(Json(ProjectionResponse {
        tool_id,
        current_total: current,
        pending_increment: pending,
        projected_total: projected,
        limit: shots::remaining_before_limit(tool, projected),
    }))
}

pub async fn list_shot_counters(State(state): State<AppState>) -> Json<Vec<ShotCounterEntry>> {
    let data = state.data.lock().await;
    Json(data.shot_counters.clone())
}

pub async fn create_shot_counter(
    State(state): State<AppState>,
    Json(payload): Json<CreateShotCounterRequest>,
) -> Result<Json<ShotCounterEntry>, AppError> {
    let mut data = state.data.lock().await;
    if data.tool(&payload.tool_id).is_none() {
        return Err(AppError::not_found("Tool not found"));
    }

    let entry = ShotCounterEntry {
        id: Uuid::new_v4().to_string(),
        tool_id: payload.tool_id,
        shot_count: payload.shot_count,
        source: payload.source,
        recorded_by: payload.recorded_by,
        recorded_at: Some(payload.recorded_at.unwrap_or_else(Utc::now)),
    };
    data.shot_counters.push(entry.clone());
    persist_data(&state.data_path, &data).await?;
    Ok(Json(entry))
}

pub async fn list_maintenance_logs(State(state): State<AppState>) -> Json<Vec<MaintenanceLog>> {
    let data = state.data.lock().await;
    Json(data.maintenance_logs.clone())
}

pub async fn create_maintenance_log(
    State(state): State<AppState>,
    Json(payload): Json<CreateMaintenanceLogRequest>,
) -> Result<Json<MaintenanceLog>, AppError> {
    let mut data = state.data.lock().await;
    if data.tool(&payload.tool_id).is_none() {
        return Err(AppError::not_found("Tool not found"));
    }

    let log = MaintenanceLog {
        id: Uuid::new_v4().to_string(),
        tool_id: payload.tool_id,
        performed_by: payload.performed_by,
        performed_at: Some(payload.performed_at.unwrap_or_else(Utc::now)),
        duration_minutes: payload.duration_minutes,
        observations: payload.observations,
        follow_up_required: payload.follow_up_required,
    };
    data.maintenance_logs.push(log.clone());
    persist_data(&state.data_path, &data).await?;
    Ok(Json(log))
}

pub async fn list_failure_codes(State(state): State<AppState>) -> Json<Vec<FailureCode>> {
    let data = state.data.lock().await;
    Json(data.failure_codes.clone())
}

pub async fn create_failure_code(
    State(state): State<AppState>,
    Json(payload): Json<CreateFailureCodeRequest>,
) -> Result<Json<FailureCode>, AppError> {
    let code = payload.code.trim().to_string();
    if code.is_empty() {
        return Err(AppError::bad_request("code must not be empty"));
    }

    let mut data = state.data.lock().await;
    if data.failure_codes.iter().any(|existing| existing.code == code) {
        return Err(AppError::bad_request(format!("code {code:?} already exists")));
    }

    let failure_code = FailureCode {
        id: Uuid::new_v4().to_string(),
        code,
        name: payload.name,
        description: payload.description,
        severity_default: payload.severity_default,
        active: payload.active,
    };
    data.failure_codes.push(failure_code.clone());
    persist_data(&state.data_path, &data).await?;
    Ok(Json(failure_code))
}

pub async fn list_failure_reports(State(state): State<AppState>) -> Json<Vec<FailureReport>> {
    let data = state.data.lock().await;
    Json(data.failure_reports.clone())
}

pub async fn create_failure_report(
    State(state): State<AppState>,
    Json(payload): Json<CreateFailureReportRequest>,
) -> Result<Json<FailureReport>, AppError> {
    let mut data = state.data.lock().await;
    if data.tool(&payload.tool_id).is_none() {
        return Err(AppError::not_found("Tool not found"));
    }
    if let Some(code_id) = &payload.failure_code_id {
        if !data.failure_codes.iter().any(|code| &code.id == code_id) {
            return Err(AppError::not_found("Failure code not found"));
        }
    }

    let report = FailureReport {
        id: Uuid::new_v4().to_string(),
        tool_id: payload.tool_id,
        reported_by: payload.reported_by,
        failure_code_id: payload.failure_code_id,
        severity: payload.severity,
        description: payload.description,
        occurred_at: Some(payload.occurred_at.unwrap_or_else(Utc::now)),
        containment_action: payload.containment_action,
    };
    data.failure_reports.push(report.clone());
    persist_data(&state.data_path, &data).await?;
    Ok(Json(report))
}

pub async fn list_action_items(State(state): State<AppState>) -> Json<Vec<ActionItem>> {
    let data = state.data.lock().await;
    Json(data.action_items.clone())
}

pub async fn create_action_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateActionItemRequest>,
) -> Result<Json<ActionItem>, AppError> {
    let mut data = state.data.lock().await;
    if data.tool(&payload.tool_id).is_none() {
        return Err(AppError::not_found("Tool not found"));
    }
    if let Some(report_id) = &payload.failure_report_id {
        if !data.failure_reports.iter().any(|report| &report.id == report_id) {
            return Err(AppError::not_found("Failure report not found"));
        }
    }

    let item = ActionItem {
        id: Uuid::new_v4().to_string(),
        tool_id: payload.tool_id,
        failure_report_id: payload.failure_report_id,
        title: payload.title,
        description: payload.description,
        assigned_to: payload.assigned_to,
        due_date: payload.due_date,
        status: payload.status,
        completed_at: None,
    };
    data.action_items.push(item.clone());
    persist_data(&state.data_path, &data).await?;
    Ok(Json(item))
}
