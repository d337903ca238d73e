use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/tools", get(handlers::list_tools).post(handlers::create_tool))
        .route("/api/tools/:tool_id/shots", get(handlers::tool_shots))
        .route("/api/tools/:tool_id/projection", get(handlers::tool_projection))
        .route(
            "/api/shot-counters",
            get(handlers::list_shot_counters).post(handlers::create_shot_counter),
        )
        .route(
            "/api/maintenance-logs",
            get(handlers::list_maintenance_logs).post(handlers::create_maintenance_log),
        )
        .route(
            "/api/failure-codes",
            get(handlers::list_failure_codes).post(handlers::create_failure_code),
        )
        .route(
            "/api/failure-reports",
            get(handlers::list_failure_reports).post(handlers::create_failure_report),
        )
        .route(
            "/api/action-items",
            get(handlers::list_action_items).post(handlers::create_action_item),
        )
        .with_state(state)
}
