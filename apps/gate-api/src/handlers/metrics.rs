//! 门禁密码修改指标快照。
//!
//! - GET /metrics

use api_contract::{ApiResponse, MetricsSnapshotDto};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use gate_telemetry::metrics;

use crate::{AppState, middleware::require_operator};

pub async fn get_metrics(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = require_operator(&state, &headers) {
        return response;
    }

    let snapshot = metrics().snapshot();
    (
        StatusCode::OK,
        Json(ApiResponse::success(MetricsSnapshotDto {
            edits_requested: snapshot.edits_requested,
            edits_succeeded: snapshot.edits_succeeded,
            edits_failed: snapshot.edits_failed,
            units_applied: snapshot.units_applied,
            units_unchanged: snapshot.units_unchanged,
            codes_superseded: snapshot.codes_superseded,
            revoke_failures: snapshot.revoke_failures,
            set_failures: snapshot.set_failures,
            edit_latency_ms_total: snapshot.edit_latency_ms_total,
            edit_latency_ms_count: snapshot.edit_latency_ms_count,
        })),
    )
        .into_response()
}
