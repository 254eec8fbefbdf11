//! 审计日志 handlers
//!
//! - GET /audit

use crate::AppState;
use crate::middleware::require_operator;
use crate::utils::response::{audit_log_to_dto, bad_request_error, storage_error};
use api_contract::{ApiResponse, AuditLogDto, AuditLogQuery};
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

/// 查询当前站点的审计日志
///
/// 查询参数:
///   - from: 可选，开始时间戳（毫秒）
///   - to: 可选，结束时间戳（毫秒）
///   - limit: 可选，返回数量限制（默认 100）
pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<AuditLogQuery>,
    headers: HeaderMap,
) -> Response {
    let claims = match require_operator(&state, &headers) {
        Ok(claims) => claims,
        Err(response) => return response,
    };
    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return bad_request_error("from must not be after to");
    }
    let limit = query.limit.unwrap_or(100).max(0);
    match state
        .audit_log_store
        .list_audit_logs(&claims, query.from, query.to, limit)
        .await
    {
        Ok(items) => {
            let data: Vec<AuditLogDto> = items.into_iter().map(audit_log_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}
