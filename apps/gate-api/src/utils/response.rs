//! HTTP 响应辅助函数和 DTO 转换
//!
//! - 错误响应：auth_error, bad_request_error, internal_auth_error, storage_error, edit_error
//! - DTO 转换：audit_log_to_dto
//!
//! 所有错误返回统一的 ApiResponse 格式，HTTP 状态码与错误码一一对应。

use api_contract::{ApiResponse, AuditLogDto, error_code};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gate_access::EditError;
use gate_auth::AuthError;
use gate_storage::{AuditLogRecord, StorageError};

fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::error(code, message.into()))).into_response()
}

/// 认证错误响应
pub fn auth_error(status: StatusCode) -> Response {
    error_response(status, error_code::UNAUTHORIZED, "unauthorized")
}

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    error_response(StatusCode::BAD_REQUEST, error_code::INVALID_REQUEST, message)
}

/// 认证内部错误响应
pub fn internal_auth_error(err: AuthError) -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_code::INTERNAL,
        err.to_string(),
    )
}

/// 存储错误响应
pub fn storage_error(err: StorageError) -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_code::INTERNAL,
        err.to_string(),
    )
}

/// 门禁密码修改错误 → 状态码 + 错误码
pub fn edit_error_status(err: &EditError) -> (StatusCode, &'static str) {
    match err {
        EditError::Unauthorized => (StatusCode::UNAUTHORIZED, error_code::UNAUTHORIZED),
        EditError::BadRequest(_) => (StatusCode::BAD_REQUEST, error_code::INVALID_REQUEST),
        EditError::NotFound(_) => (StatusCode::NOT_FOUND, error_code::NOT_FOUND),
        EditError::Forbidden(_) => (StatusCode::FORBIDDEN, error_code::FORBIDDEN),
        EditError::Conflict(_) => (StatusCode::CONFLICT, error_code::CONFLICT),
        EditError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, error_code::INTERNAL),
        EditError::Cancelled => (StatusCode::REQUEST_TIMEOUT, error_code::CANCELLED),
    }
}

/// 门禁密码修改错误响应
pub fn edit_error(err: EditError) -> Response {
    let (status, code) = edit_error_status(&err);
    error_response(status, code, err.to_string())
}

/// AuditLogRecord 转 AuditLogDto
pub fn audit_log_to_dto(record: AuditLogRecord) -> AuditLogDto {
    AuditLogDto {
        audit_id: record.audit_id,
        site_id: record.site_id,
        actor: record.actor,
        action: record.action,
        resource: record.resource,
        result: record.result,
        detail: record.detail,
        ts_ms: record.ts_ms,
    }
}
