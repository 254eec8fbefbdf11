//! 稳定的 DTO 与 API 响应契约。

use serde::{Deserialize, Serialize};

/// 错误码（与 HTTP 状态一一对应）。
pub mod error_code {
    pub const UNAUTHORIZED: &str = "AUTH.UNAUTHORIZED";
    pub const FORBIDDEN: &str = "AUTH.FORBIDDEN";
    pub const INVALID_REQUEST: &str = "INVALID.REQUEST";
    pub const NOT_FOUND: &str = "RESOURCE.NOT_FOUND";
    pub const CONFLICT: &str = "RESOURCE.CONFLICT";
    pub const CANCELLED: &str = "REQUEST.CANCELLED";
    pub const INTERNAL: &str = "INTERNAL.ERROR";
}

/// 标准 API 响应封装。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 门禁密码修改请求体。
///
/// 兼容旧字段名：`userId`、`userUuid`、`unitID`、`unitUUIDs`。
/// 外部标识为数字字符串，由服务端统一解析为内部 ID。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCodeEditRequest {
    #[serde(default, alias = "userId")]
    pub account_id: Option<i64>,
    #[serde(default, alias = "userUuid")]
    pub account_external_id: Option<String>,
    #[serde(default, alias = "unitID")]
    pub unit_ids: Vec<i64>,
    #[serde(default, alias = "unitUUIDs")]
    pub unit_external_ids: Vec<String>,
    pub access_code: String,
}

/// 审计日志查询参数。
#[derive(Debug, Deserialize)]
pub struct AuditLogQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub limit: Option<i64>,
}

/// 审计日志返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogDto {
    pub audit_id: String,
    pub site_id: String,
    pub actor: String,
    pub action: String,
    pub resource: String,
    pub result: String,
    pub detail: Option<String>,
    pub ts_ms: i64,
}

/// 指标快照返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub edits_requested: u64,
    pub edits_succeeded: u64,
    pub edits_failed: u64,
    pub units_applied: u64,
    pub units_unchanged: u64,
    pub codes_superseded: u64,
    pub revoke_failures: u64,
    pub set_failures: u64,
    pub edit_latency_ms_total: u64,
    pub edit_latency_ms_count: u64,
}
