//! 路由定义
//!
//! - 健康检查：/health
//! - 门禁密码修改：/access-codes/edit
//! - 审计日志：/audit
//! - 指标快照：/metrics

use crate::AppState;
use crate::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

/// 创建 API 路由
///
/// 由 `build_app` 同时挂载在 / 与 /api/ 两种前缀下
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/access-codes/edit", post(edit_access_codes))
        .route("/audit", get(list_audit_logs))
        .route("/metrics", get(get_metrics))
}
