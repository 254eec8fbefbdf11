//! 门禁密码 HTTP API。
//!
//! - `routes`：路由表（同时挂载在 `/` 与 `/api`）
//! - `handlers`：门禁密码修改、审计查询、指标、健康检查
//! - `middleware`：request_id/trace_id 注入与 Bearer token 解析
//! - `utils`：错误响应与 DTO 转换

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod utils;

use axum::Router;
use gate_access::AccessCodeEditService;
use gate_auth::Authenticator;
use gate_storage::AuditLogStore;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// 应用状态：所有 handler 共享。
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn Authenticator>,
    pub edit_service: Arc<AccessCodeEditService>,
    pub audit_log_store: Arc<dyn AuditLogStore>,
    /// 单次修改请求的处理期限，到期后取消剩余单元。
    pub edit_timeout: Duration,
}

/// 构建完整的应用路由（含追踪中间件）。
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_api_router())
        .nest("/api", routes::create_api_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::request_context))
}
