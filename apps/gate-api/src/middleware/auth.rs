//! 认证中间件
//!
//! - request_context：请求上下文中间件，注入 request_id/trace_id
//! - bearer_token：从 Authorization 头提取 Bearer token
//! - operator_claims：校验 token，缺失或无效时返回 `None`
//! - require_operator：必须携带有效 token

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};
use domain::OperatorClaims;
use gate_auth::AuthError;
use gate_telemetry::new_request_ids;
use tracing::{Instrument, info_span};

use crate::AppState;
use crate::utils::response::{auth_error, internal_auth_error};

/// 请求上下文中间件：注入 request_id/trace_id
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ids.clone());

    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let mut response = next.run(req).instrument(span).await;
    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&ids.request_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response.headers_mut().insert(
        "x-trace-id",
        HeaderValue::from_str(&ids.trace_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response
}

/// 从请求头中提取 Bearer token
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header_value = headers.get(header::AUTHORIZATION)?;
    let auth_str = header_value.to_str().ok()?;
    auth_str.strip_prefix("Bearer ")
}

/// 解析操作员身份；token 缺失、过期或无效时为 `None`。
pub fn operator_claims(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<OperatorClaims>, Response> {
    let Some(token) = bearer_token(headers) else {
        return Ok(None);
    };
    match state.auth.verify_access_token(token) {
        Ok(claims) => Ok(Some(claims)),
        Err(AuthError::TokenInvalid | AuthError::TokenExpired) => Ok(None),
        Err(err) => Err(internal_auth_error(err)),
    }
}

/// 必须携带有效 token
pub fn require_operator(state: &AppState, headers: &HeaderMap) -> Result<OperatorClaims, Response> {
    match operator_claims(state, headers)? {
        Some(claims) => Ok(claims),
        None => Err(auth_error(StatusCode::UNAUTHORIZED)),
    }
}
