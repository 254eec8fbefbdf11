//! 门禁密码修改 handler
//!
//! - POST /access-codes/edit

use crate::AppState;
use crate::middleware::operator_claims;
use crate::utils::response::edit_error;
use api_contract::AccessCodeEditRequest;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use gate_access::{EditCommand, EditError};
use tokio_util::sync::CancellationToken;

/// 修改账户在若干单元上的门禁密码
///
/// 成功返回 200 空响应体；失败返回统一错误封装。
/// 超过 `edit_timeout` 后取消，已完成的单元保持提交。
pub async fn edit_access_codes(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AccessCodeEditRequest>, JsonRejection>,
) -> Response {
    let claims = match operator_claims(&state, &headers) {
        Ok(claims) => claims,
        Err(response) => return response,
    };
    if claims.is_none() {
        return edit_error(EditError::Unauthorized);
    }
    let command = match payload {
        Ok(Json(request)) => EditCommand::try_from(request),
        Err(rejection) => Err(EditError::BadRequest(rejection.body_text())),
    };
    let command = match command {
        Ok(command) => command,
        Err(err) => return edit_error(err),
    };

    let cancel = CancellationToken::new();
    let deadline = cancel.clone();
    let timeout = state.edit_timeout;
    let timer = tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        deadline.cancel();
    });
    let result = state
        .edit_service
        .edit(claims.as_ref(), &command, &cancel)
        .await;
    timer.abort();

    match result {
        Ok(_) => StatusCode::OK.into_response(),
        Err(err) => edit_error(err),
    }
}
