use std::future::Future;
use tokio_util::sync::CancellationToken;

/// 门禁密码修改错误，每个变体对应一类 HTTP 状态。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
    #[error("request cancelled")]
    Cancelled,
}

impl EditError {
    /// 错误类别名（日志字段）。
    pub fn kind(&self) -> &'static str {
        match self {
            EditError::Unauthorized => "unauthorized",
            EditError::BadRequest(_) => "bad_request",
            EditError::NotFound(_) => "not_found",
            EditError::Forbidden(_) => "forbidden",
            EditError::Conflict(_) => "conflict",
            EditError::Internal(_) => "internal",
            EditError::Cancelled => "cancelled",
        }
    }
}

/// 与取消信号竞争执行；取消优先。
pub(crate) async fn until_cancelled<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, EditError>
where
    F: Future<Output = Result<T, EditError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(EditError::Cancelled),
        result = fut => result,
    }
}
