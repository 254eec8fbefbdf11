//! 认证能力：access token 签发与校验，产出操作员身份。

mod jwt;

use domain::OperatorClaims;

pub use jwt::JwtManager;

/// 认证相关错误。
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token expired")]
    TokenExpired,
    #[error("token invalid")]
    TokenInvalid,
    #[error("internal error: {0}")]
    Internal(String),
}

/// 签发的 access token。
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: u64,
}

/// 认证服务实现（基于 JWT）。
pub struct AuthService {
    jwt: JwtManager,
}

impl AuthService {
    /// 创建认证服务实例。
    pub fn new(jwt: JwtManager) -> Self {
        Self { jwt }
    }

    /// 为操作员签发 access token（运维工具与测试使用）。
    pub fn issue_access_token(&self, claims: &OperatorClaims) -> Result<IssuedToken, AuthError> {
        self.jwt.issue_access_token(claims)
    }

    /// 校验 access token 并提取操作员身份。
    pub fn verify_access_token(&self, token: &str) -> Result<OperatorClaims, AuthError> {
        self.jwt.decode_access(token)
    }
}

/// 认证能力 trait，便于替换实现与测试。
pub trait Authenticator: Send + Sync {
    fn verify_access_token(&self, token: &str) -> Result<OperatorClaims, AuthError>;
}

impl Authenticator for AuthService {
    fn verify_access_token(&self, token: &str) -> Result<OperatorClaims, AuthError> {
        self.verify_access_token(token)
    }
}
