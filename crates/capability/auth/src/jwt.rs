use crate::{AuthError, IssuedToken};
use domain::OperatorClaims;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

// 仅接受 access 类型的 token。
const ACCESS_TOKEN_TYPE: &str = "access";

#[derive(Debug, Serialize, Deserialize)]
/// JWT 内部 claims。
struct Claims {
    sub: i64,
    company_id: String,
    site_id: i64,
    site_external_id: String,
    exp: usize,
    token_type: String,
}

/// JWT 生成与校验。
pub struct JwtManager {
    secret: Vec<u8>,
    access_ttl_seconds: u64,
}

impl JwtManager {
    /// 创建 JWT 管理器。
    pub fn new(secret: String, access_ttl_seconds: u64) -> Self {
        Self {
            secret: secret.into_bytes(),
            access_ttl_seconds,
        }
    }

    /// 基于操作员身份签发 access token。
    pub fn issue_access_token(&self, claims: &OperatorClaims) -> Result<IssuedToken, AuthError> {
        let expires_at = now_epoch_seconds() + self.access_ttl_seconds;
        let access_token = self.encode(claims, expires_at, ACCESS_TOKEN_TYPE)?;
        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }

    /// 解析 access token。
    pub fn decode_access(&self, token: &str) -> Result<OperatorClaims, AuthError> {
        let decoded = self.decode_claims(token)?;
        if decoded.token_type != ACCESS_TOKEN_TYPE {
            return Err(AuthError::TokenInvalid);
        }
        if decoded.company_id.is_empty() {
            return Err(AuthError::TokenInvalid);
        }
        Ok(OperatorClaims::new(
            decoded.sub,
            decoded.company_id,
            decoded.site_id,
            decoded.site_external_id,
        ))
    }

    /// 内部编码逻辑。
    fn encode(
        &self,
        claims: &OperatorClaims,
        expires_at: u64,
        token_type: &str,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: claims.user_id,
            company_id: claims.company_id.clone(),
            site_id: claims.site_id,
            site_external_id: claims.site_external_id.clone(),
            exp: expires_at as usize,
            token_type: token_type.to_string(),
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|err| AuthError::Internal(err.to_string()))
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let decoded = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation,
        )
        .map_err(map_jwt_error)?;
        Ok(decoded.claims)
    }
}

/// 当前时间戳（秒）。
fn now_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// 将 jwt 库错误映射为业务错误。
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::TokenInvalid,
    }
}
