pub mod access_code;
pub mod unit;

pub use access_code::{AccessCodeState, GateAccessCode, UnknownAccessCodeState, ValidationMessage};
pub use unit::UnitRentalState;

/// 账户内部 ID。
pub type AccountId = i64;
/// 单元（出租仓位）内部 ID。
pub type UnitId = i64;
/// 站点内部 ID。
pub type SiteId = i64;

/// 操作员身份：每个请求由认证层产生，请求期间不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorClaims {
    pub user_id: i64,
    pub company_id: String,
    pub site_id: SiteId,
    pub site_external_id: String,
}

impl OperatorClaims {
    /// 构造显式身份与站点范围的操作员上下文。
    pub fn new(
        user_id: i64,
        company_id: impl Into<String>,
        site_id: SiteId,
        site_external_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            company_id: company_id.into(),
            site_id,
            site_external_id: site_external_id.into(),
        }
    }

    /// 当前站点的字符串形式（与账户站点关联集合比较时使用）。
    pub fn site_key(&self) -> String {
        self.site_id.to_string()
    }
}
