//! 数据模型
//!
//! 定义存储相关的数据结构：
//! - 账户模型：AccountRecord（公司 + 站点关联）
//! - 单元模型：UnitRecord（所属站点 + 出租状态）
//! - 审计模型：AuditLogRecord
//!
//! 门禁密码行直接使用 `domain::GateAccessCode`。

use domain::{AccountId, SiteId, UnitId, UnitRentalState};

/// 账户记录（被修改门禁密码的人）。
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub account_id: AccountId,
    pub company_id: String,
    /// 关联站点（字符串形式的站点标识）。
    pub site_ids: Vec<String>,
}

impl AccountRecord {
    /// 账户是否关联指定站点。
    pub fn has_site(&self, site_key: &str) -> bool {
        self.site_ids.iter().any(|site| site == site_key)
    }
}

/// 单元记录。
#[derive(Debug, Clone)]
pub struct UnitRecord {
    pub unit_id: UnitId,
    pub site_id: SiteId,
    pub rental_state: UnitRentalState,
}

/// 审计日志记录。
#[derive(Debug, Clone)]
pub struct AuditLogRecord {
    pub audit_id: String,
    pub company_id: String,
    /// 站点外部标识。
    pub site_id: String,
    pub actor: String,
    pub action: String,
    pub resource: String,
    pub result: String,
    pub detail: Option<String>,
    pub ts_ms: i64,
}
