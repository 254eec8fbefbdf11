//! 存储接口 Trait 定义
//!
//! 定义门禁密码修改流程依赖的外部协作方：
//! - AccountStore：账户查询
//! - UnitStore：单元查询
//! - AccessCodeStore：门禁密码行读取与状态写入
//! - AuditLogStore：审计日志追加与查询
//! - AuditRecorder：按业务事件记录审计
//!
//! 设计原则：
//! - "不存在" 以 `Ok(None)` 表达，与基础设施错误区分
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{AccountRecord, AuditLogRecord, UnitRecord};
use async_trait::async_trait;
use domain::{AccountId, GateAccessCode, OperatorClaims, SiteId, UnitId};

/// 账户存储接口
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// 根据 ID 查找账户，不存在返回 `None`
    async fn find_account(
        &self,
        account_id: AccountId,
    ) -> Result<Option<AccountRecord>, StorageError>;
}

/// 单元存储接口
#[async_trait]
pub trait UnitStore: Send + Sync {
    /// 查找单元
    ///
    /// `site_id` 为调用方当前站点，站点归属由调用方校验。
    async fn find_unit(
        &self,
        unit_id: UnitId,
        site_id: SiteId,
    ) -> Result<Option<UnitRecord>, StorageError>;
}

/// 门禁密码存储接口
///
/// 行按 (site, unit, account, access_code) 唯一，写入即 upsert 状态，不删除。
#[async_trait]
pub trait AccessCodeStore: Send + Sync {
    /// 读取指定站点下若干单元的全部密码行
    async fn get_codes_for_units(
        &self,
        unit_ids: &[UnitId],
        site_id: SiteId,
    ) -> Result<Vec<GateAccessCode>, StorageError>;

    /// 写入密码行（插入或更新状态）
    async fn write_codes(
        &self,
        codes: &[GateAccessCode],
        site_id: SiteId,
    ) -> Result<(), StorageError>;

    /// 先写被替换的 remove 行，再写新的 setup 行
    ///
    /// 默认实现为两次独立写入；支持事务的实现应覆盖为单个事务。
    async fn replace_codes(
        &self,
        superseded: &[GateAccessCode],
        install: &GateAccessCode,
        site_id: SiteId,
    ) -> Result<(), StorageError> {
        if !superseded.is_empty() {
            self.write_codes(superseded, site_id).await?;
        }
        self.write_codes(std::slice::from_ref(install), site_id)
            .await
    }
}

/// 审计日志存储接口
#[async_trait]
pub trait AuditLogStore: Send + Sync {
    /// 追加审计日志
    async fn create_audit_log(&self, record: AuditLogRecord)
    -> Result<AuditLogRecord, StorageError>;

    /// 查询操作员当前公司 + 站点下的审计日志（按时间倒序）
    async fn list_audit_logs(
        &self,
        claims: &OperatorClaims,
        from_ms: Option<i64>,
        to_ms: Option<i64>,
        limit: i64,
    ) -> Result<Vec<AuditLogRecord>, StorageError>;
}

/// 业务审计记录接口
#[async_trait]
pub trait AuditRecorder: Send + Sync {
    /// 记录一次门禁密码修改，返回审计记录 ID
    async fn record_access_code_edit(
        &self,
        operator_id: i64,
        account: &AccountRecord,
        site_external_id: &str,
        ts_ms: i64,
    ) -> Result<String, StorageError>;
}
