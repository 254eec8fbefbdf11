//! 审计记录实现
//!
//! 将 "门禁密码修改" 业务事件转换为审计日志并写入 AuditLogStore。

use crate::error::StorageError;
use crate::models::{AccountRecord, AuditLogRecord};
use crate::traits::{AuditLogStore, AuditRecorder};
use std::sync::Arc;

pub const ACTION_ACCESS_CODE_EDIT: &str = "ACCESS_CODE.EDIT";
const RESULT_SUCCESS: &str = "success";

/// 基于 AuditLogStore 的审计记录器。
pub struct StoreAuditRecorder {
    store: Arc<dyn AuditLogStore>,
}

impl StoreAuditRecorder {
    pub fn new(store: Arc<dyn AuditLogStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AuditRecorder for StoreAuditRecorder {
    async fn record_access_code_edit(
        &self,
        operator_id: i64,
        account: &AccountRecord,
        site_external_id: &str,
        ts_ms: i64,
    ) -> Result<String, StorageError> {
        let record = AuditLogRecord {
            audit_id: uuid::Uuid::new_v4().to_string(),
            company_id: account.company_id.clone(),
            site_id: site_external_id.to_string(),
            actor: operator_id.to_string(),
            action: ACTION_ACCESS_CODE_EDIT.to_string(),
            resource: format!("account:{}", account.account_id),
            result: RESULT_SUCCESS.to_string(),
            detail: None,
            ts_ms,
        };
        let stored = self.store.create_audit_log(record).await?;
        Ok(stored.audit_id)
    }
}
