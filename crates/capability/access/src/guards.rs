//! 准入校验：账户归属与单元资格。

use crate::error::EditError;
use domain::{AccountId, OperatorClaims, SiteId, UnitId};
use gate_storage::{AccountRecord, AccountStore, UnitRecord, UnitStore};
use std::sync::Arc;

/// 账户授权：账户存在、同公司、关联当前站点。
pub struct AccountAuthorizationGuard {
    accounts: Arc<dyn AccountStore>,
}

impl AccountAuthorizationGuard {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    pub async fn authorize(
        &self,
        account_id: AccountId,
        claims: &OperatorClaims,
    ) -> Result<AccountRecord, EditError> {
        let account = self
            .accounts
            .find_account(account_id)
            .await
            .map_err(|err| EditError::Internal(format!("failed to load account: {}", err)))?
            .ok_or_else(|| EditError::NotFound("account not found".to_string()))?;
        if account.company_id != claims.company_id {
            return Err(EditError::Forbidden(
                "account not in operator's company".to_string(),
            ));
        }
        if !account.has_site(&claims.site_key()) {
            return Err(EditError::Forbidden(
                "account missing association with target site".to_string(),
            ));
        }
        Ok(account)
    }
}

/// 单元资格：单元存在、属于当前站点、未被锁定。
pub struct UnitEligibilityGuard {
    units: Arc<dyn UnitStore>,
}

impl UnitEligibilityGuard {
    pub fn new(units: Arc<dyn UnitStore>) -> Self {
        Self { units }
    }

    pub async fn check(&self, unit_id: UnitId, site_id: SiteId) -> Result<UnitRecord, EditError> {
        let unit = self
            .units
            .find_unit(unit_id, site_id)
            .await
            .map_err(|err| EditError::Internal(format!("failed to load unit: {}", err)))?
            .ok_or_else(|| EditError::NotFound(format!("unit not found: {}", unit_id)))?;
        if unit.site_id != site_id {
            return Err(EditError::Forbidden(
                "unit missing association with target site".to_string(),
            ));
        }
        if unit.rental_state.blocks_code_change() {
            return Err(EditError::Forbidden(format!(
                "access code changes not allowed - unit in {}",
                unit.rental_state
            )));
        }
        Ok(unit)
    }
}
