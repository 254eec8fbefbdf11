//! 账户内存存储实现

use crate::error::StorageError;
use crate::models::AccountRecord;
use crate::traits::AccountStore;
use domain::AccountId;
use std::collections::HashMap;
use std::sync::RwLock;

/// 账户内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, AccountRecord>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// 使用给定账户初始化。
    pub fn with_accounts(accounts: impl IntoIterator<Item = AccountRecord>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.account_id, account))
            .collect();
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    pub fn insert(&self, account: AccountRecord) -> Result<(), StorageError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        accounts.insert(account.account_id, account);
        Ok(())
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_account(
        &self,
        account_id: AccountId,
    ) -> Result<Option<AccountRecord>, StorageError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(accounts.get(&account_id).cloned())
    }
}
