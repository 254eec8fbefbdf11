//! Postgres 账户存储实现

use crate::error::StorageError;
use crate::models::AccountRecord;
use crate::traits::AccountStore;
use domain::AccountId;
use sqlx::{PgPool, Row};

pub struct PgAccountStore {
    pub pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PgAccountStore {
    async fn find_account(
        &self,
        account_id: AccountId,
    ) -> Result<Option<AccountRecord>, StorageError> {
        let row = sqlx::query("select account_id, company_id from accounts where account_id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let account_id: i64 = row.try_get("account_id")?;
        let company_id: String = row.try_get("company_id")?;

        let site_ids: Vec<String> = sqlx::query_scalar(
            "select site_id::text from account_sites where account_id = $1 order by site_id",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(AccountRecord {
            account_id,
            company_id,
            site_ids,
        }))
    }
}
