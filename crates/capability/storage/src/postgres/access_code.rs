//! Postgres 门禁密码存储实现
//!
//! - 读取：按站点 + 单元集合批量查询
//! - 写入：按唯一键 upsert 状态
//! - 替换：remove 行与新 setup 行在同一事务内提交

use crate::error::StorageError;
use crate::traits::AccessCodeStore;
use crate::validation::{ensure_codes_in_site, ensure_site};
use domain::{AccessCodeState, GateAccessCode, SiteId, UnitId};
use sqlx::{PgConnection, PgPool, Row};

pub struct PgAccessCodeStore {
    pub pool: PgPool,
}

impl PgAccessCodeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn upsert_code(conn: &mut PgConnection, code: &GateAccessCode) -> Result<(), StorageError> {
    sqlx::query(
        "insert into gate_access_codes \
         (site_id, unit_id, account_id, access_code, state, updated_at) \
         values ($1, $2, $3, $4, $5, now()) \
         on conflict (site_id, unit_id, account_id, access_code) \
         do update set state = excluded.state, updated_at = now()",
    )
    .bind(code.site_id)
    .bind(code.unit_id)
    .bind(code.account_id)
    .bind(&code.access_code)
    .bind(code.state.as_str())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[async_trait::async_trait]
impl AccessCodeStore for PgAccessCodeStore {
    async fn get_codes_for_units(
        &self,
        unit_ids: &[UnitId],
        site_id: SiteId,
    ) -> Result<Vec<GateAccessCode>, StorageError> {
        ensure_site(site_id)?;
        if unit_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            "select site_id, unit_id, account_id, access_code, state \
             from gate_access_codes \
             where site_id = $1 and unit_id = any($2) \
             order by unit_id, updated_at",
        )
        .bind(site_id)
        .bind(unit_ids)
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let state: String = row.try_get("state")?;
            let state: AccessCodeState = state.parse()?;
            let access_code: String = row.try_get("access_code")?;
            items.push(GateAccessCode::stored(
                access_code,
                row.try_get("unit_id")?,
                row.try_get("account_id")?,
                row.try_get("site_id")?,
                state,
            ));
        }
        Ok(items)
    }

    async fn write_codes(
        &self,
        codes: &[GateAccessCode],
        site_id: SiteId,
    ) -> Result<(), StorageError> {
        ensure_codes_in_site(codes, site_id)?;
        if codes.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await?;
        for code in codes {
            upsert_code(&mut *tx, code).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn replace_codes(
        &self,
        superseded: &[GateAccessCode],
        install: &GateAccessCode,
        site_id: SiteId,
    ) -> Result<(), StorageError> {
        ensure_codes_in_site(superseded, site_id)?;
        ensure_codes_in_site(std::slice::from_ref(install), site_id)?;
        let mut tx = self.pool.begin().await?;
        for code in superseded {
            upsert_code(&mut *tx, code).await?;
        }
        upsert_code(&mut *tx, install).await?;
        tx.commit().await?;
        Ok(())
    }
}
