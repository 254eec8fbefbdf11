//! Postgres 单元存储实现

use crate::error::StorageError;
use crate::models::UnitRecord;
use crate::traits::UnitStore;
use domain::{SiteId, UnitId, UnitRentalState};
use sqlx::{PgPool, Row};

pub struct PgUnitStore {
    pub pool: PgPool,
}

impl PgUnitStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UnitStore for PgUnitStore {
    // 只按 unit_id 查询，站点归属交给调用方判断（以区分 "不存在" 与 "不属于本站点"）。
    async fn find_unit(
        &self,
        unit_id: UnitId,
        _site_id: SiteId,
    ) -> Result<Option<UnitRecord>, StorageError> {
        let row = sqlx::query(
            "select unit_id, site_id, coalesce(rental_state, '') as rental_state \
             from units where unit_id = $1",
        )
        .bind(unit_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let rental_state: String = row.try_get("rental_state")?;
        Ok(Some(UnitRecord {
            unit_id: row.try_get("unit_id")?,
            site_id: row.try_get("site_id")?,
            rental_state: UnitRentalState::from(rental_state.as_str()),
        }))
    }
}
