//! 门禁密码内存存储实现
//!
//! 除当前行外，还按调用顺序记录每次写入的批次，便于测试断言写入顺序。

use crate::error::StorageError;
use crate::traits::AccessCodeStore;
use crate::validation::{ensure_codes_in_site, ensure_site};
use domain::{GateAccessCode, SiteId, UnitId};
use std::sync::RwLock;

/// 门禁密码内存存储
pub struct InMemoryAccessCodeStore {
    rows: RwLock<Vec<GateAccessCode>>,
    writes: RwLock<Vec<Vec<GateAccessCode>>>,
}

impl InMemoryAccessCodeStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            writes: RwLock::new(Vec::new()),
        }
    }

    /// 使用已有密码行初始化（不计入写入日志）。
    pub fn with_codes(codes: impl IntoIterator<Item = GateAccessCode>) -> Self {
        Self {
            rows: RwLock::new(codes.into_iter().collect()),
            writes: RwLock::new(Vec::new()),
        }
    }

    /// 当前全部密码行。
    pub fn rows(&self) -> Result<Vec<GateAccessCode>, StorageError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(rows.clone())
    }

    /// 按调用顺序返回每次 write_codes 的批次。
    pub fn write_log(&self) -> Result<Vec<Vec<GateAccessCode>>, StorageError> {
        let writes = self
            .writes
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(writes.clone())
    }
}

impl Default for InMemoryAccessCodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AccessCodeStore for InMemoryAccessCodeStore {
    async fn get_codes_for_units(
        &self,
        unit_ids: &[UnitId],
        site_id: SiteId,
    ) -> Result<Vec<GateAccessCode>, StorageError> {
        ensure_site(site_id)?;
        let rows = self
            .rows
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(rows
            .iter()
            .filter(|row| row.site_id == site_id && unit_ids.contains(&row.unit_id))
            .cloned()
            .collect())
    }

    async fn write_codes(
        &self,
        codes: &[GateAccessCode],
        site_id: SiteId,
    ) -> Result<(), StorageError> {
        ensure_codes_in_site(codes, site_id)?;
        // 校验结果不落库。
        let batch: Vec<GateAccessCode> = codes
            .iter()
            .map(|code| GateAccessCode {
                is_valid: false,
                validation_messages: Vec::new(),
                ..code.clone()
            })
            .collect();
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        for code in &batch {
            match rows.iter_mut().find(|row| row.same_row(code)) {
                Some(row) => row.state = code.state,
                None => rows.push(code.clone()),
            }
        }
        let mut writes = self
            .writes
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        writes.push(batch);
        Ok(())
    }
}
