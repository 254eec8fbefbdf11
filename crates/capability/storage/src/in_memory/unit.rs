//! 单元内存存储实现

use crate::error::StorageError;
use crate::models::UnitRecord;
use crate::traits::UnitStore;
use domain::{SiteId, UnitId};
use std::collections::HashMap;
use std::sync::RwLock;

/// 单元内存存储
///
/// 按 unit_id 查找，不按站点过滤；站点归属由调用方校验。
pub struct InMemoryUnitStore {
    units: RwLock<HashMap<UnitId, UnitRecord>>,
}

impl InMemoryUnitStore {
    pub fn new() -> Self {
        Self {
            units: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_units(units: impl IntoIterator<Item = UnitRecord>) -> Self {
        let units = units.into_iter().map(|unit| (unit.unit_id, unit)).collect();
        Self {
            units: RwLock::new(units),
        }
    }

    pub fn insert(&self, unit: UnitRecord) -> Result<(), StorageError> {
        let mut units = self
            .units
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        units.insert(unit.unit_id, unit);
        Ok(())
    }
}

impl Default for InMemoryUnitStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UnitStore for InMemoryUnitStore {
    async fn find_unit(
        &self,
        unit_id: UnitId,
        _site_id: SiteId,
    ) -> Result<Option<UnitRecord>, StorageError> {
        let units = self
            .units
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(units.get(&unit_id).cloned())
    }
}
