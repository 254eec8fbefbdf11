//! 验证辅助函数
//!
//! 提供统一的验证逻辑，确保数据一致性：
//! - ensure_site：验证站点 ID 有效
//! - ensure_codes_in_site：验证待写入的密码行都属于目标站点
//!
//! 使用场景：
//! - 内存实现与 Postgres 实现在读写前共用同一套校验

use crate::error::StorageError;
use domain::{GateAccessCode, SiteId};

/// 验证站点 ID 有效
pub fn ensure_site(site_id: SiteId) -> Result<(), StorageError> {
    if site_id <= 0 {
        return Err(StorageError::new("site_id required"));
    }
    Ok(())
}

/// 验证密码行归属目标站点
///
/// 任何一行站点不一致都会拒绝整批写入。
pub fn ensure_codes_in_site(codes: &[GateAccessCode], site_id: SiteId) -> Result<(), StorageError> {
    ensure_site(site_id)?;
    if codes.iter().any(|code| code.site_id != site_id) {
        return Err(StorageError::new("site mismatch"));
    }
    Ok(())
}
