//! 数据库连接管理
//!
//! - connect_pool：建立 Postgres 连接池（账户、单元、门禁密码、审计共用）

use crate::error::StorageError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

const MAX_CONNECTIONS: u32 = 8;
// 获取连接超过该时长直接失败，交由上层映射为 Internal。
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// 建立 Postgres 连接池
///
/// # 参数
/// - `database_url`：Postgres 连接字符串
pub async fn connect_pool(database_url: &str) -> Result<PgPool, StorageError> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;
    Ok(pool)
}
