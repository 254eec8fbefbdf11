//! # PostgreSQL 存储实现模块
//!
//! 生产环境使用的存储实现，所有查询使用参数绑定。
//!
//! ## 包含的实现
//!
//! - **AccountStore** (`account.rs`)：账户 + 站点关联
//! - **UnitStore** (`unit.rs`)：单元与出租状态
//! - **AccessCodeStore** (`access_code.rs`)：门禁密码行，替换写入使用单个事务
//! - **AuditLogStore** (`audit.rs`)：审计日志
//!
//! ## 数据库模式要求
//!
//! - `accounts`：账户表（account_id, company_id）
//! - `account_sites`：账户站点关联表（account_id, site_id）
//! - `units`：单元表（unit_id, site_id, rental_state）
//! - `gate_access_codes`：门禁密码表（site_id, unit_id, account_id, access_code, state, updated_at），
//!   唯一约束 (site_id, unit_id, account_id, access_code)
//! - `audit_logs`：审计日志表（audit_id, company_id, site_id, actor, action, resource, result, detail, ts）
//!
//! ## 索引
//!
//! - `idx_gate_access_codes_site_unit`：(site_id, unit_id) 复合索引，覆盖按单元读取
//! - `idx_audit_logs_company_site_ts`：(company_id, site_id, ts desc)
//!
//! ## 错误处理
//!
//! - `sqlx::Error` 自动转换为 `StorageError`
//! - 未知的密码状态字符串转换为 `StorageError`
//! - 返回 `Option<T>` 表示"可能不存在"

pub mod access_code;
pub mod account;
pub mod audit;
pub mod unit;

pub use access_code::*;
pub use account::*;
pub use audit::*;
pub use unit::*;
