//! 内存存储实现模块
//!
//! 用于本地演示和测试。
//!
//! 包含以下实现：
//! - AccountStore: InMemoryAccountStore
//! - UnitStore: InMemoryUnitStore
//! - AccessCodeStore: InMemoryAccessCodeStore
//! - AuditLogStore: InMemoryAuditLogStore

pub mod access_code;
pub mod account;
pub mod audit;
pub mod unit;

pub use access_code::*;
pub use account::*;
pub use audit::*;
pub use unit::*;
