//! 指挥中心能力：按站点向门锁硬件下发 revoke / set 门禁密码指令。
//!
//! - `CommandCenterFactory` 按站点创建客户端（每个请求一个，底层连接共享）
//! - `MqttCommandCenterFactory`：通过 MQTT 发布指令
//! - `NoopCommandCenterFactory`：不下发，仅做参数校验（本地与测试）

mod mqtt;
mod noop;

use async_trait::async_trait;
use domain::{SiteId, UnitId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub use mqtt::{MqttCommandCenterConfig, MqttCommandCenterFactory};
pub use noop::NoopCommandCenterFactory;

/// 指挥中心错误。
#[derive(Debug, thiserror::Error)]
pub enum CommandCenterError {
    #[error("no units specified for {}", .0.empty_units_label())]
    EmptyUnits(Operation),
    #[error("dispatch error: {0}")]
    Dispatch(String),
    #[error("payload error: {0}")]
    Payload(String),
    #[error("command cancelled")]
    Cancelled,
}

/// 指令类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Revoke,
    Set,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Revoke => "revoke",
            Operation::Set => "set",
        }
    }

    fn empty_units_label(self) -> &'static str {
        match self {
            Operation::Revoke => "revocation",
            Operation::Set => "access code setting",
        }
    }
}

/// 指令附加选项（无序标志集合，当前流程传空集合）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessCodeOptions {
    pub flags: BTreeSet<String>,
}

impl AccessCodeOptions {
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }
}

/// 单站点指挥中心客户端。
#[async_trait]
pub trait CommandCenterClient: Send + Sync {
    async fn revoke_access_codes(
        &self,
        unit_ids: &[UnitId],
        options: &AccessCodeOptions,
    ) -> Result<(), CommandCenterError>;

    async fn set_access_codes(
        &self,
        unit_ids: &[UnitId],
        options: &AccessCodeOptions,
    ) -> Result<(), CommandCenterError>;
}

/// 客户端工厂；`cancel` 取消后客户端上的调用返回 `Cancelled`。
pub trait CommandCenterFactory: Send + Sync {
    fn new_client(&self, site_id: SiteId, cancel: &CancellationToken)
    -> Arc<dyn CommandCenterClient>;
}

fn ensure_units(operation: Operation, unit_ids: &[UnitId]) -> Result<(), CommandCenterError> {
    if unit_ids.is_empty() {
        return Err(CommandCenterError::EmptyUnits(operation));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_units_message_names_operation() {
        let revoke = ensure_units(Operation::Revoke, &[]).expect_err("empty");
        assert_eq!(revoke.to_string(), "no units specified for revocation");
        let set = ensure_units(Operation::Set, &[]).expect_err("empty");
        assert_eq!(set.to_string(), "no units specified for access code setting");
        assert!(ensure_units(Operation::Set, &[42]).is_ok());
    }
}
