//! 门禁密码模型与生命周期状态。

use crate::{AccountId, SiteId, UnitId};
use std::fmt;
use std::str::FromStr;

/// 门禁密码生命周期状态。
///
/// 修改流程只会写入 `Setup`（新密码）和 `Remove`（被替换的旧密码），
/// 其余流转由指挥中心异步驱动。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessCodeState {
    Setup,
    Pending,
    Active,
    Remove,
    Removing,
    Removed,
    Inactive,
    Overlocking,
    Overlocked,
}

impl AccessCodeState {
    pub const ALL: [AccessCodeState; 9] = [
        AccessCodeState::Setup,
        AccessCodeState::Pending,
        AccessCodeState::Active,
        AccessCodeState::Remove,
        AccessCodeState::Removing,
        AccessCodeState::Removed,
        AccessCodeState::Inactive,
        AccessCodeState::Overlocking,
        AccessCodeState::Overlocked,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AccessCodeState::Setup => "setup",
            AccessCodeState::Pending => "pending",
            AccessCodeState::Active => "active",
            AccessCodeState::Remove => "remove",
            AccessCodeState::Removing => "removing",
            AccessCodeState::Removed => "removed",
            AccessCodeState::Inactive => "inactive",
            AccessCodeState::Overlocking => "overlocking",
            AccessCodeState::Overlocked => "overlocked",
        }
    }

    /// 已生效或即将生效（setup / pending / active）。
    pub fn is_live(self) -> bool {
        matches!(
            self,
            AccessCodeState::Setup | AccessCodeState::Pending | AccessCodeState::Active
        )
    }

    /// 已由外部系统接管或已失效，修改流程不再触碰。
    pub fn is_settled(self) -> bool {
        match self {
            AccessCodeState::Inactive
            | AccessCodeState::Removed
            | AccessCodeState::Removing
            | AccessCodeState::Overlocking
            | AccessCodeState::Overlocked => true,
            AccessCodeState::Setup
            | AccessCodeState::Pending
            | AccessCodeState::Active
            | AccessCodeState::Remove => false,
        }
    }
}

impl fmt::Display for AccessCodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知的门禁密码状态字符串。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown access code state: {0}")]
pub struct UnknownAccessCodeState(pub String);

impl FromStr for AccessCodeState {
    type Err = UnknownAccessCodeState;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        AccessCodeState::ALL
            .into_iter()
            .find(|state| state.as_str() == normalized)
            .ok_or_else(|| UnknownAccessCodeState(value.to_string()))
    }
}

/// 校验失败原因（仅在内存中传递，不落库）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationMessage {
    /// 其他账户在同一单元已有相同的有效密码。
    Duplicate,
    Empty,
    NonNumeric,
    InvalidLength,
}

impl ValidationMessage {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationMessage::Duplicate => "duplicate_code",
            ValidationMessage::Empty => "empty_code",
            ValidationMessage::NonNumeric => "non_numeric_code",
            ValidationMessage::InvalidLength => "invalid_length",
        }
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 门禁密码。
///
/// 行按 (site, unit, account, access_code) 唯一；状态变更只改 `state`，从不删除。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateAccessCode {
    pub access_code: String,
    pub unit_id: UnitId,
    pub account_id: AccountId,
    pub site_id: SiteId,
    pub state: AccessCodeState,
    pub is_valid: bool,
    pub validation_messages: Vec<ValidationMessage>,
}

impl GateAccessCode {
    /// 构造处于 `setup` 状态的候选密码（尚未校验）。
    pub fn candidate(
        access_code: impl Into<String>,
        unit_id: UnitId,
        account_id: AccountId,
        site_id: SiteId,
    ) -> Self {
        Self::stored(access_code, unit_id, account_id, site_id, AccessCodeState::Setup)
    }

    /// 构造已持久化状态的密码行。
    pub fn stored(
        access_code: impl Into<String>,
        unit_id: UnitId,
        account_id: AccountId,
        site_id: SiteId,
        state: AccessCodeState,
    ) -> Self {
        Self {
            access_code: access_code.into(),
            unit_id,
            account_id,
            site_id,
            state,
            is_valid: false,
            validation_messages: Vec::new(),
        }
    }

    /// 行的唯一键是否一致（状态不参与比较）。
    pub fn same_row(&self, other: &GateAccessCode) -> bool {
        self.site_id == other.site_id
            && self.unit_id == other.unit_id
            && self.account_id == other.account_id
            && self.access_code == other.access_code
    }

    pub fn has_message(&self, message: ValidationMessage) -> bool {
        self.validation_messages.contains(&message)
    }
}
