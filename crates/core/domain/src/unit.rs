//! 单元出租/锁定状态。

use std::fmt;

/// 单元的出租或锁定状态。
///
/// `Overlock`、`Gatelock`、`Prelet` 期间门锁由其他流程接管，禁止修改门禁密码。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnitRentalState {
    Normal,
    Overlock,
    Gatelock,
    Prelet,
    Other(String),
}

impl UnitRentalState {
    pub fn as_str(&self) -> &str {
        match self {
            UnitRentalState::Normal => "normal",
            UnitRentalState::Overlock => "overlock",
            UnitRentalState::Gatelock => "gatelock",
            UnitRentalState::Prelet => "prelet",
            UnitRentalState::Other(value) => value,
        }
    }

    pub fn blocks_code_change(&self) -> bool {
        matches!(
            self,
            UnitRentalState::Overlock | UnitRentalState::Gatelock | UnitRentalState::Prelet
        )
    }
}

impl From<&str> for UnitRentalState {
    fn from(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" | "normal" => UnitRentalState::Normal,
            "overlock" => UnitRentalState::Overlock,
            "gatelock" => UnitRentalState::Gatelock,
            "prelet" => UnitRentalState::Prelet,
            _ => UnitRentalState::Other(normalized),
        }
    }
}

impl fmt::Display for UnitRentalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
