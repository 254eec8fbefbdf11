//! 门禁密码生命周期规划（无 I/O）。

use domain::{AccessCodeState, GateAccessCode, UnitId};

/// 单个单元的状态变更计划。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionPlan {
    /// 已存在相同的有效密码，无需任何写入或下发。
    Unchanged,
    Apply {
        /// 被替换的旧密码（state = remove）。
        superseded: Vec<GateAccessCode>,
        /// 新密码（state = setup）。
        install: GateAccessCode,
        /// 需撤销的单元，去重且保持首次出现顺序。
        revoke_units: Vec<UnitId>,
    },
}

pub fn plan_transition(existing: &[GateAccessCode], candidate: &GateAccessCode) -> TransitionPlan {
    if existing
        .iter()
        .any(|code| code.state.is_live() && code.access_code == candidate.access_code)
    {
        return TransitionPlan::Unchanged;
    }

    let mut superseded = Vec::new();
    let mut revoke_units: Vec<UnitId> = Vec::new();
    for code in existing.iter().filter(|code| !code.state.is_settled()) {
        superseded.push(GateAccessCode {
            state: AccessCodeState::Remove,
            ..code.clone()
        });
        if !revoke_units.contains(&code.unit_id) {
            revoke_units.push(code.unit_id);
        }
    }

    TransitionPlan::Apply {
        superseded,
        install: GateAccessCode {
            state: AccessCodeState::Setup,
            ..candidate.clone()
        },
        revoke_units,
    }
}
