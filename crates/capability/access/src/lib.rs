//! 门禁密码修改能力。
//!
//! 一次修改请求的处理顺序：
//! 账户授权 → 逐个单元（资格校验 → 密码校验 → 生命周期规划 → 持久化 → 指挥中心）→ 审计。
//!
//! - `guards`：账户 / 单元准入校验
//! - `validator`：候选密码格式与重复校验
//! - `lifecycle`：纯函数，计算被替换的旧密码与需撤销的单元
//! - `command_center`：revoke → set 下发
//! - `service`：编排入口 `AccessCodeEditService`

pub mod command_center;
pub mod error;
pub mod guards;
pub mod lifecycle;
pub mod request;
pub mod service;
pub mod validator;

pub use command_center::CommandCenterAdapter;
pub use error::EditError;
pub use guards::{AccountAuthorizationGuard, UnitEligibilityGuard};
pub use lifecycle::{TransitionPlan, plan_transition};
pub use request::EditCommand;
pub use service::{AccessCodeEditService, EditDependencies, EditOutcome};
pub use validator::{AccessCodeRules, AccessCodeValidator};
