//! 门禁密码修改编排。
//!
//! 单元按输入顺序串行处理，遇到第一个错误即停止；已提交的单元不回滚。
//! 每一次存储 / 指挥中心 / 审计调用都与取消信号竞争。

use crate::command_center::CommandCenterAdapter;
use crate::error::{EditError, until_cancelled};
use crate::guards::{AccountAuthorizationGuard, UnitEligibilityGuard};
use crate::lifecycle::{TransitionPlan, plan_transition};
use crate::request::EditCommand;
use crate::validator::{AccessCodeRules, AccessCodeValidator};
use domain::{GateAccessCode, OperatorClaims, UnitId, ValidationMessage};
use gate_command_center::CommandCenterFactory;
use gate_storage::{AccessCodeStore, AccountRecord, AccountStore, AuditRecorder, UnitStore};
use gate_telemetry::{
    record_codes_superseded, record_edit_failed, record_edit_latency_ms, record_edit_requested,
    record_edit_succeeded, record_unit_applied, record_unit_unchanged,
};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// 编排所需的外部协作方。
pub struct EditDependencies {
    pub accounts: Arc<dyn AccountStore>,
    pub units: Arc<dyn UnitStore>,
    pub access_codes: Arc<dyn AccessCodeStore>,
    pub command_center: Arc<dyn CommandCenterFactory>,
    pub audit: Arc<dyn AuditRecorder>,
    pub rules: AccessCodeRules,
}

/// 一次修改的处理结果（用于日志与指标）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    pub applied: usize,
    pub unchanged: usize,
    /// unit_id 为 0 的占位单元。
    pub skipped: usize,
    pub superseded: usize,
    pub audit_id: String,
}

pub struct AccessCodeEditService {
    account_guard: AccountAuthorizationGuard,
    unit_guard: UnitEligibilityGuard,
    validator: AccessCodeValidator,
    access_codes: Arc<dyn AccessCodeStore>,
    command_center: Arc<dyn CommandCenterFactory>,
    audit: Arc<dyn AuditRecorder>,
}

impl AccessCodeEditService {
    pub fn new(deps: EditDependencies) -> Self {
        Self {
            account_guard: AccountAuthorizationGuard::new(deps.accounts),
            unit_guard: UnitEligibilityGuard::new(deps.units),
            validator: AccessCodeValidator::new(deps.access_codes.clone(), deps.rules),
            access_codes: deps.access_codes,
            command_center: deps.command_center,
            audit: deps.audit,
        }
    }

    pub async fn edit(
        &self,
        claims: Option<&OperatorClaims>,
        command: &EditCommand,
        cancel: &CancellationToken,
    ) -> Result<EditOutcome, EditError> {
        record_edit_requested();
        let started_at = Instant::now();
        let result = self.run(claims, command, cancel).await;
        record_edit_latency_ms(started_at.elapsed().as_millis() as u64);
        match &result {
            Ok(outcome) => {
                record_edit_succeeded();
                info!(
                    target: "gate.access",
                    account_id = command.account_id,
                    applied = outcome.applied,
                    unchanged = outcome.unchanged,
                    skipped = outcome.skipped,
                    superseded = outcome.superseded,
                    audit_id = %outcome.audit_id,
                    "access_code_edit_completed"
                );
            }
            Err(err) => {
                record_edit_failed();
                warn!(
                    target: "gate.access",
                    account_id = command.account_id,
                    kind = err.kind(),
                    error = %err,
                    "access_code_edit_failed"
                );
            }
        }
        result
    }

    async fn run(
        &self,
        claims: Option<&OperatorClaims>,
        command: &EditCommand,
        cancel: &CancellationToken,
    ) -> Result<EditOutcome, EditError> {
        let claims = claims.ok_or(EditError::Unauthorized)?;
        info!(
            target: "gate.access",
            operator_id = claims.user_id,
            account_id = command.account_id,
            site_id = claims.site_id,
            unit_count = command.unit_ids.len(),
            "access_code_edit_requested"
        );

        let account = until_cancelled(
            cancel,
            self.account_guard.authorize(command.account_id, claims),
        )
        .await?;

        let mut outcome = EditOutcome::default();
        let mut adapter: Option<CommandCenterAdapter> = None;
        for &unit_id in &command.unit_ids {
            if unit_id == 0 {
                outcome.skipped += 1;
                continue;
            }
            if cancel.is_cancelled() {
                return Err(EditError::Cancelled);
            }
            self.edit_unit(
                claims,
                &account,
                unit_id,
                &command.access_code,
                cancel,
                &mut adapter,
                &mut outcome,
            )
            .await?;
        }

        let audit_id = until_cancelled(cancel, async {
            self.audit
                .record_access_code_edit(
                    claims.user_id,
                    &account,
                    &claims.site_external_id,
                    now_epoch_ms(),
                )
                .await
                .map_err(|err| EditError::Internal(format!("recording activity failed: {}", err)))
        })
        .await?;
        outcome.audit_id = audit_id;
        Ok(outcome)
    }

    #[allow(clippy::too_many_arguments)]
    async fn edit_unit(
        &self,
        claims: &OperatorClaims,
        account: &AccountRecord,
        unit_id: UnitId,
        access_code: &str,
        cancel: &CancellationToken,
        adapter: &mut Option<CommandCenterAdapter>,
        outcome: &mut EditOutcome,
    ) -> Result<(), EditError> {
        let site_id = claims.site_id;
        until_cancelled(cancel, self.unit_guard.check(unit_id, site_id)).await?;

        let mut candidate =
            GateAccessCode::candidate(access_code, unit_id, account.account_id, site_id);
        until_cancelled(cancel, async {
            self.validator
                .validate(&mut candidate)
                .await
                .map_err(|err| EditError::Internal(format!("failed to validate access code: {}", err)))
        })
        .await?;
        if !candidate.is_valid {
            return Err(invalid_code_error(&candidate));
        }

        let existing = until_cancelled(cancel, async {
            self.access_codes
                .get_codes_for_units(&[unit_id], site_id)
                .await
                .map_err(|err| EditError::Internal(format!("failed to load access codes: {}", err)))
        })
        .await?;

        let (superseded, install, revoke_units) = match plan_transition(&existing, &candidate) {
            TransitionPlan::Unchanged => {
                record_unit_unchanged();
                outcome.unchanged += 1;
                info!(
                    target: "gate.access",
                    account_id = account.account_id,
                    site_id = site_id,
                    unit_id = unit_id,
                    "access_code_unit_unchanged"
                );
                return Ok(());
            }
            TransitionPlan::Apply {
                superseded,
                install,
                revoke_units,
            } => (superseded, install, revoke_units),
        };

        until_cancelled(cancel, async {
            self.access_codes
                .replace_codes(&superseded, &install, site_id)
                .await
                .map_err(|err| EditError::Internal(format!("failed to update access codes: {}", err)))
        })
        .await?;

        let adapter = adapter.get_or_insert_with(|| {
            CommandCenterAdapter::new(self.command_center.new_client(site_id, cancel))
        });
        until_cancelled(cancel, adapter.revoke_then_set(&revoke_units, &[unit_id])).await?;

        record_unit_applied();
        record_codes_superseded(superseded.len() as u64);
        outcome.applied += 1;
        outcome.superseded += superseded.len();
        info!(
            target: "gate.access",
            account_id = account.account_id,
            site_id = site_id,
            unit_id = unit_id,
            state = %install.state,
            superseded = superseded.len(),
            revoked_units = ?revoke_units,
            "access_code_unit_applied"
        );
        Ok(())
    }
}

fn invalid_code_error(candidate: &GateAccessCode) -> EditError {
    if candidate.has_message(ValidationMessage::Duplicate) {
        return EditError::Conflict("duplicate access code".to_string());
    }
    let messages: Vec<&str> = candidate
        .validation_messages
        .iter()
        .map(|message| message.as_str())
        .collect();
    EditError::BadRequest(format!("invalid access code: {}", messages.join(", ")))
}

fn now_epoch_ms() -> i64 {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_millis() as i64
}
