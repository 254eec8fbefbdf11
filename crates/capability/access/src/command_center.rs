//! 指挥中心下发：先 revoke 旧密码，再 set 新密码。

use crate::error::EditError;
use domain::UnitId;
use gate_command_center::{AccessCodeOptions, CommandCenterClient, CommandCenterError};
use gate_telemetry::{record_revoke_failure, record_set_failure};
use std::sync::Arc;
use tracing::warn;

pub struct CommandCenterAdapter {
    client: Arc<dyn CommandCenterClient>,
    options: AccessCodeOptions,
}

impl CommandCenterAdapter {
    pub fn new(client: Arc<dyn CommandCenterClient>) -> Self {
        Self {
            client,
            options: AccessCodeOptions::default(),
        }
    }

    /// revoke 失败时不会调用 set。
    pub async fn revoke_then_set(
        &self,
        revoke_units: &[UnitId],
        set_units: &[UnitId],
    ) -> Result<(), EditError> {
        if !revoke_units.is_empty() {
            self.client
                .revoke_access_codes(revoke_units, &self.options)
                .await
                .map_err(|err| {
                    record_revoke_failure();
                    warn!(
                        target: "gate.access",
                        unit_ids = ?revoke_units,
                        error = %err,
                        "access_code_revoke_failed"
                    );
                    map_client_error("failed to revoke previous access codes", err)
                })?;
        }
        self.client
            .set_access_codes(set_units, &self.options)
            .await
            .map_err(|err| {
                record_set_failure();
                warn!(
                    target: "gate.access",
                    unit_ids = ?set_units,
                    error = %err,
                    "access_code_set_failed"
                );
                map_client_error("failed to set access codes", err)
            })
    }
}

fn map_client_error(context: &str, err: CommandCenterError) -> EditError {
    match err {
        CommandCenterError::Cancelled => EditError::Cancelled,
        other => EditError::Internal(format!("{}: {}", context, other)),
    }
}
