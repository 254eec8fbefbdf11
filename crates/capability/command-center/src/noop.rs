use crate::{
    AccessCodeOptions, CommandCenterClient, CommandCenterError, CommandCenterFactory, Operation,
    ensure_units,
};
use async_trait::async_trait;
use domain::{SiteId, UnitId};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// 空指挥中心（未启用下发时使用）。
#[derive(Debug, Default)]
pub struct NoopCommandCenterFactory;

impl CommandCenterFactory for NoopCommandCenterFactory {
    fn new_client(
        &self,
        site_id: SiteId,
        cancel: &CancellationToken,
    ) -> Arc<dyn CommandCenterClient> {
        Arc::new(NoopCommandCenterClient {
            site_id,
            cancel: cancel.clone(),
        })
    }
}

struct NoopCommandCenterClient {
    site_id: SiteId,
    cancel: CancellationToken,
}

impl NoopCommandCenterClient {
    fn accept(&self, operation: Operation, unit_ids: &[UnitId]) -> Result<(), CommandCenterError> {
        ensure_units(operation, unit_ids)?;
        if self.cancel.is_cancelled() {
            return Err(CommandCenterError::Cancelled);
        }
        info!(
            target: "gate.command_center",
            site_id = self.site_id,
            operation = operation.as_str(),
            unit_ids = ?unit_ids,
            "command_center_noop"
        );
        Ok(())
    }
}

#[async_trait]
impl CommandCenterClient for NoopCommandCenterClient {
    async fn revoke_access_codes(
        &self,
        unit_ids: &[UnitId],
        _options: &AccessCodeOptions,
    ) -> Result<(), CommandCenterError> {
        self.accept(Operation::Revoke, unit_ids)
    }

    async fn set_access_codes(
        &self,
        unit_ids: &[UnitId],
        _options: &AccessCodeOptions,
    ) -> Result<(), CommandCenterError> {
        self.accept(Operation::Set, unit_ids)
    }
}
