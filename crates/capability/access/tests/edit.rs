use async_trait::async_trait;
use domain::{AccessCodeState, GateAccessCode, OperatorClaims, SiteId, UnitId, UnitRentalState};
use gate_access::{AccessCodeEditService, AccessCodeRules, EditCommand, EditDependencies, EditError};
use gate_command_center::{
    AccessCodeOptions, CommandCenterClient, CommandCenterError, CommandCenterFactory,
};
use gate_storage::{
    AccessCodeStore, AccountRecord, AuditRecorder, InMemoryAccessCodeStore,
    InMemoryAccountStore, InMemoryAuditLogStore, InMemoryUnitStore, StorageError,
    StoreAuditRecorder, UnitRecord,
};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

const SITE: SiteId = 7;

type Journal = Arc<Mutex<Vec<String>>>;

fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().expect("journal").clone()
}

struct RecordingCodeStore {
    inner: InMemoryAccessCodeStore,
    journal: Journal,
}

#[async_trait]
impl AccessCodeStore for RecordingCodeStore {
    async fn get_codes_for_units(
        &self,
        unit_ids: &[UnitId],
        site_id: SiteId,
    ) -> Result<Vec<GateAccessCode>, StorageError> {
        self.journal
            .lock()
            .expect("journal")
            .push(format!("get:{:?}", unit_ids));
        self.inner.get_codes_for_units(unit_ids, site_id).await
    }

    async fn write_codes(
        &self,
        codes: &[GateAccessCode],
        site_id: SiteId,
    ) -> Result<(), StorageError> {
        for code in codes {
            self.journal.lock().expect("journal").push(format!(
                "write:{}:{}:{}",
                code.unit_id, code.access_code, code.state
            ));
        }
        self.inner.write_codes(codes, site_id).await
    }
}

#[derive(Default)]
struct CommandCenterBehavior {
    fail_revoke: bool,
    cancel_after_set: bool,
}

struct RecordingFactory {
    journal: Journal,
    behavior: CommandCenterBehavior,
}

impl CommandCenterFactory for RecordingFactory {
    fn new_client(
        &self,
        site_id: SiteId,
        cancel: &CancellationToken,
    ) -> Arc<dyn CommandCenterClient> {
        self.journal
            .lock()
            .expect("journal")
            .push(format!("client:{}", site_id));
        Arc::new(RecordingClient {
            journal: self.journal.clone(),
            fail_revoke: self.behavior.fail_revoke,
            cancel_after_set: self.behavior.cancel_after_set,
            cancel: cancel.clone(),
        })
    }
}

struct RecordingClient {
    journal: Journal,
    fail_revoke: bool,
    cancel_after_set: bool,
    cancel: CancellationToken,
}

#[async_trait]
impl CommandCenterClient for RecordingClient {
    async fn revoke_access_codes(
        &self,
        unit_ids: &[UnitId],
        _options: &AccessCodeOptions,
    ) -> Result<(), CommandCenterError> {
        self.journal
            .lock()
            .expect("journal")
            .push(format!("revoke:{:?}", unit_ids));
        if self.fail_revoke {
            return Err(CommandCenterError::Dispatch("lock offline".to_string()));
        }
        Ok(())
    }

    async fn set_access_codes(
        &self,
        unit_ids: &[UnitId],
        _options: &AccessCodeOptions,
    ) -> Result<(), CommandCenterError> {
        self.journal
            .lock()
            .expect("journal")
            .push(format!("set:{:?}", unit_ids));
        if self.cancel_after_set {
            self.cancel.cancel();
        }
        Ok(())
    }
}

struct FailingAudit;

#[async_trait]
impl AuditRecorder for FailingAudit {
    async fn record_access_code_edit(
        &self,
        _operator_id: i64,
        _account: &AccountRecord,
        _site_external_id: &str,
        _ts_ms: i64,
    ) -> Result<String, StorageError> {
        Err(StorageError::new("audit store down"))
    }
}

struct Harness {
    journal: Journal,
    codes: Arc<RecordingCodeStore>,
    service: AccessCodeEditService,
}

struct Setup {
    accounts: Vec<AccountRecord>,
    units: Vec<UnitRecord>,
    codes: Vec<GateAccessCode>,
    behavior: CommandCenterBehavior,
    audit: Option<Arc<dyn AuditRecorder>>,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            accounts: vec![account(11, "company-1", &["7"])],
            units: vec![unit(42, SITE, UnitRentalState::Normal)],
            codes: Vec::new(),
            behavior: CommandCenterBehavior::default(),
            audit: None,
        }
    }
}

fn account(account_id: i64, company_id: &str, sites: &[&str]) -> AccountRecord {
    AccountRecord {
        account_id,
        company_id: company_id.to_string(),
        site_ids: sites.iter().map(|site| site.to_string()).collect(),
    }
}

fn unit(unit_id: UnitId, site_id: SiteId, rental_state: UnitRentalState) -> UnitRecord {
    UnitRecord {
        unit_id,
        site_id,
        rental_state,
    }
}

fn harness(setup: Setup) -> Harness {
    let journal: Journal = Arc::new(Mutex::new(Vec::new()));
    let codes = Arc::new(RecordingCodeStore {
        inner: InMemoryAccessCodeStore::with_codes(setup.codes),
        journal: journal.clone(),
    });
    let audit = setup.audit.unwrap_or_else(|| {
        Arc::new(StoreAuditRecorder::new(Arc::new(InMemoryAuditLogStore::new())))
    });
    let service = AccessCodeEditService::new(EditDependencies {
        accounts: Arc::new(InMemoryAccountStore::with_accounts(setup.accounts)),
        units: Arc::new(InMemoryUnitStore::with_units(setup.units)),
        access_codes: codes.clone(),
        command_center: Arc::new(RecordingFactory {
            journal: journal.clone(),
            behavior: setup.behavior,
        }),
        audit,
        rules: AccessCodeRules::default(),
    });
    Harness {
        journal,
        codes,
        service,
    }
}

fn claims() -> OperatorClaims {
    OperatorClaims::new(3, "company-1", SITE, "site-ext-7")
}

fn command(unit_ids: Vec<UnitId>, code: &str) -> EditCommand {
    EditCommand {
        account_id: 11,
        unit_ids,
        access_code: code.to_string(),
    }
}

fn stored(code: &str, unit_id: UnitId, account_id: i64, state: AccessCodeState) -> GateAccessCode {
    GateAccessCode::stored(code, unit_id, account_id, SITE, state)
}

fn has_command_center_calls(journal: &[String]) -> bool {
    journal
        .iter()
        .any(|entry| entry.starts_with("revoke") || entry.starts_with("set"))
}

#[tokio::test]
async fn fresh_unit_sets_code_without_revoke() {
    let harness = harness(Setup::default());
    let outcome = harness
        .service
        .edit(Some(&claims()), &command(vec![42], "5678"), &CancellationToken::new())
        .await
        .expect("edit");

    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.superseded, 0);
    assert!(!outcome.audit_id.is_empty());
    let journal = entries(&harness.journal);
    assert!(journal.contains(&"write:42:5678:setup".to_string()));
    assert!(journal.contains(&"set:[42]".to_string()));
    assert!(!journal.iter().any(|entry| entry.starts_with("revoke")));
}

#[tokio::test]
async fn existing_code_is_removed_before_new_code_is_set() {
    let harness = harness(Setup {
        codes: vec![stored("1111", 42, 11, AccessCodeState::Active)],
        ..Setup::default()
    });
    let outcome = harness
        .service
        .edit(Some(&claims()), &command(vec![42], "5678"), &CancellationToken::new())
        .await
        .expect("edit");
    assert_eq!(outcome.superseded, 1);

    let journal = entries(&harness.journal);
    let position = |needle: &str| {
        journal
            .iter()
            .position(|entry| entry == needle)
            .unwrap_or_else(|| panic!("missing {needle}: {journal:?}"))
    };
    assert!(position("write:42:1111:remove") < position("write:42:5678:setup"));
    assert!(position("write:42:5678:setup") < position("revoke:[42]"));
    assert!(position("revoke:[42]") < position("set:[42]"));

    let rows = harness.codes.inner.rows().expect("rows");
    let old = rows
        .iter()
        .find(|row| row.access_code == "1111")
        .expect("old row");
    assert_eq!(old.state, AccessCodeState::Remove);
}

#[tokio::test]
async fn same_code_twice_is_idempotent() {
    let harness = harness(Setup {
        codes: vec![stored("5678", 42, 11, AccessCodeState::Active)],
        ..Setup::default()
    });
    let outcome = harness
        .service
        .edit(Some(&claims()), &command(vec![42], "5678"), &CancellationToken::new())
        .await
        .expect("edit");

    assert_eq!(outcome.unchanged, 1);
    assert_eq!(outcome.applied, 0);
    let journal = entries(&harness.journal);
    assert!(!journal.iter().any(|entry| entry.starts_with("write")));
    assert!(!has_command_center_calls(&journal));
}

#[tokio::test]
async fn missing_claims_are_unauthorized() {
    let harness = harness(Setup::default());
    let err = harness
        .service
        .edit(None, &command(vec![42], "5678"), &CancellationToken::new())
        .await
        .expect_err("unauthorized");
    assert_eq!(err, EditError::Unauthorized);
    assert!(entries(&harness.journal).is_empty());
}

#[tokio::test]
async fn unknown_account_is_not_found() {
    let harness = harness(Setup {
        accounts: Vec::new(),
        ..Setup::default()
    });
    let err = harness
        .service
        .edit(Some(&claims()), &command(vec![42], "5678"), &CancellationToken::new())
        .await
        .expect_err("not found");
    assert_eq!(err, EditError::NotFound("account not found".to_string()));
}

#[tokio::test]
async fn account_from_other_company_is_forbidden() {
    let harness = harness(Setup {
        accounts: vec![account(11, "company-2", &["7"])],
        ..Setup::default()
    });
    let err = harness
        .service
        .edit(Some(&claims()), &command(vec![42], "5678"), &CancellationToken::new())
        .await
        .expect_err("forbidden");
    assert_eq!(
        err,
        EditError::Forbidden("account not in operator's company".to_string())
    );
    assert!(entries(&harness.journal).is_empty());
}

#[tokio::test]
async fn account_without_site_association_is_forbidden() {
    let harness = harness(Setup {
        accounts: vec![account(11, "company-1", &["8"])],
        ..Setup::default()
    });
    let err = harness
        .service
        .edit(Some(&claims()), &command(vec![42], "5678"), &CancellationToken::new())
        .await
        .expect_err("forbidden");
    assert_eq!(
        err,
        EditError::Forbidden("account missing association with target site".to_string())
    );
}

#[tokio::test]
async fn unknown_unit_is_not_found() {
    let harness = harness(Setup::default());
    let err = harness
        .service
        .edit(Some(&claims()), &command(vec![99], "5678"), &CancellationToken::new())
        .await
        .expect_err("not found");
    assert_eq!(err, EditError::NotFound("unit not found: 99".to_string()));
}

#[tokio::test]
async fn unit_from_other_site_is_forbidden() {
    let harness = harness(Setup {
        units: vec![unit(42, 8, UnitRentalState::Normal)],
        ..Setup::default()
    });
    let err = harness
        .service
        .edit(Some(&claims()), &command(vec![42], "5678"), &CancellationToken::new())
        .await
        .expect_err("forbidden");
    assert_eq!(
        err,
        EditError::Forbidden("unit missing association with target site".to_string())
    );
    assert!(entries(&harness.journal).is_empty());
}

#[tokio::test]
async fn locked_unit_blocks_all_side_effects() {
    for state in [
        UnitRentalState::Overlock,
        UnitRentalState::Gatelock,
        UnitRentalState::Prelet,
    ] {
        let expected = format!("access code changes not allowed - unit in {}", state);
        let harness = harness(Setup {
            units: vec![unit(42, SITE, state)],
            ..Setup::default()
        });
        let err = harness
            .service
            .edit(Some(&claims()), &command(vec![42], "5678"), &CancellationToken::new())
            .await
            .expect_err("forbidden");
        assert_eq!(err, EditError::Forbidden(expected));
        assert!(entries(&harness.journal).is_empty());
    }
}

#[tokio::test]
async fn duplicate_code_from_other_account_is_conflict() {
    let harness = harness(Setup {
        codes: vec![stored("5678", 42, 12, AccessCodeState::Active)],
        ..Setup::default()
    });
    let err = harness
        .service
        .edit(Some(&claims()), &command(vec![42], "5678"), &CancellationToken::new())
        .await
        .expect_err("conflict");
    assert_eq!(err, EditError::Conflict("duplicate access code".to_string()));
    let journal = entries(&harness.journal);
    assert!(!journal.iter().any(|entry| entry.starts_with("write")));
    assert!(!has_command_center_calls(&journal));
}

#[tokio::test]
async fn malformed_code_is_bad_request() {
    let harness = harness(Setup::default());
    let err = harness
        .service
        .edit(Some(&claims()), &command(vec![42], "12a"), &CancellationToken::new())
        .await
        .expect_err("bad request");
    assert_eq!(
        err,
        EditError::BadRequest("invalid access code: non_numeric_code, invalid_length".to_string())
    );
}

#[tokio::test]
async fn revoke_failure_skips_set() {
    let harness = harness(Setup {
        codes: vec![stored("1111", 42, 11, AccessCodeState::Active)],
        behavior: CommandCenterBehavior {
            fail_revoke: true,
            ..CommandCenterBehavior::default()
        },
        ..Setup::default()
    });
    let err = harness
        .service
        .edit(Some(&claims()), &command(vec![42], "5678"), &CancellationToken::new())
        .await
        .expect_err("internal");
    assert_eq!(
        err,
        EditError::Internal(
            "failed to revoke previous access codes: dispatch error: lock offline".to_string()
        )
    );
    let journal = entries(&harness.journal);
    assert!(journal.contains(&"revoke:[42]".to_string()));
    assert!(!journal.iter().any(|entry| entry.starts_with("set")));
    // 持久化先于下发，失败后不回滚。
    assert!(journal.contains(&"write:42:5678:setup".to_string()));
}

#[tokio::test]
async fn locked_second_unit_keeps_first_unit_committed() {
    let harness = harness(Setup {
        units: vec![
            unit(42, SITE, UnitRentalState::Normal),
            unit(43, SITE, UnitRentalState::Overlock),
        ],
        ..Setup::default()
    });
    let err = harness
        .service
        .edit(
            Some(&claims()),
            &command(vec![42, 43], "5678"),
            &CancellationToken::new(),
        )
        .await
        .expect_err("forbidden");
    assert_eq!(
        err,
        EditError::Forbidden("access code changes not allowed - unit in overlock".to_string())
    );
    let journal = entries(&harness.journal);
    assert!(journal.contains(&"write:42:5678:setup".to_string()));
    assert!(journal.contains(&"set:[42]".to_string()));
    assert!(!journal.iter().any(|entry| entry.contains("43")));
}

#[tokio::test]
async fn zero_unit_id_is_skipped() {
    let harness = harness(Setup::default());
    let outcome = harness
        .service
        .edit(
            Some(&claims()),
            &command(vec![0, 42], "5678"),
            &CancellationToken::new(),
        )
        .await
        .expect("edit");
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.applied, 1);
}

#[tokio::test]
async fn cancellation_stops_remaining_units() {
    let harness = harness(Setup {
        units: vec![
            unit(42, SITE, UnitRentalState::Normal),
            unit(43, SITE, UnitRentalState::Normal),
        ],
        behavior: CommandCenterBehavior {
            cancel_after_set: true,
            ..CommandCenterBehavior::default()
        },
        ..Setup::default()
    });
    let err = harness
        .service
        .edit(
            Some(&claims()),
            &command(vec![42, 43], "5678"),
            &CancellationToken::new(),
        )
        .await
        .expect_err("cancelled");
    assert_eq!(err, EditError::Cancelled);
    let journal = entries(&harness.journal);
    assert!(journal.contains(&"set:[42]".to_string()));
    assert!(!journal.iter().any(|entry| entry.contains("43")));
}

#[tokio::test]
async fn already_cancelled_request_does_nothing() {
    let harness = harness(Setup::default());
    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = harness
        .service
        .edit(Some(&claims()), &command(vec![42], "5678"), &cancel)
        .await
        .expect_err("cancelled");
    assert_eq!(err, EditError::Cancelled);
    assert!(entries(&harness.journal).is_empty());
}

#[tokio::test]
async fn audit_failure_is_internal_after_commit() {
    let harness = harness(Setup {
        audit: Some(Arc::new(FailingAudit)),
        ..Setup::default()
    });
    let err = harness
        .service
        .edit(Some(&claims()), &command(vec![42], "5678"), &CancellationToken::new())
        .await
        .expect_err("internal");
    assert_eq!(
        err,
        EditError::Internal("recording activity failed: audit store down".to_string())
    );
    assert!(entries(&harness.journal).contains(&"set:[42]".to_string()));
}
