use domain::OperatorClaims;
use gate_storage::{
    ACTION_ACCESS_CODE_EDIT, AccountRecord, AuditLogStore, AuditRecorder, InMemoryAuditLogStore,
    StoreAuditRecorder,
};
use std::sync::Arc;

fn account() -> AccountRecord {
    AccountRecord {
        account_id: 11,
        company_id: "company-1".to_string(),
        site_ids: vec!["7".to_string()],
    }
}

#[tokio::test]
async fn recorder_writes_edit_event() {
    let store = Arc::new(InMemoryAuditLogStore::new());
    let recorder = StoreAuditRecorder::new(store.clone());
    let audit_id = recorder
        .record_access_code_edit(3, &account(), "site-ext-7", 1_000)
        .await
        .expect("record");

    let claims = OperatorClaims::new(3, "company-1", 7, "site-ext-7");
    let logs = store
        .list_audit_logs(&claims, None, None, 10)
        .await
        .expect("list");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].audit_id, audit_id);
    assert_eq!(logs[0].action, ACTION_ACCESS_CODE_EDIT);
    assert_eq!(logs[0].resource, "account:11");
    assert_eq!(logs[0].actor, "3");
}

#[tokio::test]
async fn list_filters_by_site_and_time_window() {
    let store = Arc::new(InMemoryAuditLogStore::new());
    let recorder = StoreAuditRecorder::new(store.clone());
    for ts in [1_000, 2_000, 3_000] {
        recorder
            .record_access_code_edit(3, &account(), "site-ext-7", ts)
            .await
            .expect("record");
    }
    recorder
        .record_access_code_edit(3, &account(), "site-ext-9", 2_500)
        .await
        .expect("record");

    let claims = OperatorClaims::new(3, "company-1", 7, "site-ext-7");
    let logs = store
        .list_audit_logs(&claims, Some(1_500), Some(3_000), 10)
        .await
        .expect("list");
    let ts: Vec<i64> = logs.iter().map(|log| log.ts_ms).collect();
    assert_eq!(ts, vec![3_000, 2_000]);

    let limited = store
        .list_audit_logs(&claims, None, None, 1)
        .await
        .expect("list");
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].ts_ms, 3_000);
}
