use domain::UnitRentalState;
use gate_storage::{
    AccountRecord, AccountStore, InMemoryAccountStore, InMemoryUnitStore, UnitRecord, UnitStore,
};

#[tokio::test]
async fn find_account_returns_none_when_missing() {
    let store = InMemoryAccountStore::with_accounts([AccountRecord {
        account_id: 11,
        company_id: "company-1".to_string(),
        site_ids: vec!["7".to_string()],
    }]);
    let account = store.find_account(11).await.expect("query").expect("account");
    assert_eq!(account.company_id, "company-1");
    assert!(account.has_site("7"));
    assert!(!account.has_site("8"));

    let missing = store.find_account(12).await.expect("query");
    assert!(missing.is_none());
}

#[tokio::test]
async fn find_unit_ignores_requested_site() {
    let store = InMemoryUnitStore::with_units([UnitRecord {
        unit_id: 42,
        site_id: 8,
        rental_state: UnitRentalState::Normal,
    }]);
    let unit = store.find_unit(42, 7).await.expect("query").expect("unit");
    assert_eq!(unit.site_id, 8);
    assert!(store.find_unit(43, 7).await.expect("query").is_none());
}

#[tokio::test]
async fn insert_overwrites_existing_unit() {
    let store = InMemoryUnitStore::new();
    store
        .insert(UnitRecord {
            unit_id: 42,
            site_id: 7,
            rental_state: UnitRentalState::Normal,
        })
        .expect("insert");
    store
        .insert(UnitRecord {
            unit_id: 42,
            site_id: 7,
            rental_state: UnitRentalState::from("Overlock"),
        })
        .expect("insert");
    let unit = store.find_unit(42, 7).await.expect("query").expect("unit");
    assert_eq!(unit.rental_state, UnitRentalState::Overlock);
}
