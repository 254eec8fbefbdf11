use domain::{AccessCodeState, GateAccessCode, OperatorClaims, UnitRentalState};

#[test]
fn operator_claims_builds() {
    let claims = OperatorClaims::new(7, "company-1", 42, "42");

    assert_eq!(claims.user_id, 7);
    assert_eq!(claims.company_id, "company-1");
    assert_eq!(claims.site_id, 42);
    assert_eq!(claims.site_external_id, "42");
    assert_eq!(claims.site_key(), "42");
}

#[test]
fn access_code_state_parses_wire_strings() {
    for state in AccessCodeState::ALL {
        let parsed: AccessCodeState = state.as_str().parse().expect("parse");
        assert_eq!(parsed, state);
    }
    assert_eq!(
        " Active ".parse::<AccessCodeState>().expect("parse"),
        AccessCodeState::Active
    );
    assert!("expired".parse::<AccessCodeState>().is_err());
}

#[test]
fn live_and_settled_states_are_disjoint() {
    let live: Vec<_> = AccessCodeState::ALL
        .into_iter()
        .filter(|state| state.is_live())
        .collect();
    assert_eq!(
        live,
        vec![
            AccessCodeState::Setup,
            AccessCodeState::Pending,
            AccessCodeState::Active
        ]
    );
    assert!(live.iter().all(|state| !state.is_settled()));
    // remove 既不是有效状态也不是已接管状态
    assert!(!AccessCodeState::Remove.is_live());
    assert!(!AccessCodeState::Remove.is_settled());
}

#[test]
fn rental_state_blocks_lock_states_only() {
    assert!(UnitRentalState::from("overlock").blocks_code_change());
    assert!(UnitRentalState::from("GATELOCK").blocks_code_change());
    assert!(UnitRentalState::from("prelet").blocks_code_change());
    assert!(!UnitRentalState::from("").blocks_code_change());
    let other = UnitRentalState::from("vacant");
    assert_eq!(other, UnitRentalState::Other("vacant".to_string()));
    assert!(!other.blocks_code_change());
}

#[test]
fn candidate_starts_in_setup() {
    let code = GateAccessCode::candidate("4321", 10, 3, 42);
    assert_eq!(code.state, AccessCodeState::Setup);
    assert!(!code.is_valid);
    assert!(code.validation_messages.is_empty());

    let stored = GateAccessCode::stored("4321", 10, 3, 42, AccessCodeState::Active);
    assert!(code.same_row(&stored));
}
