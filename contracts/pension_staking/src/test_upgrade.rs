use soroban_sdk::{
    testutils::{Address as _, Events as _},
    vec, Address, BytesN, Symbol, Vec,
};

use crate::storage::{self, CURRENT_SCHEMA_VERSION};
use crate::test::{expect_err, setup};
use crate::{ContractError, Position, Role, Tier, UNIT};

// ── Storage layout ────────────────────────────────────────────────────────────

#[test]
fn test_persisted_keys_are_stable() {
    let s = setup();
    let user = s.funded_user(UNIT);
    s.client.stake_tokens(&user, &365, &UNIT);
    let expected = s.client.get_position(&0);

    // Read back through literal key names, as a later code version would.
    s.env.as_contract(&s.client.address, || {
        let position: Position = s
            .env
            .storage()
            .persistent()
            .get(&(Symbol::new(&s.env, "POS"), 0u64))
            .unwrap();
        assert_eq!(position, expected);

        let tier: Tier = s
            .env
            .storage()
            .persistent()
            .get(&(Symbol::new(&s.env, "TIER"), 365u32))
            .unwrap();
        assert_eq!(tier.apy_basis_points, 1_200);

        let total: i128 = s
            .env
            .storage()
            .instance()
            .get(&Symbol::new(&s.env, "TOT_STK"))
            .unwrap();
        assert_eq!(total, UNIT);

        let next: u64 = s
            .env
            .storage()
            .instance()
            .get(&Symbol::new(&s.env, "NEXT_POS"))
            .unwrap();
        assert_eq!(next, 1);
    });
}

#[test]
fn test_tier_order_is_the_only_tier_list_persisted() {
    let s = setup();
    s.client
        .set_staking_tier(&s.admin, &90, &500, &false, &0, &UNIT);

    s.env.as_contract(&s.client.address, || {
        let instance = s.env.storage().instance();
        let order: Vec<u32> = instance.get(&Symbol::new(&s.env, "TIER_ACT")).unwrap();
        assert_eq!(order, vec![&s.env, 365u32, 730, 1_825]);
        assert!(!instance.has(&Symbol::new(&s.env, "TIER_KEYS")));
    });
}

// ── Migration ─────────────────────────────────────────────────────────────────

#[test]
fn test_migrate_when_current_is_a_no_op() {
    let s = setup();
    let user = s.funded_user(UNIT);
    s.client.stake_tokens(&user, &365, &UNIT);
    let before = s.client.get_position(&0);

    assert_eq!(s.client.migrate(&s.admin), CURRENT_SCHEMA_VERSION);
    let published = s.env.events().all().filter_by_contract(&s.client.address);
    assert!(published.events().is_empty());

    assert_eq!(s.client.migrate(&s.admin), CURRENT_SCHEMA_VERSION);
    assert_eq!(s.client.get_schema_version(), CURRENT_SCHEMA_VERSION);
    assert_eq!(s.client.get_position(&0), before);
}

#[test]
fn test_unversioned_state_migrates_and_stays_readable() {
    let s = setup();
    let user = s.funded_user(UNIT);
    s.client.stake_tokens(&user, &365, &UNIT);
    let before = s.client.get_position(&0);

    // State written before the schema marker existed.
    s.env.as_contract(&s.client.address, || {
        s.env.storage().instance().remove(&storage::SCHEMA_VERSION);
    });
    assert_eq!(s.client.get_schema_version(), 0);

    assert_eq!(s.client.migrate(&s.admin), 1);
    let published = s.env.events().all().filter_by_contract(&s.client.address);
    assert_eq!(published.events().len(), 1);
    assert_eq!(s.client.get_schema_version(), 1);
    assert_eq!(s.client.get_position(&0), before);
    assert_eq!(s.client.get_total_staked(), UNIT);
    assert_eq!(s.client.close_position(&user, &0), 9_000_000);
}

#[test]
fn test_newer_schema_is_refused() {
    let s = setup();
    s.env.as_contract(&s.client.address, || {
        storage::stamp_schema_version(&s.env, CURRENT_SCHEMA_VERSION + 1);
    });
    expect_err(s.client.try_migrate(&s.admin), ContractError::UnsupportedSchema);
}

#[test]
fn test_migrate_requires_super_admin() {
    let s = setup();
    let admin = Address::generate(&s.env);
    s.client.grant_role(&s.admin, &admin, &Role::Admin);
    s.env.as_contract(&s.client.address, || {
        s.env.storage().instance().remove(&storage::SCHEMA_VERSION);
    });

    expect_err(s.client.try_migrate(&admin), ContractError::Unauthorized);
    assert_eq!(s.client.get_schema_version(), 0);
}

// ── Upgrade entry point ───────────────────────────────────────────────────────

#[test]
fn test_upgrade_requires_super_admin() {
    let s = setup();
    let admin = Address::generate(&s.env);
    s.client.grant_role(&s.admin, &admin, &Role::Admin);

    let hash = BytesN::from_array(&s.env, &[7u8; 32]);
    expect_err(s.client.try_upgrade(&admin, &hash), ContractError::Unauthorized);
}
