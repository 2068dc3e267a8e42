//! Random operation sequences against one ledger.
//!
//! After every operation, successful or not:
//! - sum of principal over open positions == `total_staked`
//! - `total_interest_paid` never decreases
//! - every id listed for an owner belongs to that owner
//! - a closed position never reopens and its frozen terms never change
//! - escrow always covers the principal still at stake

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::Address;

use pension_staking::Position;

use crate::harness::{Harness, DAY, UNIT};

const USERS: usize = 3;
const LOCKS: [u32; 3] = [365, 730, 1_825];

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Stake {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
        #[proptest(strategy = "0usize..3")]
        tier: usize,
        #[proptest(strategy = "1i128..=50")]
        units: i128,
    },
    Close {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
        #[proptest(strategy = "0u64..12")]
        position: u64,
    },
    Advance {
        #[proptest(strategy = "0u64..=800")]
        days: u64,
    },
    SetApy {
        #[proptest(strategy = "0usize..3")]
        tier: usize,
        #[proptest(strategy = "0u32..=10_000")]
        apy: u32,
    },
    SetFee {
        #[proptest(strategy = "0u32..=6_000")]
        bps: u32,
    },
    TogglePause,
}

struct Model {
    users: Vec<Address>,
    /// Position as first observed, used to check frozen terms.
    opened: Vec<Position>,
    closed: Vec<bool>,
    interest_paid: i128,
}

fn apply(h: &Harness, model: &mut Model, op: &Op) {
    match *op {
        Op::Stake { user, tier, units } => {
            let owner = &model.users[user];
            if let Ok(Ok(id)) = h.client.try_stake_tokens(owner, &LOCKS[tier], &(units * UNIT)) {
                assert_eq!(id as usize, model.opened.len());
                model.opened.push(h.client.get_position(&id));
                model.closed.push(false);
            }
        }
        Op::Close { user, position } => {
            let _ = h.client.try_close_position(&model.users[user], &position);
        }
        Op::Advance { days } => h.advance(days * DAY),
        Op::SetApy { tier, apy } => {
            let current = h.client.get_tier(&LOCKS[tier]).unwrap();
            let _ = h.client.try_set_staking_tier(
                &h.admin,
                &LOCKS[tier],
                &apy,
                &current.active,
                &current.min_stake,
                &current.max_stake,
            );
        }
        Op::SetFee { bps } => {
            let _ = h.client.try_set_early_withdrawal_fee(&h.admin, &bps);
        }
        Op::TogglePause => {
            if h.client.is_paused() {
                h.client.unpause(&h.admin);
            } else {
                h.client.pause(&h.admin);
            }
        }
    }
}

fn check_invariants(h: &Harness, model: &mut Model) {
    let mut open_principal = 0i128;
    for (i, opened) in model.opened.iter().enumerate() {
        let now = h.client.get_position(&(i as u64));

        assert_eq!(now.owner, opened.owner);
        assert_eq!(now.principal, opened.principal);
        assert_eq!(now.apy_basis_points, opened.apy_basis_points);
        assert_eq!(now.interest_accrued, opened.interest_accrued);
        assert_eq!(now.unlock_at, opened.unlock_at);

        if model.closed[i] {
            assert!(!now.open, "position {} reopened", i);
        }
        if now.open {
            open_principal += now.principal;
        } else {
            model.closed[i] = true;
        }
    }

    let health = h.client.get_contract_health();
    assert_eq!(health.total_staked, open_principal);
    assert_eq!(health.position_count, model.opened.len() as u64);
    assert!(health.balance >= health.total_staked);

    assert!(health.total_interest_paid >= model.interest_paid);
    model.interest_paid = health.total_interest_paid;

    for user in model.users.iter() {
        for id in h.client.get_positions_by_address(user).iter() {
            assert_eq!(h.client.get_position(&id).owner, *user);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_ledger_invariants_hold(ops in prop::collection::vec(any::<Op>(), 1..24)) {
        let h = Harness::new();
        h.fund_escrow(10_000 * UNIT);

        let mut model = Model {
            users: (0..USERS).map(|_| h.funded_user(1_000 * UNIT)).collect(),
            opened: Vec::new(),
            closed: Vec::new(),
            interest_paid: 0,
        };

        for op in ops.iter() {
            apply(&h, &mut model, op);
            check_invariants(&h, &mut model);
        }
    }

    #[test]
    fn prop_paused_ledger_rejects_every_stake_and_close(
        ops in prop::collection::vec(any::<Op>(), 1..12),
    ) {
        let h = Harness::new();
        let user = h.funded_user(100 * UNIT);
        h.client.stake_tokens(&user, &365, &UNIT);
        h.client.pause(&h.admin);

        for op in ops.iter() {
            match *op {
                Op::Stake { tier, units, .. } => {
                    let result = h.client.try_stake_tokens(&user, &LOCKS[tier], &(units * UNIT));
                    prop_assert_eq!(
                        result.err().and_then(|e| e.ok()),
                        Some(pension_staking::ContractError::Paused)
                    );
                }
                Op::Close { position, .. } => {
                    let result = h.client.try_close_position(&user, &position);
                    prop_assert_eq!(
                        result.err().and_then(|e| e.ok()),
                        Some(pension_staking::ContractError::Paused)
                    );
                }
                Op::Advance { days } => h.advance(days * DAY),
                _ => {}
            }
        }
        prop_assert_eq!(h.client.get_total_staked(), UNIT);
        prop_assert!(h.client.get_position(&0).open);
    }
}
