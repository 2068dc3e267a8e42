#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pension_staking::{PensionStakingContract, PensionStakingContractClient, UNIT};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { user: u8, lock_days: u16, amount: i64 },
    Close { user: u8, position: u8 },
    Advance { seconds: u32 },
    SetTier { lock_days: u16, apy: u16, active: bool, min: i64, max: i64 },
    SetFee { bps: u16 },
    Fund { amount: i64 },
    Pause,
    Unpause,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let native = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(PensionStakingContract, ());
    let client = PensionStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let treasury = Address::generate(&env);
    client.initialize(&admin, &native, &treasury);

    let minter = StellarAssetClient::new(&env, &native);
    let mut users = vec![admin.clone()];
    for _ in 0..4 {
        users.push(Address::generate(&env));
    }
    for user in users.iter() {
        minter.mint(user, &(1_000_000_000 * UNIT));
    }

    let mut interest_paid = 0i128;

    for action in actions.into_iter() {
        match action {
            FuzzAction::Stake { user, lock_days, amount } => {
                let caller = &users[user as usize % users.len()];
                let _ = client.try_stake_tokens(caller, &(lock_days as u32), &(amount as i128));
            }
            FuzzAction::Close { user, position } => {
                let caller = &users[user as usize % users.len()];
                let _ = client.try_close_position(caller, &(position as u64));
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(seconds as u64));
            }
            FuzzAction::SetTier { lock_days, apy, active, min, max } => {
                let _ = client.try_set_staking_tier(
                    &admin,
                    &(lock_days as u32),
                    &(apy as u32),
                    &active,
                    &(min as i128),
                    &(max as i128),
                );
            }
            FuzzAction::SetFee { bps } => {
                let _ = client.try_set_early_withdrawal_fee(&admin, &(bps as u32));
            }
            FuzzAction::Fund { amount } => {
                let _ = client.try_fund(&admin, &(amount as i128));
            }
            FuzzAction::Pause => {
                let _ = client.try_pause(&admin);
            }
            FuzzAction::Unpause => {
                let _ = client.try_unpause(&admin);
            }
        }

        // Ledger-wide invariants must survive any sequence.
        let health = client.get_contract_health();
        let mut open_principal = 0i128;
        for id in 0..health.position_count {
            let position = client.get_position(&id);
            if position.claimed {
                assert!(!position.open);
                assert!(!client.check_withdrawal(&id).is_early);
            }
            if position.open {
                open_principal += position.principal;
            }
        }
        assert_eq!(health.total_staked, open_principal);
        assert!(health.total_interest_paid >= interest_paid);
        assert!(health.balance >= health.total_staked);
        assert!(client.get_early_withdrawal_fee() <= pension_staking::MAX_EARLY_WITHDRAWAL_FEE_BPS);
        interest_paid = health.total_interest_paid;
    }
});
