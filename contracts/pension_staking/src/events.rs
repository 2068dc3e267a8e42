#![allow(deprecated)] // events().publish migration tracked separately

use common::Role;
use soroban_sdk::{symbol_short, Address, BytesN, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub native_token: Address,
    pub treasury: Address,
    pub schema_version: u32,
    pub timestamp: u64,
}

/// Fired whenever a tier is created or overwritten.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierUpdatedEvent {
    pub lock_days: u32,
    pub apy_basis_points: u32,
    pub active: bool,
    pub min_stake: i128,
    pub max_stake: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionCreatedEvent {
    pub position_id: u64,
    pub owner: Address,
    pub lock_days: u32,
    pub principal: i128,
    pub interest_accrued: i128,
    pub unlock_at: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionClosedEvent {
    pub position_id: u64,
    pub owner: Address,
    pub payout: i128,
    pub penalty: i128,
    pub interest_forfeited: i128,
    pub is_early: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeUpdatedEvent {
    pub old_fee_bps: u32,
    pub new_fee_bps: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasuryUpdatedEvent {
    pub old_treasury: Address,
    pub new_treasury: Address,
    pub timestamp: u64,
}

/// Fired when the pause switch changes state.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseEvent {
    pub caller: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
    pub timestamp: u64,
}

/// Fired when escrow is topped up to back future interest.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradedEvent {
    pub caller: Address,
    pub new_wasm_hash: BytesN<32>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigratedEvent {
    pub from_version: u32,
    pub to_version: u32,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    native_token: Address,
    treasury: Address,
    schema_version: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            native_token,
            treasury,
            schema_version,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tier_updated(
    env: &Env,
    lock_days: u32,
    apy_basis_points: u32,
    active: bool,
    min_stake: i128,
    max_stake: i128,
) {
    env.events().publish(
        (symbol_short!("TIER_UPD"), lock_days),
        TierUpdatedEvent {
            lock_days,
            apy_basis_points,
            active,
            min_stake,
            max_stake,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_position_created(
    env: &Env,
    position_id: u64,
    owner: Address,
    lock_days: u32,
    principal: i128,
    interest_accrued: i128,
    unlock_at: u64,
) {
    env.events().publish(
        (symbol_short!("POS_OPEN"), owner.clone()),
        PositionCreatedEvent {
            position_id,
            owner,
            lock_days,
            principal,
            interest_accrued,
            unlock_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_position_closed(
    env: &Env,
    position_id: u64,
    owner: Address,
    payout: i128,
    penalty: i128,
    interest_forfeited: i128,
    is_early: bool,
) {
    env.events().publish(
        (symbol_short!("POS_CLOSE"), owner.clone()),
        PositionClosedEvent {
            position_id,
            owner,
            payout,
            penalty,
            interest_forfeited,
            is_early,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fee_updated(env: &Env, old_fee_bps: u32, new_fee_bps: u32) {
    env.events().publish(
        (symbol_short!("FEE_SET"),),
        FeeUpdatedEvent {
            old_fee_bps,
            new_fee_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_treasury_updated(env: &Env, old_treasury: Address, new_treasury: Address) {
    env.events().publish(
        (symbol_short!("TRSY_SET"),),
        TreasuryUpdatedEvent {
            old_treasury,
            new_treasury,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        PauseEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unpaused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("UNPAUSED"),),
        PauseEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_granted(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_GRNT"), account.clone()),
        RoleChangedEvent {
            role,
            account,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_revoked(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_RVK"), account.clone()),
        RoleChangedEvent {
            role,
            account,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_funded(env: &Env, funder: Address, amount: i128, new_balance: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        FundedEvent {
            funder,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_upgraded(env: &Env, caller: Address, new_wasm_hash: BytesN<32>) {
    env.events().publish(
        (symbol_short!("UPGRADED"),),
        UpgradedEvent {
            caller,
            new_wasm_hash,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_migrated(env: &Env, from_version: u32, to_version: u32) {
    env.events().publish(
        (symbol_short!("MIGRATED"),),
        MigratedEvent {
            from_version,
            to_version,
            timestamp: env.ledger().timestamp(),
        },
    );
}
