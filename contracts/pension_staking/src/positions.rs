//! Position ledger: append-only stake records and their one-way close.
//!
//! ```text
//! Open ──(now >= unlock_at)──▶ ClosedMatured  claimed = true, interest paid
//!   └───(now <  unlock_at)──▶ ClosedEarly    claimed = false, penalty taken
//! ```
//!
//! Both closed states are absorbing. Terms (`apy_basis_points`,
//! `interest_accrued`) are frozen when the position is opened.

use soroban_sdk::{contracttype, Address, Env, Symbol, Vec};

use crate::errors::ContractError;
use crate::interest;
use crate::storage::{self, NEXT_POSITION_ID, OWNER_POSITIONS, POSITION};
use crate::tiers::Tier;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub id: u64,
    pub owner: Address,
    pub created_at: u64,
    pub unlock_at: u64,
    pub apy_basis_points: u32,
    pub principal: i128,
    pub interest_accrued: i128,
    pub open: bool,
    pub claimed: bool,
}

/// Result of `check_withdrawal`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalCheck {
    pub can_withdraw: bool,
    pub is_early: bool,
    pub time_remaining: u64,
}

/// Value movements produced by closing a position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settlement {
    pub is_early: bool,
    /// Sent to the owner.
    pub payout: i128,
    /// Sent to the treasury (early closes only).
    pub penalty: i128,
    /// Added to the lifetime interest counter (matured closes only).
    pub interest_paid: i128,
    /// Interest written off by an early close.
    pub interest_forfeited: i128,
}

impl Settlement {
    /// Total value leaving escrow.
    pub fn outflow(&self) -> i128 {
        self.payout.saturating_add(self.penalty)
    }
}

impl Position {
    /// Build a fresh open position with terms snapshotted from `tier`.
    pub fn open(
        id: u64,
        owner: Address,
        tier: &Tier,
        amount: i128,
        now: u64,
    ) -> Result<Position, ContractError> {
        let interest_accrued = interest::interest(amount, tier.apy_basis_points)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let unlock_at = now
            .checked_add(tier.lock_duration())
            .ok_or(ContractError::ArithmeticOverflow)?;

        Ok(Position {
            id,
            owner,
            created_at: now,
            unlock_at,
            apy_basis_points: tier.apy_basis_points,
            principal: amount,
            interest_accrued,
            open: true,
            claimed: false,
        })
    }

    pub fn is_early(&self, now: u64) -> bool {
        now < self.unlock_at
    }

    pub fn withdrawal_check(&self, now: u64) -> WithdrawalCheck {
        WithdrawalCheck {
            can_withdraw: self.open,
            is_early: self.is_early(now),
            time_remaining: self.unlock_at.saturating_sub(now),
        }
    }

    /// Work out what closing at `now` would move, without changing anything.
    pub fn settlement(&self, fee_bps: u32, now: u64) -> Result<Settlement, ContractError> {
        if !self.open {
            return Err(ContractError::AlreadyClosed);
        }

        if self.is_early(now) {
            let penalty = interest::early_penalty(self.principal, fee_bps)
                .ok_or(ContractError::ArithmeticOverflow)?;
            Ok(Settlement {
                is_early: true,
                payout: self.principal - penalty,
                penalty,
                interest_paid: 0,
                interest_forfeited: self.interest_accrued,
            })
        } else {
            let payout = self
                .principal
                .checked_add(self.interest_accrued)
                .ok_or(ContractError::ArithmeticOverflow)?;
            Ok(Settlement {
                is_early: false,
                payout,
                penalty: 0,
                interest_paid: self.interest_accrued,
                interest_forfeited: 0,
            })
        }
    }

    /// Apply the open → closed transition described by `settlement`.
    pub fn close(&mut self, settlement: &Settlement) {
        self.open = false;
        self.claimed = !settlement.is_early;
    }
}

// ── Storage ─────────────────────────────────────────────────────────────────

fn position_key(id: u64) -> (Symbol, u64) {
    (POSITION, id)
}

fn owner_key(owner: &Address) -> (Symbol, Address) {
    (OWNER_POSITIONS, owner.clone())
}

/// Number of positions ever opened; also the id the next one receives.
pub fn count(env: &Env) -> u64 {
    env.storage().instance().get(&NEXT_POSITION_ID).unwrap_or(0)
}

pub fn get(env: &Env, id: u64) -> Option<Position> {
    storage::get_persistent(env, &position_key(id))
}

pub fn load(env: &Env, id: u64) -> Result<Position, ContractError> {
    get(env, id).ok_or(ContractError::NotFound)
}

pub fn save(env: &Env, position: &Position) {
    storage::set_persistent(env, &position_key(position.id), position);
}

/// Store a newly opened position, bump the id counter and index it under
/// its owner.
pub fn append(env: &Env, position: &Position) {
    save(env, position);
    env.storage()
        .instance()
        .set(&NEXT_POSITION_ID, &position.id.saturating_add(1));

    let mut ids = ids_by_owner(env, &position.owner);
    ids.push_back(position.id);
    storage::set_persistent(env, &owner_key(&position.owner), &ids);
}

/// Owner's position ids in creation order. Returned by value, so callers
/// hold a snapshot rather than a view of storage.
pub fn ids_by_owner(env: &Env, owner: &Address) -> Vec<u64> {
    storage::get_persistent(env, &owner_key(owner)).unwrap_or(Vec::new(env))
}
