//! Tier registry: lock-duration keyed staking plans.
//!
//! Tiers are upserted, never deleted. Deactivation (`active = false`) stops
//! new stakes while positions opened under the tier keep their snapshot.

use soroban_sdk::{contracttype, Env, Symbol, Vec};

use crate::errors::ContractError;
use crate::storage::{self, ACTIVATION_ORDER, TIER};

pub const SECONDS_PER_DAY: u64 = 86_400;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tier {
    pub lock_days: u32,
    pub apy_basis_points: u32,
    pub active: bool,
    pub min_stake: i128,
    pub max_stake: i128,
}

impl Tier {
    /// Lock duration in seconds.
    pub fn lock_duration(&self) -> u64 {
        (self.lock_days as u64).saturating_mul(SECONDS_PER_DAY)
    }

    pub fn check_amount(&self, amount: i128) -> Result<(), ContractError> {
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if amount < self.min_stake {
            return Err(ContractError::BelowMinimum);
        }
        if amount > self.max_stake {
            return Err(ContractError::AboveMaximum);
        }
        Ok(())
    }
}

fn tier_key(lock_days: u32) -> (Symbol, u32) {
    (TIER, lock_days)
}

pub fn validate(tier: &Tier) -> Result<(), ContractError> {
    if tier.lock_days == 0 {
        return Err(ContractError::InvalidLockDuration);
    }
    if tier.min_stake < 0 || tier.min_stake > tier.max_stake {
        return Err(ContractError::InvalidRange);
    }
    Ok(())
}

pub fn get(env: &Env, lock_days: u32) -> Option<Tier> {
    storage::get_persistent(env, &tier_key(lock_days))
}

/// Tier a new stake may be opened under: registered and active.
pub fn get_stakeable(env: &Env, lock_days: u32) -> Result<Tier, ContractError> {
    match get(env, lock_days) {
        Some(tier) if tier.active => Ok(tier),
        _ => Err(ContractError::UnknownTier),
    }
}

/// Validate and store `tier`, replacing any previous configuration.
pub fn upsert(env: &Env, tier: &Tier) -> Result<(), ContractError> {
    validate(tier)?;

    if tier.active {
        let mut order = activation_order(env);
        if !order.contains(tier.lock_days) {
            order.push_back(tier.lock_days);
            env.storage().instance().set(&ACTIVATION_ORDER, &order);
        }
    }

    storage::set_persistent(env, &tier_key(tier.lock_days), tier);
    Ok(())
}

fn activation_order(env: &Env) -> Vec<u32> {
    env.storage()
        .instance()
        .get(&ACTIVATION_ORDER)
        .unwrap_or(Vec::new(env))
}

/// Keys of currently active tiers, ordered by when each was first activated.
pub fn active_keys(env: &Env) -> Vec<u32> {
    let mut active = Vec::new(env);
    for lock_days in activation_order(env).iter() {
        if let Some(tier) = get(env, lock_days) {
            if tier.active {
                active.push_back(lock_days);
            }
        }
    }
    active
}
