//! Persisted-state layout.
//!
//! Key symbols below are part of the on-ledger format. New keys may be
//! appended; an existing symbol is never renamed, removed or reused for a
//! value of another type. Stored structs only grow at the end, and only
//! together with a new schema version and a step in [`migrate`].

use soroban_sdk::{symbol_short, Env, IntoVal, Symbol, TryFromVal, Val};

use crate::errors::ContractError;

// ── Instance keys (configuration & counters) ────────────────────────────────

pub const INITIALIZED: Symbol = symbol_short!("INIT");
pub const NATIVE_TOKEN: Symbol = symbol_short!("NAT_TOK");
pub const TREASURY: Symbol = symbol_short!("TREASURY");
pub const FEE_BPS: Symbol = symbol_short!("FEE_BPS");
pub const PAUSED: Symbol = symbol_short!("PAUSED");
pub const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
pub const TOTAL_INTEREST_PAID: Symbol = symbol_short!("TOT_INT");
pub const NEXT_POSITION_ID: Symbol = symbol_short!("NEXT_POS");
pub const ACTIVATION_ORDER: Symbol = symbol_short!("TIER_ACT");
pub const SCHEMA_VERSION: Symbol = symbol_short!("SCHEMA");

// ── Persistent key prefixes ─────────────────────────────────────────────────

pub const TIER: Symbol = symbol_short!("TIER");
pub const POSITION: Symbol = symbol_short!("POS");
pub const OWNER_POSITIONS: Symbol = symbol_short!("OWN_POS");

pub const TTL_THRESHOLD: u32 = 5184000;
pub const TTL_EXTEND_TO: u32 = 10368000;

/// Layout version written by this code.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ── Accessors ───────────────────────────────────────────────────────────────

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn get_persistent<K, V>(env: &Env, key: &K) -> Option<V>
where
    K: IntoVal<Env, Val>,
    V: TryFromVal<Env, Val>,
{
    let value: Option<V> = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    value
}

pub fn set_persistent<K, V>(env: &Env, key: &K, value: &V)
where
    K: IntoVal<Env, Val>,
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn get_amount(env: &Env, key: &Symbol) -> i128 {
    env.storage().instance().get(key).unwrap_or(0)
}

pub fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !env.storage().instance().has(&INITIALIZED) {
        return Err(ContractError::NotInitialized);
    }
    extend_instance_ttl(env);
    Ok(())
}

// ── Schema versioning ───────────────────────────────────────────────────────

/// Version of the layout currently on the ledger. State written before the
/// version key existed reads as `0`.
pub fn stored_schema_version(env: &Env) -> u32 {
    env.storage().instance().get(&SCHEMA_VERSION).unwrap_or(0)
}

pub fn stamp_schema_version(env: &Env, version: u32) {
    env.storage().instance().set(&SCHEMA_VERSION, &version);
}

/// Apply every migration step from the stored version up to
/// [`CURRENT_SCHEMA_VERSION`]. Returns the `(from, to)` versions; when the
/// layout is already current nothing is written and `from == to`.
pub fn migrate(env: &Env) -> Result<(u32, u32), ContractError> {
    let from = stored_schema_version(env);
    if from > CURRENT_SCHEMA_VERSION {
        return Err(ContractError::UnsupportedSchema);
    }
    if from == CURRENT_SCHEMA_VERSION {
        return Ok((from, from));
    }

    let mut version = from;
    while version < CURRENT_SCHEMA_VERSION {
        version = match version {
            0 => migrate_v0_to_v1(env),
            _ => return Err(ContractError::UnsupportedSchema),
        };
    }
    stamp_schema_version(env, version);
    Ok((from, version))
}

/// Unversioned state already uses the v1 layout; only the marker is new.
fn migrate_v0_to_v1(_env: &Env) -> u32 {
    1
}
