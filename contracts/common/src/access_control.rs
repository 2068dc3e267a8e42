use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::CommonError;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");
const ROLE_MEMBERS: Symbol = symbol_short!("ROLE_MBR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Capabilities an account can hold. Roles are independent of each other:
/// holding one never implies another.
///
/// - `SuperAdmin` – Grants and revokes every role, authorises code upgrades
///                  and state migrations.
/// - `Admin`      – Mutates ledger configuration (tiers, fee, treasury).
/// - `Pauser`     – Engages and releases the global pause switch.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    SuperAdmin = 1,
    Admin = 2,
    Pauser = 3,
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn membership_key(role: Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role, account.clone())
}

fn members_key(role: Role) -> (Symbol, Role) {
    (ROLE_MEMBERS, role)
}

fn store_members(env: &Env, role: Role, members: &Vec<Address>) {
    let key = members_key(role);
    env.storage().persistent().set(&key, members);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Capability Table ─────────────────────────────────────────────────────────

/// Returns true if `account` currently holds `role`.
pub fn has_role(env: &Env, account: &Address, role: Role) -> bool {
    let key = membership_key(role, account);
    let held: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if held {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    held
}

/// Guard: `AccessDenied` unless `caller` holds `role`.
///
/// The caller must already have been authenticated via `require_auth()`.
pub fn require_role(env: &Env, caller: &Address, role: Role) -> Result<(), CommonError> {
    if has_role(env, caller, role) {
        Ok(())
    } else {
        Err(CommonError::AccessDenied)
    }
}

/// Returns every account holding `role`, in grant order.
pub fn members(env: &Env, role: Role) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&members_key(role))
        .unwrap_or(Vec::new(env))
}

/// Writes `role` for `account` without any authorisation check.
/// Only for bootstrapping; returns false if the role was already held.
pub fn set_role(env: &Env, account: &Address, role: Role) -> bool {
    if has_role(env, account, role) {
        return false;
    }
    let key = membership_key(role, account);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let mut list = members(env, role);
    list.push_back(account.clone());
    store_members(env, role, &list);
    true
}

/// Clears `role` for `account` without any authorisation check.
/// Refuses to remove the final `SuperAdmin`.
pub fn clear_role(env: &Env, account: &Address, role: Role) -> Result<bool, CommonError> {
    if !has_role(env, account, role) {
        return Ok(false);
    }
    let list = members(env, role);
    if role == Role::SuperAdmin && list.len() <= 1 {
        return Err(CommonError::LastSuperAdmin);
    }

    env.storage()
        .persistent()
        .remove(&membership_key(role, account));

    let mut remaining = Vec::new(env);
    for member in list.iter() {
        if member != *account {
            remaining.push_back(member);
        }
    }
    store_members(env, role, &remaining);
    Ok(true)
}

// ── Grant / Revoke ───────────────────────────────────────────────────────────

/// Grants `role` to `target`. Only a `SuperAdmin` may call this.
///
/// Returns `Ok(false)` when `target` already held the role.
pub fn grant_role(
    env: &Env,
    caller: &Address,
    target: &Address,
    role: Role,
) -> Result<bool, CommonError> {
    require_role(env, caller, Role::SuperAdmin)?;
    Ok(set_role(env, target, role))
}

/// Revokes `role` from `target`. Only a `SuperAdmin` may call this.
///
/// Returns `Ok(false)` when `target` did not hold the role.
pub fn revoke_role(
    env: &Env,
    caller: &Address,
    target: &Address,
    role: Role,
) -> Result<bool, CommonError> {
    require_role(env, caller, Role::SuperAdmin)?;
    clear_role(env, target, role)
}
