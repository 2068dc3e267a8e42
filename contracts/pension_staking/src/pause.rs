use common::access_control::{self, Role};
use soroban_sdk::{log, Address, Env};

use crate::{errors::ContractError, events, storage::PAUSED};

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// First guard of every mutating entry point.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Engage or release the global pause switch. Requires `Pauser`.
/// Setting the flag to its current value is a no-op without an event.
pub fn set_paused(env: &Env, caller: &Address, paused: bool) -> Result<(), ContractError> {
    access_control::require_role(env, caller, Role::Pauser)?;

    if is_paused(env) == paused {
        return Ok(());
    }
    env.storage().instance().set(&PAUSED, &paused);
    log!(env, "pause flag changed", paused);

    if paused {
        events::publish_paused(env, caller.clone());
    } else {
        events::publish_unpaused(env, caller.clone());
    }
    Ok(())
}
