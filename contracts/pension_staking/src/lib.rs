#![no_std]

pub mod errors;
pub mod events;
pub mod interest;
pub mod pause;
pub mod positions;
pub mod storage;
pub mod tiers;

use common::access_control;
use soroban_sdk::{
    contract, contractimpl, contracttype, log, token, Address, BytesN, Env, Vec,
};

pub use common::Role;
pub use errors::{ContractError, ErrorCategory};
pub use positions::{Position, WithdrawalCheck};
pub use tiers::Tier;

use storage::{
    FEE_BPS, INITIALIZED, NATIVE_TOKEN, TOTAL_INTEREST_PAID, TOTAL_STAKED, TREASURY,
};

// ── Configuration ────────────────────────────────────────────────────────────

/// Upper bound for the early-withdrawal fee (50 %).
pub const MAX_EARLY_WITHDRAWAL_FEE_BPS: u32 = 5_000;
pub const DEFAULT_EARLY_WITHDRAWAL_FEE_BPS: u32 = 1_000;

/// One whole unit of the native asset (7 decimals).
pub const UNIT: i128 = 10_000_000;
pub const DEFAULT_MIN_STAKE: i128 = UNIT / 10;
pub const DEFAULT_MAX_STAKE: i128 = 1_000_000 * UNIT;

/// `(lock_days, apy_basis_points)` seeded by `initialize`.
pub const DEFAULT_TIERS: [(u32, u32); 3] = [(365, 1_200), (730, 2_500), (1_825, 7_500)];

// ── Public-facing types ──────────────────────────────────────────────────────

/// Aggregate view returned by `get_contract_health`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractHealth {
    pub balance: i128,
    pub total_staked: i128,
    pub total_interest_paid: i128,
    pub position_count: u64,
    pub is_paused: bool,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct PensionStakingContract;

#[contractimpl]
impl PensionStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `admin`        – receives `SuperAdmin`, `Admin` and `Pauser`.
    /// * `native_token` – asset contract of the native value being staked.
    /// * `treasury`     – recipient of early-withdrawal penalties.
    pub fn initialize(
        env: Env,
        admin: Address,
        native_token: Address,
        treasury: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        for role in [Role::SuperAdmin, Role::Admin, Role::Pauser] {
            access_control::set_role(&env, &admin, role);
        }

        for (lock_days, apy_basis_points) in DEFAULT_TIERS {
            tiers::upsert(
                &env,
                &Tier {
                    lock_days,
                    apy_basis_points,
                    active: true,
                    min_stake: DEFAULT_MIN_STAKE,
                    max_stake: DEFAULT_MAX_STAKE,
                },
            )?;
        }

        env.storage().instance().set(&NATIVE_TOKEN, &native_token);
        env.storage().instance().set(&TREASURY, &treasury);
        env.storage()
            .instance()
            .set(&FEE_BPS, &DEFAULT_EARLY_WITHDRAWAL_FEE_BPS);
        storage::stamp_schema_version(&env, storage::CURRENT_SCHEMA_VERSION);
        env.storage().instance().set(&INITIALIZED, &true);
        storage::extend_instance_ttl(&env);
        // TOTAL_STAKED, TOTAL_INTEREST_PAID, NEXT_POS and PAUSED start at
        // their zero values; readers default absent keys.

        events::publish_initialized(
            &env,
            admin,
            native_token,
            treasury,
            storage::CURRENT_SCHEMA_VERSION,
        );

        Ok(())
    }

    // ── Positions ───────────────────────────────────────────────────────────

    /// Lock `amount` of native value into the tier keyed by `lock_days`.
    ///
    /// Returns the new position id. Interest is fixed now from the tier's
    /// current APY; later tier edits never touch it.
    pub fn stake_tokens(
        env: Env,
        staker: Address,
        lock_days: u32,
        amount: i128,
    ) -> Result<u64, ContractError> {
        pause::require_not_paused(&env)?;
        storage::require_initialized(&env)?;
        staker.require_auth();

        let tier = tiers::get_stakeable(&env, lock_days)?;
        tier.check_amount(amount)?;

        let now = env.ledger().timestamp();
        let position = Position::open(positions::count(&env), staker.clone(), &tier, amount, now)?;
        let new_total = storage::get_amount(&env, &TOTAL_STAKED)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let native = Self::native_token(&env)?;

        // Effects.
        positions::append(&env, &position);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        // Interaction: escrow the principal.
        token::Client::new(&env, &native).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        log!(&env, "position opened", position.id, amount);
        events::publish_position_created(
            &env,
            position.id,
            staker,
            lock_days,
            amount,
            position.interest_accrued,
            position.unlock_at,
        );

        Ok(position.id)
    }

    /// Close `position_id` and pay it out.
    ///
    /// At or after `unlock_at` the owner receives principal plus the interest
    /// fixed at stake time. Before it, the early-withdrawal fee is withheld
    /// from principal and sent to the treasury, and the interest is forfeited.
    /// Returns the amount paid to the owner.
    pub fn close_position(
        env: Env,
        owner: Address,
        position_id: u64,
    ) -> Result<i128, ContractError> {
        pause::require_not_paused(&env)?;
        storage::require_initialized(&env)?;
        owner.require_auth();

        let mut position = positions::load(&env, position_id)?;
        if position.owner != owner {
            return Err(ContractError::NotOwner);
        }

        let fee_bps = Self::get_early_withdrawal_fee(env.clone());
        let now = env.ledger().timestamp();
        let settlement = position.settlement(fee_bps, now)?;

        // Principal of every other open position stays reserved; only the
        // remainder of escrow may fund this payout.
        let new_total_staked = storage::get_amount(&env, &TOTAL_STAKED)
            .checked_sub(position.principal)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let native = Self::native_token(&env)?;
        let treasury = Self::treasury(&env)?;
        let token = token::Client::new(&env, &native);
        let escrow = token.balance(&env.current_contract_address());
        if escrow.saturating_sub(new_total_staked) < settlement.outflow() {
            return Err(ContractError::InsufficientLiquidity);
        }

        let new_interest_paid = storage::get_amount(&env, &TOTAL_INTEREST_PAID)
            .checked_add(settlement.interest_paid)
            .ok_or(ContractError::ArithmeticOverflow)?;

        // Effects: everything is committed before value leaves escrow.
        position.close(&settlement);
        positions::save(&env, &position);
        env.storage().instance().set(&TOTAL_STAKED, &new_total_staked);
        env.storage()
            .instance()
            .set(&TOTAL_INTEREST_PAID, &new_interest_paid);

        // Interactions: penalty to treasury, then the owner's payout last.
        if settlement.penalty > 0 {
            token.transfer(
                &env.current_contract_address(),
                &treasury,
                &settlement.penalty,
            );
        }
        if settlement.payout > 0 {
            token.transfer(&env.current_contract_address(), &owner, &settlement.payout);
        }

        log!(
            &env,
            "position closed",
            position_id,
            settlement.payout,
            settlement.is_early
        );
        events::publish_position_closed(
            &env,
            position_id,
            owner,
            settlement.payout,
            settlement.penalty,
            settlement.interest_forfeited,
            settlement.is_early,
        );

        Ok(settlement.payout)
    }

    /// Top up escrow so future interest can be paid.
    pub fn fund(env: Env, funder: Address, amount: i128) -> Result<(), ContractError> {
        pause::require_not_paused(&env)?;
        storage::require_initialized(&env)?;
        funder.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let token = token::Client::new(&env, &Self::native_token(&env)?);
        token.transfer(&funder, &env.current_contract_address(), &amount);
        let new_balance = token.balance(&env.current_contract_address());

        events::publish_funded(&env, funder, amount, new_balance);
        Ok(())
    }

    // ── Admin: tiers & fees ─────────────────────────────────────────────────

    /// Create or overwrite the tier keyed by `lock_days`. Requires `Admin`.
    ///
    /// Existing positions keep the APY and interest they were opened with.
    pub fn set_staking_tier(
        env: Env,
        caller: Address,
        lock_days: u32,
        apy_basis_points: u32,
        active: bool,
        min_stake: i128,
        max_stake: i128,
    ) -> Result<(), ContractError> {
        pause::require_not_paused(&env)?;
        storage::require_initialized(&env)?;
        caller.require_auth();
        access_control::require_role(&env, &caller, Role::Admin)?;

        tiers::upsert(
            &env,
            &Tier {
                lock_days,
                apy_basis_points,
                active,
                min_stake,
                max_stake,
            },
        )?;

        events::publish_tier_updated(
            &env,
            lock_days,
            apy_basis_points,
            active,
            min_stake,
            max_stake,
        );
        Ok(())
    }

    /// Requires `Admin`; `bps` may not exceed `MAX_EARLY_WITHDRAWAL_FEE_BPS`.
    pub fn set_early_withdrawal_fee(
        env: Env,
        caller: Address,
        bps: u32,
    ) -> Result<(), ContractError> {
        pause::require_not_paused(&env)?;
        storage::require_initialized(&env)?;
        caller.require_auth();
        access_control::require_role(&env, &caller, Role::Admin)?;

        if bps > MAX_EARLY_WITHDRAWAL_FEE_BPS {
            return Err(ContractError::FeeTooHigh);
        }

        let old = Self::get_early_withdrawal_fee(env.clone());
        env.storage().instance().set(&FEE_BPS, &bps);

        events::publish_fee_updated(&env, old, bps);
        Ok(())
    }

    /// Redirect future early-withdrawal penalties. Requires `Admin`.
    pub fn set_treasury(
        env: Env,
        caller: Address,
        treasury: Address,
    ) -> Result<(), ContractError> {
        pause::require_not_paused(&env)?;
        storage::require_initialized(&env)?;
        caller.require_auth();
        access_control::require_role(&env, &caller, Role::Admin)?;

        let old = Self::treasury(&env)?;
        env.storage().instance().set(&TREASURY, &treasury);

        events::publish_treasury_updated(&env, old, treasury);
        Ok(())
    }

    // ── Pause switch ────────────────────────────────────────────────────────

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        caller.require_auth();
        pause::set_paused(&env, &caller, true)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        caller.require_auth();
        pause::set_paused(&env, &caller, false)
    }

    pub fn is_paused(env: Env) -> bool {
        pause::is_paused(&env)
    }

    // ── Roles ───────────────────────────────────────────────────────────────

    /// Grant `role` to `account`. Only a `SuperAdmin` may call this.
    pub fn grant_role(
        env: Env,
        caller: Address,
        account: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        caller.require_auth();
        if access_control::grant_role(&env, &caller, &account, role)? {
            events::publish_role_granted(&env, role, account, caller);
        }
        Ok(())
    }

    /// Revoke `role` from `account`. Only a `SuperAdmin` may call this, and
    /// the last `SuperAdmin` can never be removed.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        account: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        caller.require_auth();
        if access_control::revoke_role(&env, &caller, &account, role)? {
            events::publish_role_revoked(&env, role, account, caller);
        }
        Ok(())
    }

    /// Drop a role the caller holds.
    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        account.require_auth();
        if access_control::clear_role(&env, &account, role)? {
            events::publish_role_revoked(&env, role, account.clone(), account);
        }
        Ok(())
    }

    pub fn has_role(env: Env, account: Address, role: Role) -> bool {
        access_control::has_role(&env, &account, role)
    }

    pub fn get_role_members(env: Env, role: Role) -> Vec<Address> {
        access_control::members(&env, role)
    }

    // ── Code replacement ────────────────────────────────────────────────────

    /// Swap the executable code, keeping all stored state. Requires
    /// `SuperAdmin`. Run `migrate` afterwards if the new code bumps the
    /// schema version.
    pub fn upgrade(
        env: Env,
        caller: Address,
        new_wasm_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        caller.require_auth();
        access_control::require_role(&env, &caller, Role::SuperAdmin)?;

        env.deployer()
            .update_current_contract_wasm(new_wasm_hash.clone());

        events::publish_upgraded(&env, caller, new_wasm_hash);
        Ok(())
    }

    /// Bring stored state up to the layout this code writes. Requires
    /// `SuperAdmin`. Returns the resulting schema version.
    pub fn migrate(env: Env, caller: Address) -> Result<u32, ContractError> {
        storage::require_initialized(&env)?;
        caller.require_auth();
        access_control::require_role(&env, &caller, Role::SuperAdmin)?;

        let (from, to) = storage::migrate(&env)?;
        if from != to {
            log!(&env, "schema migrated", from, to);
            events::publish_migrated(&env, from, to);
        }
        Ok(to)
    }

    pub fn get_schema_version(env: Env) -> u32 {
        storage::stored_schema_version(&env)
    }

    // ── Views ────────────────────────────────────────────────────────────────

    pub fn get_tier(env: Env, lock_days: u32) -> Option<Tier> {
        tiers::get(&env, lock_days)
    }

    /// Lock durations (in days) open for staking, in first-activation order.
    pub fn get_active_tiers(env: Env) -> Vec<u32> {
        tiers::active_keys(&env)
    }

    pub fn get_position(env: Env, position_id: u64) -> Result<Position, ContractError> {
        positions::load(&env, position_id)
    }

    pub fn get_positions_by_address(env: Env, owner: Address) -> Vec<u64> {
        positions::ids_by_owner(&env, &owner)
    }

    pub fn check_withdrawal(
        env: Env,
        position_id: u64,
    ) -> Result<WithdrawalCheck, ContractError> {
        let position = positions::load(&env, position_id)?;
        Ok(position.withdrawal_check(env.ledger().timestamp()))
    }

    pub fn get_contract_health(env: Env) -> ContractHealth {
        let balance = match env.storage().instance().get::<_, Address>(&NATIVE_TOKEN) {
            Some(native) => {
                token::Client::new(&env, &native).balance(&env.current_contract_address())
            }
            None => 0,
        };
        ContractHealth {
            balance,
            total_staked: storage::get_amount(&env, &TOTAL_STAKED),
            total_interest_paid: storage::get_amount(&env, &TOTAL_INTEREST_PAID),
            position_count: positions::count(&env),
            is_paused: pause::is_paused(&env),
        }
    }

    /// Interest a stake of `amount` would earn under `apy_basis_points`.
    ///
    /// Interest is a flat rate over the whole term, so `lock_days` does not
    /// change the result; it is accepted so callers can quote a tier as-is.
    /// Uses the same routine as `stake_tokens`, so quotes match settlement.
    pub fn calculate_interest(
        _env: Env,
        apy_basis_points: u32,
        _lock_days: u32,
        amount: i128,
    ) -> Result<i128, ContractError> {
        interest::interest(amount, apy_basis_points).ok_or(ContractError::ArithmeticOverflow)
    }

    pub fn get_early_withdrawal_fee(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&FEE_BPS)
            .unwrap_or(DEFAULT_EARLY_WITHDRAWAL_FEE_BPS)
    }

    pub fn get_treasury(env: Env) -> Result<Address, ContractError> {
        Self::treasury(&env)
    }

    pub fn get_native_token(env: Env) -> Result<Address, ContractError> {
        Self::native_token(&env)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        storage::get_amount(&env, &TOTAL_STAKED)
    }

    pub fn get_total_interest_paid(env: Env) -> i128 {
        storage::get_amount(&env, &TOTAL_INTEREST_PAID)
    }

    pub fn get_position_count(env: Env) -> u64 {
        positions::count(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn native_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&NATIVE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn treasury(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TREASURY)
            .ok_or(ContractError::NotInitialized)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_upgrade;
