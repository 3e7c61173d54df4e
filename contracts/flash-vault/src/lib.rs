#![no_std]

mod access;
mod custody;
mod invariants;
mod layout;
mod ledger;
mod loan;
mod oracle;
mod registry;
mod storage;

use flash_types::{
    pool_layout_v1, FeeConfig, FlashError, Loan, OraclePolicy, PoolState, StorageLayout,
};
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, Symbol, Vec};

#[contract]
pub struct FlashVault;

// ============================================================================
// SOROBAN CALL-STACK CONSTRAINT
// ============================================================================
// The host rejects any call into a contract that is already on the call
// stack. The vault therefore never calls a borrower: lenders open a loan,
// run the borrower callback themselves, then close it. While the callback
// runs the vault is off the stack, so borrowers can reach deposit / redeem /
// repay and the per-pool `active_loan` flag decides what they may do.
// ============================================================================

#[contractimpl]
impl FlashVault {
    // === Administration ===

    /// Initialize the vault with an admin, an optional external access guard
    /// and the deployment-wide fee config
    pub fn initialize(
        env: Env,
        admin: Address,
        guard: Option<Address>,
        fee: FeeConfig,
    ) -> Result<(), FlashError> {
        if storage::is_initialized(&env) {
            return Err(FlashError::AlreadyInitialized);
        }
        admin.require_auth();
        fee.validate()?;

        storage::set_admin(&env, &admin);
        storage::set_guard(&env, &guard);
        storage::set_fee_config(&env, &fee);
        storage::set_layout(&env, &pool_layout_v1(&env));
        Ok(())
    }

    /// Allow or revoke a lender contract on the loan path
    pub fn set_lender(env: Env, caller: Address, lender: Address, enabled: bool) -> Result<(), FlashError> {
        access::require_operator(&env, &caller)?;
        storage::set_lender(&env, &lender, enabled);

        env.events()
            .publish((Symbol::new(&env, "lender"), lender), enabled);
        Ok(())
    }

    pub fn register_pool(env: Env, caller: Address, asset: Address) -> Result<PoolState, FlashError> {
        registry::register_pool(&env, &caller, &asset)
    }

    pub fn set_allowed(env: Env, caller: Address, asset: Address, allowed: bool) -> Result<(), FlashError> {
        registry::set_allowed(&env, &caller, &asset, allowed)
    }

    /// Replace the deployment-wide fee config. Applies from the next loan.
    pub fn set_fee_config(env: Env, caller: Address, fee: FeeConfig) -> Result<(), FlashError> {
        access::require_operator(&env, &caller)?;
        fee.validate()?;
        storage::set_fee_config(&env, &fee);

        env.events().publish(
            (Symbol::new(&env, "fee_config"),),
            (fee.fee_fraction, fee.fee_precision),
        );
        Ok(())
    }

    /// Set or clear (`None`) the fee override of a single pool
    pub fn set_pool_fee(
        env: Env,
        caller: Address,
        asset: Address,
        fee: Option<FeeConfig>,
    ) -> Result<(), FlashError> {
        access::require_operator(&env, &caller)?;
        registry::resolve(&env, &asset)?;
        if let Some(config) = &fee {
            config.validate()?;
        }
        storage::set_pool_fee(&env, &asset, &fee);

        env.events()
            .publish((Symbol::new(&env, "fee_config"), asset), fee);
        Ok(())
    }

    pub fn set_oracle(
        env: Env,
        caller: Address,
        oracle: Address,
        policy: OraclePolicy,
    ) -> Result<(), FlashError> {
        oracle::configure(&env, &caller, &oracle, &policy)
    }

    /// Upgrade contract code after checking the new persistent layout
    ///
    /// # Arguments
    /// * `new_wasm_hash` - Hash of the already uploaded WASM
    /// * `layout` - Pool record layout the new code reads and writes
    pub fn upgrade(
        env: Env,
        caller: Address,
        new_wasm_hash: BytesN<32>,
        layout: StorageLayout,
    ) -> Result<(), FlashError> {
        layout::upgrade(&env, &caller, new_wasm_hash, layout)
    }

    // === Share ledger ===

    /// Deposit underlying and receive shares at the current exchange rate
    pub fn deposit(env: Env, from: Address, asset: Address, amount: i128) -> Result<i128, FlashError> {
        ledger::deposit(&env, &from, &asset, amount)
    }

    /// Burn shares for underlying. Pass `REDEEM_ALL` to burn every share held.
    pub fn redeem(env: Env, owner: Address, asset: Address, shares: i128) -> Result<i128, FlashError> {
        ledger::redeem(&env, &owner, &asset, shares)
    }

    // === Loan path ===

    pub fn open_loan(
        env: Env,
        lender: Address,
        asset: Address,
        borrower: Address,
        amount: i128,
    ) -> Result<Loan, FlashError> {
        loan::open_loan(&env, &lender, &asset, &borrower, amount)
    }

    pub fn close_loan(env: Env, lender: Address, asset: Address) -> Result<Loan, FlashError> {
        loan::close_loan(&env, &lender, &asset)
    }

    /// Return funds for the in-flight loan on `asset` (requires a token allowance to the vault)
    pub fn repay(env: Env, from: Address, asset: Address, amount: i128) -> Result<(), FlashError> {
        loan::repay(&env, &from, &asset, amount)
    }

    // === Oracle ===

    /// Pull and validate a fresh price for `asset`
    pub fn refresh_price(env: Env, asset: Address) -> Result<i128, FlashError> {
        oracle::refresh_price(&env, &asset)
    }

    /// Pool value in the oracle's reference currency (PRICE_PRECISION scale removed)
    pub fn pool_value(env: Env, asset: Address) -> Result<i128, FlashError> {
        oracle::pool_value(&env, &asset)
    }

    // === View functions ===

    pub fn get_pool(env: Env, asset: Address) -> Result<PoolState, FlashError> {
        registry::resolve(&env, &asset)
    }

    pub fn is_loan_active(env: Env, asset: Address) -> Result<bool, FlashError> {
        registry::is_loan_active(&env, &asset)
    }

    pub fn exchange_rate(env: Env, asset: Address) -> Result<i128, FlashError> {
        Ok(registry::resolve(&env, &asset)?.exchange_rate)
    }

    pub fn share_supply(env: Env, asset: Address) -> Result<i128, FlashError> {
        Ok(registry::resolve(&env, &asset)?.share_supply)
    }

    pub fn shares_of(env: Env, asset: Address, owner: Address) -> i128 {
        storage::get_shares(&env, &asset, &owner)
    }

    /// Underlying physically held for `asset`, independent of share accounting
    pub fn held_balance(env: Env, asset: Address) -> i128 {
        custody::held_balance(&env, &asset)
    }

    /// Fee a loan of `amount` on `asset` would pay right now
    pub fn compute_fee(env: Env, asset: Address, amount: i128) -> Result<i128, FlashError> {
        registry::resolve(&env, &asset)?;
        flash_math::compute_fee(&registry::effective_fee_config(&env, &asset), amount)
    }

    pub fn fee_config(env: Env) -> FeeConfig {
        storage::get_fee_config(&env)
    }

    pub fn get_pool_count(env: Env) -> u32 {
        storage::get_pool_count(&env)
    }

    /// Get registered assets with pagination
    ///
    /// # Arguments
    /// * `start_index` - Starting index (0-based)
    /// * `limit` - Maximum number of assets to return (capped at 50)
    pub fn get_assets_paginated(env: Env, start_index: u32, limit: u32) -> Vec<Address> {
        registry::assets_paginated(&env, start_index, limit)
    }

    pub fn get_layout(env: Env) -> Result<StorageLayout, FlashError> {
        storage::get_layout(&env)
    }

    /// Dry-run the upgrade layout check
    pub fn check_upgrade(env: Env, layout: StorageLayout) -> Result<(), FlashError> {
        layout::check_upgrade(&env, &layout)
    }

    pub fn is_lender(env: Env, lender: Address) -> bool {
        storage::is_lender(&env, &lender)
    }

    pub fn get_admin(env: Env) -> Result<Address, FlashError> {
        storage::get_admin(&env)
    }
}
