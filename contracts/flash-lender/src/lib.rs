#![no_std]

use flash_types::{FlashError, FlashReceiverClient, VaultClient};
use soroban_sdk::{
    contract, contractimpl, contracttype, log, Address, Bytes, Env, InvokeError, Symbol,
};

#[contract]
pub struct FlashLender;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Vault holding pool custody and ledgers
    Vault,
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn get_vault(env: &Env) -> Result<Address, FlashError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Vault)
        .ok_or(FlashError::NotInitialized)
}

/// Unwrap a vault `try_` call, surfacing its error code unchanged
fn settle<T, E>(
    result: Result<Result<T, E>, Result<FlashError, InvokeError>>,
) -> Result<T, FlashError> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Err(Ok(error)) => Err(error),
        _ => Err(FlashError::InvariantViolation),
    }
}

#[contractimpl]
impl FlashLender {
    /// Bind this lender to a vault. The vault admin must still allow it via `set_lender`.
    pub fn initialize(env: Env, vault: Address) -> Result<(), FlashError> {
        if env.storage().instance().has(&DataKey::Vault) {
            return Err(FlashError::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Vault, &vault);
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Execute a flash loan
    ///
    /// Sends `amount` of `asset` to `borrower`, calls its `on_flash_loan`
    /// and settles against the vault's custody balance. Any failure undoes
    /// the whole call, the outbound transfer included.
    ///
    /// # Arguments
    /// * `initiator` - Account requesting the loan (must authorize)
    /// * `borrower` - Contract receiving funds and the callback
    /// * `params` - Opaque data forwarded to the callback
    ///
    /// # Returns
    /// The fee paid
    pub fn borrow(
        env: Env,
        initiator: Address,
        borrower: Address,
        asset: Address,
        amount: i128,
        params: Bytes,
    ) -> Result<i128, FlashError> {
        initiator.require_auth();

        let vault = VaultClient::new(&env, &get_vault(&env)?);
        let lender = env.current_contract_address();

        let loan = settle(vault.try_open_loan(&lender, &asset, &borrower, &amount))?;
        log!(&env, "borrow: loan opened", loan.amount, loan.fee);

        let accepted = FlashReceiverClient::new(&env, &borrower).on_flash_loan(
            &asset,
            &amount,
            &loan.fee,
            &initiator,
            &params,
        );
        if !accepted {
            log!(&env, "borrow: callback rejected");
            return Err(FlashError::CallbackRejected);
        }

        settle(vault.try_close_loan(&lender, &asset))?;

        env.events().publish(
            (Symbol::new(&env, "flash_loan"), borrower, asset),
            (initiator, amount, loan.fee),
        );
        Ok(loan.fee)
    }

    /// Largest loan currently available for `asset` (0 if the pool can't lend)
    pub fn max_flash_loan(env: Env, asset: Address) -> i128 {
        let Ok(vault) = get_vault(&env) else {
            return 0;
        };
        let vault = VaultClient::new(&env, &vault);
        match vault.try_get_pool(&asset) {
            Ok(Ok(pool)) if pool.is_allowed && !pool.active_loan => vault.held_balance(&asset),
            _ => 0,
        }
    }

    /// Fee charged for borrowing `amount` of `asset`
    pub fn flash_fee(env: Env, asset: Address, amount: i128) -> Result<i128, FlashError> {
        let vault = VaultClient::new(&env, &get_vault(&env)?);
        settle(vault.try_compute_fee(&asset, &amount))
    }

    pub fn vault(env: Env) -> Result<Address, FlashError> {
        get_vault(&env)
    }
}
