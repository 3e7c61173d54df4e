use flash_types::FlashError;
use soroban_sdk::{token, Address, Env};

/// Underlying balance physically held by the vault for `asset`.
///
/// This is a direct token balance read, independent of share accounting.
pub fn held_balance(env: &Env, asset: &Address) -> i128 {
    token::Client::new(env, asset).balance(&env.current_contract_address())
}

/// Move `amount` from `from` into custody (`from` must have authorized)
pub fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), FlashError> {
    let token = token::Client::new(env, asset);
    if token.balance(from) < amount {
        return Err(FlashError::InsufficientBalance);
    }
    token.transfer(from, &env.current_contract_address(), &amount);
    Ok(())
}

/// Move `amount` from `from` into custody using the allowance `from` granted the vault
pub fn pull_approved(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), FlashError> {
    let token = token::Client::new(env, asset);
    let vault = env.current_contract_address();
    if token.allowance(from, &vault) < amount || token.balance(from) < amount {
        return Err(FlashError::InsufficientBalance);
    }
    token.transfer_from(&vault, from, &vault, &amount);
    Ok(())
}

/// Move `amount` out of custody to `to`
pub fn push(env: &Env, asset: &Address, to: &Address, amount: i128) {
    token::Client::new(env, asset).transfer(&env.current_contract_address(), to, &amount);
}
