use crate::access::require_operator;
use crate::ledger::derived_assets;
use crate::registry::resolve;
use crate::storage::{get_accepted_price, get_oracle, set_accepted_price, set_oracle};
use flash_math::{abs_diff, mul_div_floor};
use flash_types::{
    FlashError, OraclePolicy, PriceData, PriceOracleClient, BPS_DENOMINATOR, PRICE_PRECISION,
};
use soroban_sdk::{Address, Env, Symbol};

/// Wire the price oracle and the policy every read is checked against
pub fn configure(
    env: &Env,
    caller: &Address,
    oracle: &Address,
    policy: &OraclePolicy,
) -> Result<(), FlashError> {
    require_operator(env, caller)?;
    set_oracle(env, oracle, policy);

    env.events().publish(
        (Symbol::new(env, "oracle_set"), oracle.clone()),
        (policy.max_age, policy.max_deviation_bps),
    );
    Ok(())
}

/// Read a fresh observation for `asset` and accept it if the policy allows.
///
/// A single spot read is not manipulation resistant; the deviation bound only
/// caps how far one accepted observation can move from the previous one.
pub fn refresh_price(env: &Env, asset: &Address) -> Result<i128, FlashError> {
    let (oracle, policy) = get_oracle(env).ok_or(FlashError::OracleNotSet)?;
    resolve(env, asset)?;

    let observed = PriceOracleClient::new(env, &oracle).price_of(asset);
    if observed.price <= 0 {
        return Err(FlashError::PriceDeviation);
    }
    if is_stale(env, &observed, &policy) {
        return Err(FlashError::StalePrice);
    }

    if let Some(previous) = get_accepted_price(env, asset) {
        let moved = abs_diff(observed.price, previous.price)?;
        let moved_bps = mul_div_floor(env, moved, BPS_DENOMINATOR, previous.price)?;
        if moved_bps > policy.max_deviation_bps as i128 {
            return Err(FlashError::PriceDeviation);
        }
    }

    set_accepted_price(env, asset, &observed);
    env.events().publish(
        (Symbol::new(env, "price_accepted"), asset.clone()),
        (observed.price, observed.timestamp),
    );
    Ok(observed.price)
}

/// Derived assets of the pool valued at the last accepted price
pub fn pool_value(env: &Env, asset: &Address) -> Result<i128, FlashError> {
    let (_, policy) = get_oracle(env).ok_or(FlashError::OracleNotSet)?;
    let pool = resolve(env, asset)?;
    let accepted = get_accepted_price(env, asset).ok_or(FlashError::OracleNotSet)?;
    if is_stale(env, &accepted, &policy) {
        return Err(FlashError::StalePrice);
    }

    mul_div_floor(env, derived_assets(env, &pool)?, accepted.price, PRICE_PRECISION)
}

/// Too old, or dated after the current ledger close
fn is_stale(env: &Env, observation: &PriceData, policy: &OraclePolicy) -> bool {
    let now = env.ledger().timestamp();
    match now.checked_sub(observation.timestamp) {
        Some(age) => age > policy.max_age,
        None => true,
    }
}
