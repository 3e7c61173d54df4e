use crate::full_math::mul_div_floor;
use flash_types::{FlashError, RATE_PRECISION};
use soroban_sdk::Env;

/// Shares minted for a deposit: floor(amount * RATE_PRECISION / exchange_rate)
pub fn shares_for_deposit(env: &Env, amount: i128, exchange_rate: i128) -> Result<i128, FlashError> {
    if exchange_rate < RATE_PRECISION {
        return Err(FlashError::InvariantViolation);
    }
    mul_div_floor(env, amount, RATE_PRECISION, exchange_rate)
}

/// Underlying paid out for `shares`: floor(shares * exchange_rate / RATE_PRECISION)
pub fn assets_for_shares(env: &Env, shares: i128, exchange_rate: i128) -> Result<i128, FlashError> {
    mul_div_floor(env, shares, exchange_rate, RATE_PRECISION)
}

/// Exchange rate after accruing `fee` over `share_supply` shares:
/// rate + floor(fee * RATE_PRECISION / share_supply).
///
/// With no shares outstanding the rate is left unchanged.
pub fn accrued_rate(
    env: &Env,
    exchange_rate: i128,
    fee: i128,
    share_supply: i128,
) -> Result<i128, FlashError> {
    if fee < 0 {
        return Err(FlashError::InvariantViolation);
    }
    if share_supply <= 0 || fee == 0 {
        return Ok(exchange_rate);
    }

    let increment = mul_div_floor(env, fee, RATE_PRECISION, share_supply)?;
    exchange_rate
        .checked_add(increment)
        .ok_or(FlashError::ArithmeticOverflow)
}
