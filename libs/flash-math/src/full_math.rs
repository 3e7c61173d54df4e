use flash_types::FlashError;
use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{Env, I256};

/// floor(a * b / denominator) for non-negative operands.
///
/// Uses the i128 fast path and falls back to a 256-bit intermediate when
/// `a * b` overflows but the quotient still fits (phantom overflow).
pub fn mul_div_floor(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, FlashError> {
    if denominator <= 0 || a < 0 || b < 0 {
        return Err(FlashError::ArithmeticOverflow);
    }

    if let Some(result) = a.fixed_mul_floor(b, denominator) {
        return Ok(result);
    }

    let product = I256::from_i128(env, a).mul(&I256::from_i128(env, b));
    let result = product.div(&I256::from_i128(env, denominator));
    result.to_i128().ok_or(FlashError::ArithmeticOverflow)
}

/// Absolute difference of two i128 values, as a checked operation
pub fn abs_diff(a: i128, b: i128) -> Result<i128, FlashError> {
    a.checked_sub(b)
        .and_then(|d| d.checked_abs())
        .ok_or(FlashError::ArithmeticOverflow)
}
