use flash_types::{FeeConfig, FlashError};
use soroban_fixed_point_math::FixedPoint;

/// Fee owed on a flash loan of `amount`: floor(amount * fee_fraction / fee_precision).
///
/// Overflow of `amount * fee_fraction` fails with `ArithmeticOverflow`;
/// the fee is never saturated.
pub fn compute_fee(config: &FeeConfig, amount: i128) -> Result<i128, FlashError> {
    config.validate()?;
    if amount < 0 {
        return Err(FlashError::InvalidAmount);
    }

    amount
        .fixed_mul_floor(config.fee_fraction, config.fee_precision)
        .ok_or(FlashError::ArithmeticOverflow)
}
