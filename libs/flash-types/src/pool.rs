use crate::{FlashError, RATE_PRECISION};
use soroban_sdk::{contracttype, Address};

/// Per-asset pool record.
///
/// Persisted by the vault as an ordered slot vector (see `pool_layout_v1`),
/// never as a keyed map, so field order here must match the slot indices.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Underlying asset (token contract) held in custody
    pub asset: Address,
    /// Total outstanding shares
    pub share_supply: i128,
    /// Asset per share, scaled by RATE_PRECISION. Never decreases.
    pub exchange_rate: i128,
    /// Disallowed pools reject deposit and borrow
    pub is_allowed: bool,
    /// True only while a flash loan on this pool is in flight
    pub active_loan: bool,
    /// Lifetime fees accrued into the exchange rate
    pub total_fees: i128,
}

impl PoolState {
    pub fn new(asset: Address) -> Self {
        Self {
            asset,
            share_supply: 0,
            exchange_rate: RATE_PRECISION,
            is_allowed: true,
            active_loan: false,
            total_fees: 0,
        }
    }
}

/// Flash loan fee as `amount * fee_fraction / fee_precision`
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeeConfig {
    pub fee_fraction: i128,
    pub fee_precision: i128,
}

impl FeeConfig {
    pub fn new(fee_fraction: i128, fee_precision: i128) -> Self {
        Self {
            fee_fraction,
            fee_precision,
        }
    }

    /// A fee is a non-negative fraction of at most 100%.
    pub fn validate(&self) -> Result<(), FlashError> {
        if self.fee_precision <= 0
            || self.fee_fraction < 0
            || self.fee_fraction > self.fee_precision
        {
            return Err(FlashError::InvalidFeeConfig);
        }
        Ok(())
    }
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self::new(crate::DEFAULT_FEE_FRACTION, crate::DEFAULT_FEE_PRECISION)
    }
}
