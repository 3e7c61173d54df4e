#![no_std]

mod error;
mod interfaces;
mod layout;
mod loan;
mod oracle;
mod pool;

pub use error::*;
pub use interfaces::*;
pub use layout::*;
pub use loan::*;
pub use oracle::*;
pub use pool::*;

/// Fixed-point scale of the share -> asset exchange rate (1e18 = 1.0)
pub const RATE_PRECISION: i128 = 1_000_000_000_000_000_000;

/// Fixed-point scale of oracle prices (Stellar 7-decimal convention)
pub const PRICE_PRECISION: i128 = 10_000_000;

/// Redeem sentinel: burn every share the owner holds
pub const REDEEM_ALL: i128 = i128::MAX;

/// Default flash loan fee: 9 / 10_000 (9 bps)
pub const DEFAULT_FEE_FRACTION: i128 = 9;
pub const DEFAULT_FEE_PRECISION: i128 = 10_000;

/// Basis point denominator used by oracle deviation limits
pub const BPS_DENOMINATOR: i128 = 10_000;
