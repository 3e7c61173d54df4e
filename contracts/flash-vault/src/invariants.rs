// ============================================================================
// INVARIANTS MODULE
// ============================================================================
//
// Properties of the pool ledger that every mutating path must preserve.
// Each predicate is pure; `ensure` turns a failed predicate into
// `InvariantViolation` so the enclosing call fails instead of committing.
//
// INVARIANT CATEGORIES:
//
// 1. RATE INVARIANTS
//    - Exchange rate never decreases
//    - Exchange rate never drops below 1.0
//
// 2. BACKING INVARIANTS
//    - On an idle pool, shares * rate / RATE_PRECISION <= custody balance
//
// 3. LOAN INVARIANTS
//    - A loan settles only if ending custody >= starting custody + fee
//    - The fee accrued equals the fee fixed when the loan was opened
//
// ============================================================================

use flash_types::{FlashError, Loan, PoolState, RATE_PRECISION};

// ============================================================================
// RATE INVARIANTS
// ============================================================================

/// Invariant: exchange rate is monotonically non-decreasing
///
/// Property:
///   rate_after >= rate_before
pub fn rate_monotonic(rate_before: i128, rate_after: i128) -> bool {
    rate_after >= rate_before
}

/// Invariant: exchange rate is at least 1.0
///
/// Property:
///   exchange_rate >= RATE_PRECISION
pub fn rate_floor(state: &PoolState) -> bool {
    state.exchange_rate >= RATE_PRECISION
}

// ============================================================================
// BACKING INVARIANTS
// ============================================================================

/// Invariant: shares are fully backed by custody
///
/// Property:
///   derived_assets <= held_balance
///
/// Only meaningful while no loan is active: during a loan the principal is
/// outside custody.
pub fn assets_backed(derived_assets: i128, held_balance: i128) -> bool {
    derived_assets <= held_balance
}

/// Invariant: supply and per-owner balances are non-negative
///
/// Property:
///   share_supply >= 0 && total_fees >= 0
pub fn supply_non_negative(state: &PoolState) -> bool {
    state.share_supply >= 0 && state.total_fees >= 0
}

// ============================================================================
// LOAN INVARIANTS
// ============================================================================

/// Invariant: loan repaid with fee
///
/// Property:
///   ending_balance >= starting_balance + fee
pub fn loan_repaid(loan: &Loan, ending_balance: i128) -> bool {
    match loan.required_balance() {
        Some(required) => ending_balance >= required,
        None => false,
    }
}

/// Invariant: settlement accrues exactly the fee fixed at open
///
/// Property:
///   total_fees_after == total_fees_before + loan.fee
pub fn fee_accrued_once(total_fees_before: i128, total_fees_after: i128, loan: &Loan) -> bool {
    total_fees_before.checked_add(loan.fee) == Some(total_fees_after)
}

/// Turn a failed predicate into a consistency failure
pub fn ensure(holds: bool) -> Result<(), FlashError> {
    if holds {
        Ok(())
    } else {
        Err(FlashError::InvariantViolation)
    }
}

// ============================================================================
// TESTS
// ============================================================================
