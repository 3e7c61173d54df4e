use crate::custody::{held_balance, pull, push};
use crate::invariants::{assets_backed, ensure, rate_floor, rate_monotonic, supply_non_negative};
use crate::registry::{resolve, resolve_allowed};
use crate::storage::{get_shares, set_pool, set_shares};
use flash_math::{accrued_rate, assets_for_shares, shares_for_deposit};
use flash_types::{FlashError, PoolState, REDEEM_ALL};
use soroban_sdk::{Address, Env, Symbol};

/// Deposit `amount` of the pool asset and mint shares at the current rate.
///
/// Never touches the exchange rate. Rejected while a loan on the pool is in
/// flight so a deposit can't stand in for repayment.
pub fn deposit(env: &Env, from: &Address, asset: &Address, amount: i128) -> Result<i128, FlashError> {
    from.require_auth();
    if amount <= 0 {
        return Err(FlashError::InvalidAmount);
    }

    let mut pool = resolve_allowed(env, asset)?;
    if pool.active_loan {
        return Err(FlashError::ReentrantLoan);
    }

    let minted = shares_for_deposit(env, amount, pool.exchange_rate)?;
    if minted == 0 {
        // Dust below one share would be donated, not deposited
        return Err(FlashError::InvalidAmount);
    }

    pool.share_supply = pool
        .share_supply
        .checked_add(minted)
        .ok_or(FlashError::ArithmeticOverflow)?;
    let balance = get_shares(env, asset, from)
        .checked_add(minted)
        .ok_or(FlashError::ArithmeticOverflow)?;

    set_pool(env, &pool);
    set_shares(env, asset, from, balance);
    pull(env, asset, from, amount)?;

    check_backing(env, &pool)?;

    env.events().publish(
        (Symbol::new(env, "deposit"), asset.clone(), from.clone()),
        (amount, minted),
    );
    Ok(minted)
}

/// Burn `shares` (or every share with REDEEM_ALL) and pay out underlying at the current rate.
///
/// Payout is bounded by the custody actually held, not by derived assets.
pub fn redeem(env: &Env, owner: &Address, asset: &Address, shares: i128) -> Result<i128, FlashError> {
    owner.require_auth();
    let mut pool = resolve(env, asset)?;
    let balance = get_shares(env, asset, owner);

    let shares = if shares == REDEEM_ALL { balance } else { shares };
    if shares <= 0 {
        return Err(FlashError::InvalidAmount);
    }
    if balance < shares {
        return Err(FlashError::InsufficientShares);
    }

    let payout = assets_for_shares(env, shares, pool.exchange_rate)?;
    if held_balance(env, asset) < payout {
        return Err(FlashError::InsufficientLiquidity);
    }

    pool.share_supply = pool
        .share_supply
        .checked_sub(shares)
        .ok_or(FlashError::ArithmeticOverflow)?;
    ensure(supply_non_negative(&pool))?;

    set_pool(env, &pool);
    set_shares(env, asset, owner, balance - shares);
    if payout > 0 {
        push(env, asset, owner, payout);
    }

    check_backing(env, &pool)?;

    env.events().publish(
        (Symbol::new(env, "redeem"), asset.clone(), owner.clone()),
        (shares, payout),
    );
    Ok(payout)
}

/// Raise the exchange rate by `fee` spread over the outstanding shares.
///
/// The only path that changes the rate. Callers must have verified the fee
/// is physically in custody; see `loan::close_loan`.
pub(crate) fn accrue_fee(env: &Env, pool: &mut PoolState, fee: i128) -> Result<(), FlashError> {
    let rate_before = pool.exchange_rate;
    let rate_after = accrued_rate(env, rate_before, fee, pool.share_supply)?;
    ensure(rate_monotonic(rate_before, rate_after))?;

    pool.exchange_rate = rate_after;
    pool.total_fees = pool
        .total_fees
        .checked_add(fee)
        .ok_or(FlashError::ArithmeticOverflow)?;
    ensure(rate_floor(pool))?;

    env.events().publish(
        (Symbol::new(env, "fee_accrued"), pool.asset.clone()),
        (fee, rate_after),
    );
    Ok(())
}

/// Underlying value of every outstanding share at the current rate
pub fn derived_assets(env: &Env, pool: &PoolState) -> Result<i128, FlashError> {
    assets_for_shares(env, pool.share_supply, pool.exchange_rate)
}

/// Idle pools must hold at least what their shares are worth
pub fn check_backing(env: &Env, pool: &PoolState) -> Result<(), FlashError> {
    if pool.active_loan {
        return Ok(());
    }
    let derived = derived_assets(env, pool)?;
    ensure(assets_backed(derived, held_balance(env, &pool.asset)))
}
