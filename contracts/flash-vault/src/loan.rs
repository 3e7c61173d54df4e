use crate::custody::{held_balance, pull_approved, push};
use crate::invariants::{ensure, fee_accrued_once, loan_repaid};
use crate::ledger::{accrue_fee, check_backing};
use crate::registry::{effective_fee_config, resolve, resolve_allowed};
use crate::storage::{get_loan, is_lender, remove_loan, set_loan, set_pool};
use flash_math::compute_fee;
use flash_types::{FlashError, Loan};
use soroban_sdk::{log, Address, Env, Symbol};

/// Open a loan on `asset`: fix the fee, snapshot custody, mark the pool
/// Active and send `amount` to `borrower`.
///
/// Every check runs before the first write, so a rejected open leaves no trace.
pub fn open_loan(
    env: &Env,
    lender: &Address,
    asset: &Address,
    borrower: &Address,
    amount: i128,
) -> Result<Loan, FlashError> {
    lender.require_auth();
    if !is_lender(env, lender) {
        return Err(FlashError::Unauthorized);
    }
    if amount <= 0 {
        return Err(FlashError::InvalidAmount);
    }

    let mut pool = resolve_allowed(env, asset)?;
    if pool.active_loan {
        log!(env, "open_loan: pool already active");
        return Err(FlashError::ReentrantLoan);
    }

    let fee = compute_fee(&effective_fee_config(env, asset), amount)?;
    let starting_balance = held_balance(env, asset);
    if starting_balance < amount {
        return Err(FlashError::InsufficientLiquidity);
    }

    let loan = Loan {
        lender: lender.clone(),
        asset: asset.clone(),
        borrower: borrower.clone(),
        amount,
        fee,
        starting_balance,
    };
    if loan.required_balance().is_none() {
        return Err(FlashError::ArithmeticOverflow);
    }

    // Idle -> Active
    pool.active_loan = true;
    set_pool(env, &pool);
    set_loan(env, &loan);

    push(env, asset, borrower, amount);

    log!(env, "open_loan", amount, fee, starting_balance);
    env.events().publish(
        (Symbol::new(env, "loan_opened"), asset.clone(), borrower.clone()),
        (amount, fee),
    );
    Ok(loan)
}

/// Verify custody is back to `starting_balance + fee`, return the pool to
/// Idle and accrue the fee fixed at open.
pub fn close_loan(env: &Env, lender: &Address, asset: &Address) -> Result<Loan, FlashError> {
    lender.require_auth();

    let loan = get_loan(env, asset).ok_or(FlashError::NoActiveLoan)?;
    if loan.lender != *lender {
        return Err(FlashError::Unauthorized);
    }

    let mut pool = resolve(env, asset)?;
    if !pool.active_loan {
        return Err(FlashError::NoActiveLoan);
    }

    let ending_balance = held_balance(env, asset);
    if !loan_repaid(&loan, ending_balance) {
        log!(env, "close_loan: not repaid", ending_balance, loan.starting_balance, loan.fee);
        return Err(FlashError::FlashLoanNotRepaid);
    }

    // Active -> Idle
    pool.active_loan = false;
    let fees_before = pool.total_fees;
    accrue_fee(env, &mut pool, loan.fee)?;
    ensure(fee_accrued_once(fees_before, pool.total_fees, &loan))?;

    set_pool(env, &pool);
    remove_loan(env, asset);

    check_backing(env, &pool)?;

    env.events().publish(
        (Symbol::new(env, "loan_closed"), asset.clone(), loan.borrower.clone()),
        (loan.amount, loan.fee, ending_balance),
    );
    Ok(loan)
}

/// Return funds for the in-flight loan on `asset`.
///
/// Pulls `amount` from `from` through the allowance it granted the vault.
/// Value arriving here is no different from any other inbound transfer;
/// settlement only looks at custody.
pub fn repay(env: &Env, from: &Address, asset: &Address, amount: i128) -> Result<(), FlashError> {
    from.require_auth();
    if amount <= 0 {
        return Err(FlashError::InvalidAmount);
    }
    if get_loan(env, asset).is_none() {
        return Err(FlashError::NoActiveLoan);
    }

    pull_approved(env, asset, from, amount)?;

    env.events().publish(
        (Symbol::new(env, "loan_repaid"), asset.clone(), from.clone()),
        amount,
    );
    Ok(())
}
