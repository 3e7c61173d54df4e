use crate::{FlashError, Loan, PoolState, PriceData};
use soroban_sdk::{contractclient, Address, Bytes, Env};

/// Flash loan receiver interface.
///
/// The lender invokes `on_flash_loan` synchronously after the principal has
/// been transferred. The return value authorizes nothing; only the vault's
/// custody balance check settles the loan.
#[contractclient(name = "FlashReceiverClient")]
pub trait FlashReceiver {
    fn on_flash_loan(
        env: Env,
        asset: Address,
        amount: i128,
        fee: i128,
        initiator: Address,
        params: Bytes,
    ) -> bool;
}

/// Authorization predicate consumed by the vault's administrative operations
#[contractclient(name = "AccessGuardClient")]
pub trait AccessGuard {
    fn is_authorized(env: Env, caller: Address) -> bool;
}

/// External price feed (e.g. an AMM pool quoting an asset in a reference currency)
#[contractclient(name = "PriceOracleClient")]
pub trait PriceOracle {
    fn price_of(env: Env, asset: Address) -> PriceData;
}

/// The loan-path surface of the vault, as seen by a lender
#[contractclient(name = "VaultClient")]
pub trait VaultInterface {
    fn open_loan(
        env: Env,
        lender: Address,
        asset: Address,
        borrower: Address,
        amount: i128,
    ) -> Result<Loan, FlashError>;

    fn close_loan(env: Env, lender: Address, asset: Address) -> Result<Loan, FlashError>;

    fn get_pool(env: Env, asset: Address) -> Result<PoolState, FlashError>;

    fn compute_fee(env: Env, asset: Address, amount: i128) -> Result<i128, FlashError>;

    fn held_balance(env: Env, asset: Address) -> i128;
}
