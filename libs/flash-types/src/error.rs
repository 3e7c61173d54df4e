use soroban_sdk::contracterror;

/// Error taxonomy shared by the vault and every lender bound to it.
///
/// Codes are part of the public interface: a lender re-raises vault
/// failures unchanged, so both contracts must agree on the numbering.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FlashError {
    InvalidAmount = 1,
    AssetNotAllowed = 2,
    UnknownAsset = 3,
    AlreadyRegistered = 4,
    Unauthorized = 5,
    InsufficientLiquidity = 6,
    FlashLoanNotRepaid = 7,
    ReentrantLoan = 8,
    ArithmeticOverflow = 9,
    IncompatibleUpgradeLayout = 10,
    NotInitialized = 11,
    AlreadyInitialized = 12,
    InsufficientShares = 13,
    InvalidFeeConfig = 14,
    NoActiveLoan = 15,
    /// Internal consistency check failed (rate decrease, unbacked shares)
    InvariantViolation = 16,
    CallbackRejected = 17,
    StalePrice = 18,
    PriceDeviation = 19,
    OracleNotSet = 20,
    /// Payer's token balance or allowance is below the amount to move
    InsufficientBalance = 21,
}
