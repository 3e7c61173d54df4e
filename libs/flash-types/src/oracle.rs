use soroban_sdk::contracttype;

/// A single oracle observation
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PriceData {
    /// Price of one asset unit in the reference currency, scaled by PRICE_PRECISION
    pub price: i128,
    /// Ledger timestamp of the observation (seconds)
    pub timestamp: u64,
}

/// Acceptance policy applied to every oracle read
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OraclePolicy {
    /// Maximum observation age in seconds
    pub max_age: u64,
    /// Maximum move against the last accepted price, in basis points
    pub max_deviation_bps: u32,
}
