use flash_types::{
    FeeConfig, FlashError, Loan, OraclePolicy, PoolState, PriceData, StorageLayout, SLOT_ACTIVE_LOAN,
    SLOT_ASSET, SLOT_EXCHANGE_RATE, SLOT_IS_ALLOWED, SLOT_SHARE_SUPPLY, SLOT_TOTAL_FEES,
};
use soroban_sdk::{contracttype, panic_with_error, Address, Env, IntoVal, TryFromVal, Val, Vec};

// ============================================================================
// STORAGE LAYOUT
// ============================================================================
// Instance storage: deployment-wide configuration (admin, guard, fee config,
//   oracle wiring, persistent layout descriptor, lender allow-list, pool index).
// Persistent storage: one slot vector per pool, one share balance per
//   (asset, owner), the registry index, last accepted oracle prices.
// Temporary storage: the in-flight loan. Written by `open_loan` and removed
//   by `close_loan` within the same transaction, so it never outlives a borrow.
//
// Pool records are ordered slot vectors described by `StorageLayout`.
// Upgrades may append slots; they may never move, resize or drop one.
// ============================================================================

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Deployment admin (Instance)
    Admin,
    /// Optional external access guard contract (Instance)
    Guard,
    /// Deployment-wide fee config (Instance)
    FeeConfig,
    /// Current persistent layout descriptor (Instance)
    Layout,
    /// Coordinator allow-list: lender -> enabled (Instance)
    Lender(Address),
    /// Price oracle contract (Instance)
    Oracle,
    /// Oracle acceptance policy (Instance)
    OraclePolicy,
    /// Number of registered pools (Instance)
    PoolCount,
    /// Pool slot vector keyed by asset (Persistent)
    Pool(Address),
    /// Registry index -> asset (Persistent)
    PoolAt(u32),
    /// Per-pool fee override (Persistent)
    PoolFee(Address),
    /// Share balance of (asset, owner) (Persistent)
    Shares(Address, Address),
    /// Last accepted oracle observation per asset (Persistent)
    AcceptedPrice(Address),
    /// In-flight loan per asset (Temporary)
    Loan(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Admin / access ===

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn get_admin(env: &Env) -> Result<Address, FlashError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(FlashError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    extend_instance_ttl(env);
}

pub fn get_guard(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Guard)
}

pub fn set_guard(env: &Env, guard: &Option<Address>) {
    match guard {
        Some(guard) => env.storage().instance().set(&DataKey::Guard, guard),
        None => env.storage().instance().remove(&DataKey::Guard),
    }
}

pub fn is_lender(env: &Env, lender: &Address) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Lender(lender.clone()))
        .unwrap_or(false)
}

pub fn set_lender(env: &Env, lender: &Address, enabled: bool) {
    let key = DataKey::Lender(lender.clone());
    if enabled {
        env.storage().instance().set(&key, &true);
    } else {
        env.storage().instance().remove(&key);
    }
    extend_instance_ttl(env);
}

// === Fee config ===

pub fn get_fee_config(env: &Env) -> FeeConfig {
    env.storage()
        .instance()
        .get(&DataKey::FeeConfig)
        .unwrap_or_default()
}

pub fn set_fee_config(env: &Env, config: &FeeConfig) {
    env.storage().instance().set(&DataKey::FeeConfig, config);
    extend_instance_ttl(env);
}

pub fn get_pool_fee(env: &Env, asset: &Address) -> Option<FeeConfig> {
    env.storage()
        .persistent()
        .get(&DataKey::PoolFee(asset.clone()))
}

pub fn set_pool_fee(env: &Env, asset: &Address, config: &Option<FeeConfig>) {
    let key = DataKey::PoolFee(asset.clone());
    match config {
        Some(config) => {
            env.storage().persistent().set(&key, config);
            extend_persistent_ttl(env, &key);
        }
        None => env.storage().persistent().remove(&key),
    }
}

// === Layout ===

pub fn get_layout(env: &Env) -> Result<StorageLayout, FlashError> {
    env.storage()
        .instance()
        .get(&DataKey::Layout)
        .ok_or(FlashError::NotInitialized)
}

pub fn set_layout(env: &Env, layout: &StorageLayout) {
    env.storage().instance().set(&DataKey::Layout, layout);
    extend_instance_ttl(env);
}

// === Pools ===

pub fn has_pool(env: &Env, asset: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Pool(asset.clone()))
}

pub fn get_pool(env: &Env, asset: &Address) -> Result<PoolState, FlashError> {
    let key = DataKey::Pool(asset.clone());
    let slots: Vec<Val> = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(FlashError::UnknownAsset)?;
    extend_persistent_ttl(env, &key);
    Ok(decode_pool(env, &slots))
}

pub fn set_pool(env: &Env, pool: &PoolState) {
    let key = DataKey::Pool(pool.asset.clone());
    env.storage().persistent().set(&key, &encode_pool(env, pool));
    extend_persistent_ttl(env, &key);
}

/// Append an asset to the registry index
pub fn push_pool_index(env: &Env, asset: &Address) -> u32 {
    let index = get_pool_count(env);
    let key = DataKey::PoolAt(index);
    env.storage().persistent().set(&key, asset);
    extend_persistent_ttl(env, &key);
    env.storage()
        .instance()
        .set(&DataKey::PoolCount, &(index + 1));
    index
}

pub fn get_pool_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PoolCount)
        .unwrap_or(0)
}

pub fn get_pool_at(env: &Env, index: u32) -> Option<Address> {
    env.storage().persistent().get(&DataKey::PoolAt(index))
}

fn encode_pool(env: &Env, pool: &PoolState) -> Vec<Val> {
    let mut slots: Vec<Val> = Vec::new(env);
    // Push order must follow the SLOT_* indices
    slots.push_back(pool.asset.into_val(env));
    slots.push_back(pool.share_supply.into_val(env));
    slots.push_back(pool.exchange_rate.into_val(env));
    slots.push_back(pool.is_allowed.into_val(env));
    slots.push_back(pool.active_loan.into_val(env));
    slots.push_back(pool.total_fees.into_val(env));
    slots
}

fn decode_pool(env: &Env, slots: &Vec<Val>) -> PoolState {
    PoolState {
        asset: read_slot(env, slots, SLOT_ASSET),
        share_supply: read_slot(env, slots, SLOT_SHARE_SUPPLY),
        exchange_rate: read_slot(env, slots, SLOT_EXCHANGE_RATE),
        is_allowed: read_slot(env, slots, SLOT_IS_ALLOWED),
        active_loan: read_slot(env, slots, SLOT_ACTIVE_LOAN),
        total_fees: read_slot(env, slots, SLOT_TOTAL_FEES),
    }
}

fn read_slot<T: TryFromVal<Env, Val>>(env: &Env, slots: &Vec<Val>, index: u32) -> T {
    let raw = match slots.get(index) {
        Some(raw) => raw,
        None => panic_with_error!(env, FlashError::IncompatibleUpgradeLayout),
    };
    match T::try_from_val(env, &raw) {
        Ok(value) => value,
        Err(_) => panic_with_error!(env, FlashError::IncompatibleUpgradeLayout),
    }
}

// === Shares ===

pub fn get_shares(env: &Env, asset: &Address, owner: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Shares(asset.clone(), owner.clone()))
        .unwrap_or(0)
}

pub fn set_shares(env: &Env, asset: &Address, owner: &Address, shares: i128) {
    let key = DataKey::Shares(asset.clone(), owner.clone());
    if shares == 0 {
        // Remove empty balance
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &shares);
        extend_persistent_ttl(env, &key);
    }
}

// === Loan ===

pub fn get_loan(env: &Env, asset: &Address) -> Option<Loan> {
    env.storage()
        .temporary()
        .get(&DataKey::Loan(asset.clone()))
}

pub fn set_loan(env: &Env, loan: &Loan) {
    env.storage()
        .temporary()
        .set(&DataKey::Loan(loan.asset.clone()), loan);
}

pub fn remove_loan(env: &Env, asset: &Address) {
    env.storage()
        .temporary()
        .remove(&DataKey::Loan(asset.clone()));
}

// === Oracle ===

pub fn get_oracle(env: &Env) -> Option<(Address, OraclePolicy)> {
    let oracle: Option<Address> = env.storage().instance().get(&DataKey::Oracle);
    let policy: Option<OraclePolicy> = env.storage().instance().get(&DataKey::OraclePolicy);
    oracle.zip(policy)
}

pub fn set_oracle(env: &Env, oracle: &Address, policy: &OraclePolicy) {
    env.storage().instance().set(&DataKey::Oracle, oracle);
    env.storage().instance().set(&DataKey::OraclePolicy, policy);
    extend_instance_ttl(env);
}

pub fn get_accepted_price(env: &Env, asset: &Address) -> Option<PriceData> {
    env.storage()
        .persistent()
        .get(&DataKey::AcceptedPrice(asset.clone()))
}

pub fn set_accepted_price(env: &Env, asset: &Address, price: &PriceData) {
    let key = DataKey::AcceptedPrice(asset.clone());
    env.storage().persistent().set(&key, price);
    extend_persistent_ttl(env, &key);
}
