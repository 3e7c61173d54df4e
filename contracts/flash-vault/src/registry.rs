use crate::access::require_operator;
use crate::storage::{
    get_fee_config, get_pool, get_pool_at, get_pool_count, get_pool_fee, has_pool, push_pool_index,
    set_pool,
};
use flash_types::{FeeConfig, FlashError, PoolState};
use soroban_sdk::{Address, Env, Symbol, Vec};

/// Maximum page size for registry queries (read entry limit is 100 per tx)
pub const MAX_PAGE_SIZE: u32 = 50;

/// Register a pool for `asset` at rate 1.0 with no shares
pub fn register_pool(env: &Env, caller: &Address, asset: &Address) -> Result<PoolState, FlashError> {
    require_operator(env, caller)?;

    if has_pool(env, asset) {
        return Err(FlashError::AlreadyRegistered);
    }

    let pool = PoolState::new(asset.clone());
    set_pool(env, &pool);
    let index = push_pool_index(env, asset);

    env.events().publish(
        (Symbol::new(env, "pool_registered"), asset.clone()),
        index,
    );
    Ok(pool)
}

/// Toggle whether `asset` accepts deposits and loans
pub fn set_allowed(env: &Env, caller: &Address, asset: &Address, allowed: bool) -> Result<(), FlashError> {
    require_operator(env, caller)?;

    let mut pool = get_pool(env, asset)?;
    pool.is_allowed = allowed;
    set_pool(env, &pool);

    env.events().publish(
        (Symbol::new(env, "pool_allowed"), asset.clone()),
        allowed,
    );
    Ok(())
}

/// Look up the pool for `asset`
pub fn resolve(env: &Env, asset: &Address) -> Result<PoolState, FlashError> {
    get_pool(env, asset)
}

/// Resolve and require the pool to be allowed
pub fn resolve_allowed(env: &Env, asset: &Address) -> Result<PoolState, FlashError> {
    let pool = get_pool(env, asset)?;
    if !pool.is_allowed {
        return Err(FlashError::AssetNotAllowed);
    }
    Ok(pool)
}

pub fn is_loan_active(env: &Env, asset: &Address) -> Result<bool, FlashError> {
    Ok(get_pool(env, asset)?.active_loan)
}

/// Fee config in force for `asset`: the pool override if set, else the deployment default
pub fn effective_fee_config(env: &Env, asset: &Address) -> FeeConfig {
    get_pool_fee(env, asset).unwrap_or_else(|| get_fee_config(env))
}

/// Registered assets, `limit` capped at MAX_PAGE_SIZE
pub fn assets_paginated(env: &Env, start_index: u32, limit: u32) -> Vec<Address> {
    let safe_limit = limit.min(MAX_PAGE_SIZE);
    let end_index = start_index
        .saturating_add(safe_limit)
        .min(get_pool_count(env));

    let mut assets = Vec::new(env);
    for i in start_index..end_index {
        if let Some(asset) = get_pool_at(env, i) {
            assets.push_back(asset);
        }
    }
    assets
}
