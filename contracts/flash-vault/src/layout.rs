use crate::access::require_operator;
use crate::storage::{get_layout, set_layout};
use flash_types::{FlashError, StorageLayout};
use soroban_sdk::{Address, BytesN, Env, Symbol};

/// Accept `proposed` as the successor of `current` only if every existing
/// slot keeps its index, name and kind.
///
/// New slots may only be appended, and appending requires a higher version.
pub fn check_compatible(current: &StorageLayout, proposed: &StorageLayout) -> Result<(), FlashError> {
    if proposed.version < current.version {
        return Err(FlashError::IncompatibleUpgradeLayout);
    }
    if proposed.slots.len() < current.slots.len() {
        return Err(FlashError::IncompatibleUpgradeLayout);
    }

    for (index, existing) in current.slots.iter().enumerate() {
        match proposed.slots.get(index as u32) {
            Some(slot) if slot == existing => {}
            _ => return Err(FlashError::IncompatibleUpgradeLayout),
        }
    }

    let appends = proposed.slots.len() > current.slots.len();
    if appends && proposed.version == current.version {
        return Err(FlashError::IncompatibleUpgradeLayout);
    }
    Ok(())
}

/// Check `proposed` against the stored layout without changing anything
pub fn check_upgrade(env: &Env, proposed: &StorageLayout) -> Result<(), FlashError> {
    check_compatible(&get_layout(env)?, proposed)
}

/// Record the new layout, then swap the contract code.
///
/// The compatibility check runs first; a rejected layout changes nothing.
pub fn upgrade(
    env: &Env,
    caller: &Address,
    new_wasm_hash: BytesN<32>,
    proposed: StorageLayout,
) -> Result<(), FlashError> {
    require_operator(env, caller)?;
    check_upgrade(env, &proposed)?;

    set_layout(env, &proposed);
    env.events().publish(
        (Symbol::new(env, "upgrade"),),
        (proposed.version, new_wasm_hash.clone()),
    );
    env.deployer().update_current_contract_wasm(new_wasm_hash);
    Ok(())
}
