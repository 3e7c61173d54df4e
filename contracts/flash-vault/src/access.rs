use crate::storage::{get_admin, get_guard};
use flash_types::{AccessGuardClient, FlashError};
use soroban_sdk::{Address, Env};

/// Authorize an administrative call.
///
/// The caller must sign. When an external guard is configured its predicate
/// is authoritative; otherwise only the admin passes. Denial has no effects.
pub fn require_operator(env: &Env, caller: &Address) -> Result<(), FlashError> {
    caller.require_auth();

    let authorized = match get_guard(env) {
        Some(guard) => AccessGuardClient::new(env, &guard).is_authorized(caller),
        None => *caller == get_admin(env)?,
    };

    if !authorized {
        return Err(FlashError::Unauthorized);
    }
    Ok(())
}
