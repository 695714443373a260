#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::CommonError;

const PAUSED: Symbol = symbol_short!("PAUSED");

/// Sets the contract pause state.
///
/// Callers are responsible for enforcing owner authorization before invoking
/// this function; the module itself does **not** perform auth checks.
pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}

/// Returns `true` when the contract is paused.
pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Returns `CommonError::Paused` when the contract is paused.
///
/// Place this at the top of every state-mutating function that must honour
/// the pause.  View-only functions should **not** call this.
pub fn require_not_paused(env: &Env) -> Result<(), CommonError> {
    if is_paused(env) {
        return Err(CommonError::Paused);
    }
    Ok(())
}

/// Pause the contract. Emits a `("PAUSED", caller)` event.
///
/// Pausing an already paused contract is a no-op and emits nothing.
pub fn pause(env: &Env, caller: &Address) {
    if is_paused(env) {
        return;
    }
    set_paused(env, true);
    env.events()
        .publish((symbol_short!("PAUSED"), caller.clone()), true);
}

/// Unpause the contract. Emits an `("UNPAUSED", caller)` event.
pub fn unpause(env: &Env, caller: &Address) {
    if !is_paused(env) {
        return;
    }
    set_paused(env, false);
    env.events()
        .publish((symbol_short!("UNPAUSED"), caller.clone()), false);
}
