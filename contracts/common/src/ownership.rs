use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::CommonError;

const OWNER: Symbol = symbol_short!("OWNER");

/// Stores the owner. Fails if an owner was already recorded.
pub fn init_owner(env: &Env, owner: &Address) -> Result<(), CommonError> {
    if env.storage().instance().has(&OWNER) {
        return Err(CommonError::AlreadyInitialized);
    }
    env.storage().instance().set(&OWNER, owner);
    Ok(())
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

pub fn has_owner(env: &Env) -> bool {
    env.storage().instance().has(&OWNER)
}

/// Authorises `caller` and checks it is the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), CommonError> {
    caller.require_auth();
    match get_owner(env) {
        Some(owner) if owner == *caller => Ok(()),
        Some(_) => Err(CommonError::NotOwner),
        None => Err(CommonError::NotInitialized),
    }
}
