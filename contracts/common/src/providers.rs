use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::CommonError;

const PROVIDER: Symbol = symbol_short!("PROVIDER");
const PROVIDER_TTL_THRESHOLD: u32 = 5_184_000; // 5,184,000 ledgers ~= 300 days (@ ~5s/ledger)
const PROVIDER_TTL_EXTEND_TO: u32 = 10_368_000; // 10,368,000 ledgers ~= 600 days (@ ~5s/ledger)

fn extend_provider_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, PROVIDER_TTL_THRESHOLD, PROVIDER_TTL_EXTEND_TO);
}

/// Adds an address to the provider set.
///
/// Returns `false` when the address was already a provider.
pub fn add_provider(env: &Env, provider: &Address) -> bool {
    let key = (PROVIDER, provider.clone());
    if env.storage().persistent().has(&key) {
        return false;
    }
    env.storage().persistent().set(&key, &true);
    extend_provider_ttl(env, &key);
    true
}

/// Removes an address from the provider set.
///
/// Returns `false` when the address was not a provider.
pub fn remove_provider(env: &Env, provider: &Address) -> bool {
    let key = (PROVIDER, provider.clone());
    if !env.storage().persistent().has(&key) {
        return false;
    }
    env.storage().persistent().remove(&key);
    true
}

/// Returns whether an address is in the provider set.
pub fn is_provider(env: &Env, address: &Address) -> bool {
    let key = (PROVIDER, address.clone());
    let is_provider = env.storage().persistent().get(&key).unwrap_or(false);
    if is_provider {
        extend_provider_ttl(env, &key);
    }
    is_provider
}

/// Authorises `caller` and checks provider membership.
pub fn require_provider(env: &Env, caller: &Address) -> Result<(), CommonError> {
    caller.require_auth();
    if !is_provider(env, caller) {
        return Err(CommonError::NotProvider);
    }
    Ok(())
}
