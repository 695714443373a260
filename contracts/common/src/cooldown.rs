//! Per-sender cooldown timestamps.
//!
//! Each rate-limited action lives on its own `channel` symbol so that, for
//! example, submissions and decryption requests are throttled independently.
//! Timestamps are ledger seconds.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::CommonError;

const LAST_ACTION: Symbol = symbol_short!("LAST_ACT");
const COOLDOWN: Symbol = symbol_short!("COOLDOWN");
const COOLDOWN_TTL_THRESHOLD: u32 = 17_280;
const COOLDOWN_TTL_EXTEND_TO: u32 = 518_400;

fn last_action_key(channel: &Symbol, who: &Address) -> (Symbol, Symbol, Address) {
    (LAST_ACTION, channel.clone(), who.clone())
}

/// Returns the configured cooldown duration in seconds (0 when unset).
pub fn cooldown_secs(env: &Env) -> u64 {
    env.storage().instance().get(&COOLDOWN).unwrap_or(0)
}

/// Replaces the cooldown duration and returns the previous value.
pub fn set_cooldown_secs(env: &Env, secs: u64) -> u64 {
    let old = cooldown_secs(env);
    env.storage().instance().set(&COOLDOWN, &secs);
    old
}

/// Ledger timestamp of `who`'s last action on `channel`, if any.
pub fn last_action(env: &Env, channel: &Symbol, who: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&last_action_key(channel, who))
}

/// Fails with `CooldownActive` while `now < last + cooldown`.
pub fn require_cooldown_elapsed(
    env: &Env,
    channel: &Symbol,
    who: &Address,
) -> Result<(), CommonError> {
    if let Some(last) = last_action(env, channel, who) {
        let ready_at = last.saturating_add(cooldown_secs(env));
        if env.ledger().timestamp() < ready_at {
            return Err(CommonError::CooldownActive);
        }
    }
    Ok(())
}

/// Records the current ledger timestamp as `who`'s last action on `channel`.
pub fn record_action(env: &Env, channel: &Symbol, who: &Address) {
    let key = last_action_key(channel, who);
    env.storage()
        .persistent()
        .set(&key, &env.ledger().timestamp());
    env.storage()
        .persistent()
        .extend_ttl(&key, COOLDOWN_TTL_THRESHOLD, COOLDOWN_TTL_EXTEND_TO);
}
