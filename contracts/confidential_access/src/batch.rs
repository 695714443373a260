use soroban_sdk::{symbol_short, Env, Symbol};

use crate::errors::ContractError;
use crate::types::BatchState;

const BATCH: Symbol = symbol_short!("BATCH");
const BATCH_CNT: Symbol = symbol_short!("BATCH_CNT");

const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 518_400;

pub fn current(env: &Env) -> BatchState {
    env.storage()
        .instance()
        .get(&BATCH)
        .unwrap_or(BatchState { id: 0, open: false })
}

/// `Closed -> Open`: assigns the next batch id.
pub fn open(env: &Env) -> Result<u64, ContractError> {
    let state = current(env);
    if state.open {
        return Err(ContractError::InvalidBatch);
    }
    let id = state.id.saturating_add(1);
    env.storage()
        .instance()
        .set(&BATCH, &BatchState { id, open: true });
    Ok(id)
}

/// `Open -> Closed`. Returns the id of the closed batch.
pub fn close(env: &Env) -> Result<u64, ContractError> {
    let mut state = current(env);
    if !state.open {
        return Err(ContractError::InvalidBatch);
    }
    state.open = false;
    env.storage().instance().set(&BATCH, &state);
    Ok(state.id)
}

/// Returns the open batch id or `BatchNotOpen`.
pub fn require_open(env: &Env) -> Result<u64, ContractError> {
    let state = current(env);
    if !state.open {
        return Err(ContractError::BatchNotOpen);
    }
    Ok(state.id)
}

pub fn submissions(env: &Env, batch_id: u64) -> u32 {
    env.storage()
        .persistent()
        .get(&(BATCH_CNT, batch_id))
        .unwrap_or(0)
}

pub fn record_submission(env: &Env, batch_id: u64) -> u32 {
    let key = (BATCH_CNT, batch_id);
    let count = submissions(env, batch_id).saturating_add(1);
    env.storage().persistent().set(&key, &count);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    count
}
