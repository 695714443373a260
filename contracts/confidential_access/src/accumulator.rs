//! Encrypted running totals, one per [`Metric`].
//!
//! A metric holds the handle of its current total. Totals only ever grow by
//! homomorphic addition; they are never reset or decremented, and every
//! addition yields a new handle.

use soroban_sdk::{symbol_short, BytesN, Env, Symbol, Vec};

use crate::capabilities::FheExecutorClient;
use crate::errors::ContractError;
use crate::types::{Metric, SNAPSHOT_ORDER};

const METRIC: Symbol = symbol_short!("METRIC");

/// Current handle of `metric`, if it was ever initialised.
pub fn handle(env: &Env, metric: Metric) -> Option<BytesN<32>> {
    env.storage().instance().get(&(METRIC, metric))
}

fn set_handle(env: &Env, metric: Metric, handle: &BytesN<32>) {
    env.storage().instance().set(&(METRIC, metric), handle);
}

/// Sets `metric` to an encrypted zero unless it already holds a total.
pub fn ensure_initialized(env: &Env, executor: &FheExecutorClient, metric: Metric) -> BytesN<32> {
    if let Some(existing) = handle(env, metric) {
        if executor.is_initialized(&existing) {
            return existing;
        }
    }
    let zero = executor.encrypt(&env.current_contract_address(), &0u128);
    set_handle(env, metric, &zero);
    zero
}

/// Fails with `NotInitialized` unless `metric` holds a live ciphertext.
pub fn require_initialized(
    env: &Env,
    executor: &FheExecutorClient,
    metric: Metric,
) -> Result<BytesN<32>, ContractError> {
    match handle(env, metric) {
        Some(h) if executor.is_initialized(&h) => Ok(h),
        _ => Err(ContractError::NotInitialized),
    }
}

/// Adds `delta` to `metric`'s total and returns the new total's handle.
pub fn accumulate(
    env: &Env,
    executor: &FheExecutorClient,
    metric: Metric,
    delta: &BytesN<32>,
) -> Result<BytesN<32>, ContractError> {
    let total = require_initialized(env, executor, metric)?;
    let updated = executor.add(&env.current_contract_address(), &total, delta);
    set_handle(env, metric, &updated);
    Ok(updated)
}

/// Handles of all metrics in [`SNAPSHOT_ORDER`].
pub fn snapshot(env: &Env, executor: &FheExecutorClient) -> Result<Vec<BytesN<32>>, ContractError> {
    let mut handles = Vec::new(env);
    for metric in SNAPSHOT_ORDER {
        handles.push_back(require_initialized(env, executor, metric)?);
    }
    Ok(handles)
}
