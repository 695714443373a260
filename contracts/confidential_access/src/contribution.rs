use soroban_sdk::{symbol_short, Address, BytesN, Env, Symbol};

use crate::accumulator;
use crate::batch;
use crate::capabilities::FheExecutorClient;
use crate::errors::ContractError;
use crate::events;
use crate::types::{Metric, SNAPSHOT_ORDER};

/// Cooldown channel shared by contributions and access-score updates.
pub const SUBMIT_CHANNEL: Symbol = symbol_short!("SUBMIT");

/// Gates shared by every provider write. Returns the open batch id.
fn admit(env: &Env, provider: &Address) -> Result<u64, ContractError> {
    common::require_provider(env, provider)?;
    let batch_id = batch::require_open(env)?;
    common::require_cooldown_elapsed(env, &SUBMIT_CHANNEL, provider)?;
    Ok(batch_id)
}

/// Both the provider and this contract must be able to use `handle`.
fn require_usable(
    env: &Env,
    executor: &FheExecutorClient,
    provider: &Address,
    handle: &BytesN<32>,
) -> Result<(), ContractError> {
    if !executor.is_allowed(handle, provider)
        || !executor.is_allowed(handle, &env.current_contract_address())
    {
        return Err(ContractError::UnauthorizedCiphertext);
    }
    Ok(())
}

/// Folds one contribution into the totals.
///
/// The first contribution initialises every metric to an encrypted zero, so
/// a decryption request never sees an empty metric afterwards. The comfort
/// level also feeds the access score.
pub fn submit(
    env: &Env,
    executor: &FheExecutorClient,
    provider: &Address,
    driving_style: BytesN<32>,
    route_preference: BytesN<32>,
    comfort_level: BytesN<32>,
) -> Result<u64, ContractError> {
    let batch_id = admit(env, provider)?;
    for handle in [&driving_style, &route_preference, &comfort_level] {
        require_usable(env, executor, provider, handle)?;
    }

    for metric in SNAPSHOT_ORDER {
        accumulator::ensure_initialized(env, executor, metric);
    }
    accumulator::accumulate(env, executor, Metric::DrivingStyle, &driving_style)?;
    accumulator::accumulate(env, executor, Metric::RoutePreference, &route_preference)?;
    accumulator::accumulate(env, executor, Metric::ComfortLevel, &comfort_level)?;
    accumulator::accumulate(env, executor, Metric::AccessScore, &comfort_level)?;

    batch::record_submission(env, batch_id);
    common::record_action(env, &SUBMIT_CHANNEL, provider);

    events::publish_contribution_submitted(
        env,
        provider.clone(),
        batch_id,
        [driving_style, route_preference, comfort_level],
    );
    Ok(batch_id)
}

/// Adds an encrypted adjustment to the access score only.
pub fn update_access_score(
    env: &Env,
    executor: &FheExecutorClient,
    provider: &Address,
    encrypted_score: BytesN<32>,
) -> Result<u64, ContractError> {
    let batch_id = admit(env, provider)?;
    require_usable(env, executor, provider, &encrypted_score)?;

    accumulator::ensure_initialized(env, executor, Metric::AccessScore);
    accumulator::accumulate(env, executor, Metric::AccessScore, &encrypted_score)?;

    common::record_action(env, &SUBMIT_CHANNEL, provider);

    events::publish_access_score_updated(env, provider.clone(), batch_id, encrypted_score);
    Ok(batch_id)
}
