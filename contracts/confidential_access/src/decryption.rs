//! Decryption request / callback protocol.
//!
//! A request snapshots the metric handles, fingerprints them and stores a
//! [`DecryptionContext`] under the oracle's request id. The callback for that
//! id is accepted at most once, and only while the live handles still hash to
//! the stored fingerprint: any contribution serialized in between changes a
//! handle and turns the callback into a `StateMismatch`.

use soroban_sdk::{log, symbol_short, Address, Bytes, Env, Symbol, U256};

use crate::accumulator;
use crate::batch;
use crate::capabilities::{DecryptionOracleClient, FheExecutorClient, CALLBACK_FN};
use crate::errors::ContractError;
use crate::events;
use crate::fingerprint;
use crate::types::{
    AccessDecision, DecryptionContext, MetricTotals, ACCESS_THRESHOLD, CLEARTEXT_WORD_LEN,
    METRIC_COUNT,
};

/// Cooldown channel for decryption requests.
pub const REQUEST_CHANNEL: Symbol = symbol_short!("REQUEST");

const DEC_CTX: Symbol = symbol_short!("DEC_CTX");
const DECISION: Symbol = symbol_short!("DECISION");

const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 518_400;

pub fn context(env: &Env, request_id: u64) -> Option<DecryptionContext> {
    env.storage().persistent().get(&(DEC_CTX, request_id))
}

fn save_context(env: &Env, request_id: u64, context: &DecryptionContext) {
    let key = (DEC_CTX, request_id);
    env.storage().persistent().set(&key, context);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn decision(env: &Env, request_id: u64) -> Option<AccessDecision> {
    env.storage().persistent().get(&(DECISION, request_id))
}

fn save_decision(env: &Env, decision: &AccessDecision) {
    let key = (DECISION, decision.request_id);
    env.storage().persistent().set(&key, decision);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Issues a fingerprinted decryption request for the current totals.
///
/// The caller must already be authorised and the contract unpaused.
pub fn request(
    env: &Env,
    executor: &FheExecutorClient,
    oracle: &DecryptionOracleClient,
    caller: &Address,
) -> Result<u64, ContractError> {
    let batch_id = batch::require_open(env)?;
    common::require_cooldown_elapsed(env, &REQUEST_CHANNEL, caller)?;
    let handles = accumulator::snapshot(env, executor)?;
    let state_hash = fingerprint::of_current_instance(env, &handles);

    let request_id = oracle.request_decryption(
        &env.current_contract_address(),
        &handles,
        &Symbol::new(env, CALLBACK_FN),
    );
    // A reused id would overwrite a processed context and reopen it for replay.
    if context(env, request_id).is_some() {
        return Err(ContractError::ReplayAttempt);
    }

    save_context(
        env,
        request_id,
        &DecryptionContext {
            batch_id,
            state_hash: state_hash.clone(),
            processed: false,
            requested_at: env.ledger().timestamp(),
        },
    );
    common::record_action(env, &REQUEST_CHANNEL, caller);

    events::publish_decryption_requested(env, request_id, batch_id, state_hash);
    Ok(request_id)
}

/// Validates and applies an oracle delivery for `request_id`.
///
/// Checks run in a fixed order (unknown id, replay, state, proof, decode)
/// and all of them precede the single write that marks the context processed.
pub fn fulfill(
    env: &Env,
    executor: &FheExecutorClient,
    oracle: &DecryptionOracleClient,
    request_id: u64,
    cleartexts: &Bytes,
    proof: &Bytes,
) -> Result<AccessDecision, ContractError> {
    let mut ctx = context(env, request_id).ok_or(ContractError::UnknownRequest)?;
    if ctx.processed {
        log!(env, "decryption callback replayed", request_id);
        return Err(ContractError::ReplayAttempt);
    }

    let handles = accumulator::snapshot(env, executor)?;
    if fingerprint::of_current_instance(env, &handles) != ctx.state_hash {
        log!(env, "decryption callback against stale state", request_id);
        return Err(ContractError::StateMismatch);
    }

    if !oracle.verify(&request_id, cleartexts, proof) {
        log!(env, "decryption callback with invalid proof", request_id);
        return Err(ContractError::InvalidProof);
    }

    let totals = decode_cleartexts(env, cleartexts)?;
    let access_granted = is_access_granted(env, &totals.access_score);

    ctx.processed = true;
    save_context(env, request_id, &ctx);

    let decision = AccessDecision {
        request_id,
        batch_id: ctx.batch_id,
        totals,
        access_granted,
        decided_at: env.ledger().timestamp(),
    };
    save_decision(env, &decision);
    events::publish_decryption_completed(env, &decision);
    Ok(decision)
}

/// Splits a payload of four 32-byte big-endian words, positionally.
pub fn decode_cleartexts(env: &Env, payload: &Bytes) -> Result<MetricTotals, ContractError> {
    if payload.len() != METRIC_COUNT * CLEARTEXT_WORD_LEN {
        return Err(ContractError::MalformedCleartext);
    }
    let word = |index: u32| {
        let start = index * CLEARTEXT_WORD_LEN;
        U256::from_be_bytes(env, &payload.slice(start..start + CLEARTEXT_WORD_LEN))
    };
    Ok(MetricTotals {
        driving_style: word(0),
        route_preference: word(1),
        comfort_level: word(2),
        access_score: word(3),
    })
}

pub fn is_access_granted(env: &Env, access_score: &U256) -> bool {
    *access_score >= U256::from_u32(env, ACCESS_THRESHOLD)
}
