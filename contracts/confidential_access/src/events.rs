#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, U256};

use crate::types::AccessDecision;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CooldownSetEvent {
    pub old_secs: u64,
    pub new_secs: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionSubmittedEvent {
    pub sender: Address,
    pub batch_id: u64,
    pub driving_style: BytesN<32>,
    pub route_preference: BytesN<32>,
    pub comfort_level: BytesN<32>,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessScoreUpdatedEvent {
    pub sender: Address,
    pub batch_id: u64,
    pub encrypted_score: BytesN<32>,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptionRequestedEvent {
    pub request_id: u64,
    pub batch_id: u64,
    pub state_hash: BytesN<32>,
}

/// The only place decrypted totals become observable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptionCompletedEvent {
    pub request_id: u64,
    pub batch_id: u64,
    pub driving_style: U256,
    pub route_preference: U256,
    pub comfort_level: U256,
    pub access_score: U256,
    pub access_granted: bool,
}

pub fn publish_provider_added(env: &Env, provider: Address) {
    env.events().publish((symbol_short!("PROV_ADD"),), provider);
}

pub fn publish_provider_removed(env: &Env, provider: Address) {
    env.events().publish((symbol_short!("PROV_REM"),), provider);
}

pub fn publish_cooldown_set(env: &Env, old_secs: u64, new_secs: u64) {
    env.events().publish(
        (symbol_short!("COOLDOWN"),),
        CooldownSetEvent { old_secs, new_secs },
    );
}

pub fn publish_batch_opened(env: &Env, batch_id: u64) {
    env.events().publish((symbol_short!("BATCH_OPN"),), batch_id);
}

pub fn publish_batch_closed(env: &Env, batch_id: u64) {
    env.events().publish((symbol_short!("BATCH_CLS"),), batch_id);
}

pub fn publish_contribution_submitted(
    env: &Env,
    sender: Address,
    batch_id: u64,
    values: [BytesN<32>; 3],
) {
    let [driving_style, route_preference, comfort_level] = values;
    env.events().publish(
        (symbol_short!("CONTRIB"), sender.clone(), batch_id),
        ContributionSubmittedEvent {
            sender,
            batch_id,
            driving_style,
            route_preference,
            comfort_level,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_access_score_updated(
    env: &Env,
    sender: Address,
    batch_id: u64,
    encrypted_score: BytesN<32>,
) {
    env.events().publish(
        (symbol_short!("SCORE_UPD"), sender.clone(), batch_id),
        AccessScoreUpdatedEvent {
            sender,
            batch_id,
            encrypted_score,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_decryption_requested(
    env: &Env,
    request_id: u64,
    batch_id: u64,
    state_hash: BytesN<32>,
) {
    env.events().publish(
        (symbol_short!("DEC_REQ"), request_id),
        DecryptionRequestedEvent {
            request_id,
            batch_id,
            state_hash,
        },
    );
}

pub fn publish_decryption_completed(env: &Env, decision: &AccessDecision) {
    env.events().publish(
        (symbol_short!("DEC_DONE"), decision.request_id),
        DecryptionCompletedEvent {
            request_id: decision.request_id,
            batch_id: decision.batch_id,
            driving_style: decision.totals.driving_style.clone(),
            route_preference: decision.totals.route_preference.clone(),
            comfort_level: decision.totals.comfort_level.clone(),
            access_score: decision.totals.access_score.clone(),
            access_granted: decision.access_granted,
        },
    );
}
