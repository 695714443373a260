#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol, Vec};

/// Fired when a decryption is requested. Off-ledger gateways watch this.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptionAskedEvent {
    pub request_id: u64,
    pub requester: Address,
    pub callback: Symbol,
    pub handles: Vec<BytesN<32>>,
    pub timestamp: u64,
}

/// Fired when the gateway publishes cleartexts for a request.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptionFulfilledEvent {
    pub request_id: u64,
    pub proof: BytesN<32>,
    pub timestamp: u64,
}

pub fn publish_decryption_asked(
    env: &Env,
    request_id: u64,
    requester: Address,
    callback: Symbol,
    handles: Vec<BytesN<32>>,
) {
    env.events().publish(
        (symbol_short!("DEC_ASK"), requester.clone()),
        DecryptionAskedEvent {
            request_id,
            requester,
            callback,
            handles,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_decryption_fulfilled(env: &Env, request_id: u64, proof: BytesN<32>) {
    env.events().publish(
        (symbol_short!("DEC_FULL"), request_id),
        DecryptionFulfilledEvent {
            request_id,
            proof,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_gateway_set(env: &Env, gateway: Address) {
    env.events().publish((symbol_short!("GATEWAY"),), gateway);
}
