//! Interfaces of the two external collaborators.
//!
//! Both are separate contracts; the clients below are all this crate knows
//! about them.

use soroban_sdk::{Address, Bytes, BytesN, Env, Symbol, Vec};

/// Name of the entry point the oracle's relayer invokes on delivery.
pub const CALLBACK_FN: &str = "on_decryption";

#[soroban_sdk::contractclient(name = "FheExecutorClient")]
#[allow(dead_code)]
pub trait FheExecutorInterface {
    fn encrypt(env: Env, owner: Address, value: u128) -> BytesN<32>;
    fn add(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32>;
    fn is_allowed(env: Env, handle: BytesN<32>, account: Address) -> bool;
    fn is_initialized(env: Env, handle: BytesN<32>) -> bool;
}

#[soroban_sdk::contractclient(name = "DecryptionOracleClient")]
#[allow(dead_code)]
pub trait DecryptionOracleInterface {
    fn request_decryption(
        env: Env,
        requester: Address,
        handles: Vec<BytesN<32>>,
        callback: Symbol,
    ) -> u64;
    fn verify(env: Env, request_id: u64, cleartexts: Bytes, proof: Bytes) -> bool;
}
