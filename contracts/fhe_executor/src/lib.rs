#![no_std]

//! Additively homomorphic ciphertext store.
//!
//! Ciphertexts never leave the contract; callers work with 32-byte handles.
//! Every ciphertext produced (by `encrypt` or `add`) gets a fresh handle, so a
//! handle always names one immutable ciphertext. Each handle carries an allow
//! list of accounts that may compute on it, share it, or ask for it to be
//! decrypted. Only the configured decryptor may read plaintexts back.

pub mod events;
pub mod homomorphic;


use soroban_sdk::{
    contract, contractimpl, symbol_short, xdr::ToXdr, Address, Bytes, BytesN, Env, Symbol,
};

use crate::homomorphic::{HomomorphicEngine, PaillierPrivateKey, PaillierPublicKey};

// ── Storage keys ────────────────────────────────────────────────────────────────

const PUB_KEY: Symbol = symbol_short!("PUB_KEY");
const PRIV_KEY: Symbol = symbol_short!("PRIV_KEY");
const DECRYPTOR: Symbol = symbol_short!("DECRYPTR");
const HANDLE_CTR: Symbol = symbol_short!("HNDL_CTR");
const CIPHERTEXT: Symbol = symbol_short!("CTXT");
const ACL: Symbol = symbol_short!("ACL");

const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 518_400;

/// Largest plaintext `encrypt` accepts.
///
/// Keeps accumulated sums far below `n`, where Paillier addition would wrap.
pub const MAX_PLAINTEXT: u128 = u32::MAX as u128;

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 10,
    UnknownHandle = 20,
    PlaintextOutOfRange = 30,
    InvalidKey = 31,
}

impl From<common::CommonError> for ContractError {
    fn from(err: common::CommonError) -> Self {
        match err {
            common::CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
            common::CommonError::NotInitialized => ContractError::NotInitialized,
            _ => ContractError::Unauthorized,
        }
    }
}

// ── Contract ───────────────────────────────────────────────────────────────────

#[contract]
pub struct FheExecutorContract;

#[contractimpl]
impl FheExecutorContract {
    pub fn initialize(
        env: Env,
        admin: Address,
        pub_key: PaillierPublicKey,
        priv_key: PaillierPrivateKey,
        decryptor: Address,
    ) -> Result<(), ContractError> {
        if !pub_key.is_well_formed() {
            return Err(ContractError::InvalidKey);
        }
        common::init_owner(&env, &admin)?;
        env.storage().instance().set(&PUB_KEY, &pub_key);
        env.storage().instance().set(&PRIV_KEY, &priv_key);
        env.storage().instance().set(&DECRYPTOR, &decryptor);
        env.storage().instance().set(&HANDLE_CTR, &0u64);
        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        common::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn get_decryptor(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&DECRYPTOR)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn set_decryptor(env: Env, admin: Address, decryptor: Address) -> Result<(), ContractError> {
        common::require_owner(&env, &admin)?;
        env.storage().instance().set(&DECRYPTOR, &decryptor);
        events::publish_decryptor_set(&env, decryptor);
        Ok(())
    }

    // ── Homomorphic Operations ────────────────────────────────────────────────

    /// Encrypts `value` (at most `MAX_PLAINTEXT`) and returns a handle allowed for `owner`.
    pub fn encrypt(env: Env, owner: Address, value: u128) -> Result<BytesN<32>, ContractError> {
        owner.require_auth();
        let pub_key = Self::load_pub_key(&env)?;
        if value > MAX_PLAINTEXT || value >= pub_key.n {
            return Err(ContractError::PlaintextOutOfRange);
        }
        let ciphertext = HomomorphicEngine::encrypt(&env, &pub_key, value);
        Ok(Self::store_ciphertext(&env, ciphertext, &owner))
    }

    /// Homomorphically adds `lhs` and `rhs`. The result is allowed for `caller`.
    pub fn add(
        env: Env,
        caller: Address,
        lhs: BytesN<32>,
        rhs: BytesN<32>,
    ) -> Result<BytesN<32>, ContractError> {
        caller.require_auth();
        let pub_key = Self::load_pub_key(&env)?;
        let c1 = Self::load_ciphertext(&env, &lhs)?;
        let c2 = Self::load_ciphertext(&env, &rhs)?;
        if !Self::is_allowed(env.clone(), lhs, caller.clone())
            || !Self::is_allowed(env.clone(), rhs, caller.clone())
        {
            return Err(ContractError::Unauthorized);
        }
        let sum = HomomorphicEngine::add_ciphertexts(&pub_key, c1, c2);
        Ok(Self::store_ciphertext(&env, sum, &caller))
    }

    /// Shares `handle` with `grantee`. `caller` must already be allowed.
    pub fn allow(
        env: Env,
        caller: Address,
        handle: BytesN<32>,
        grantee: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        Self::load_ciphertext(&env, &handle)?;
        if !Self::is_allowed(env.clone(), handle.clone(), caller) {
            return Err(ContractError::Unauthorized);
        }
        Self::grant(&env, &handle, &grantee);
        Ok(())
    }

    pub fn is_allowed(env: Env, handle: BytesN<32>, account: Address) -> bool {
        env.storage()
            .persistent()
            .get(&(ACL, handle, account))
            .unwrap_or(false)
    }

    pub fn is_initialized(env: Env, handle: BytesN<32>) -> bool {
        env.storage().persistent().has(&(CIPHERTEXT, handle))
    }

    /// Decrypts `handle`. Restricted to the configured decryptor.
    pub fn decrypt(env: Env, caller: Address, handle: BytesN<32>) -> Result<u128, ContractError> {
        caller.require_auth();
        let decryptor = Self::get_decryptor(env.clone())?;
        if caller != decryptor {
            return Err(ContractError::Unauthorized);
        }
        let pub_key = Self::load_pub_key(&env)?;
        let priv_key: PaillierPrivateKey = env
            .storage()
            .instance()
            .get(&PRIV_KEY)
            .ok_or(ContractError::NotInitialized)?;
        let ciphertext = Self::load_ciphertext(&env, &handle)?;
        Ok(HomomorphicEngine::decrypt(&pub_key, &priv_key, ciphertext))
    }

    pub fn get_public_key(env: Env) -> Result<PaillierPublicKey, ContractError> {
        Self::load_pub_key(&env)
    }
}

impl FheExecutorContract {
    fn load_pub_key(env: &Env) -> Result<PaillierPublicKey, ContractError> {
        env.storage()
            .instance()
            .get(&PUB_KEY)
            .ok_or(ContractError::NotInitialized)
    }

    fn load_ciphertext(env: &Env, handle: &BytesN<32>) -> Result<u128, ContractError> {
        let key = (CIPHERTEXT, handle.clone());
        let ciphertext = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(ContractError::UnknownHandle)?;
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        Ok(ciphertext)
    }

    fn grant(env: &Env, handle: &BytesN<32>, account: &Address) {
        let key = (ACL, handle.clone(), account.clone());
        env.storage().persistent().set(&key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    /// handle = sha256(executor address || counter || ciphertext)
    fn store_ciphertext(env: &Env, ciphertext: u128, owner: &Address) -> BytesN<32> {
        let counter: u64 = env
            .storage()
            .instance()
            .get(&HANDLE_CTR)
            .unwrap_or(0u64)
            .saturating_add(1);
        env.storage().instance().set(&HANDLE_CTR, &counter);

        let mut preimage: Bytes = env.current_contract_address().to_xdr(env);
        preimage.extend_from_array(&counter.to_be_bytes());
        preimage.extend_from_array(&ciphertext.to_be_bytes());
        let handle: BytesN<32> = env.crypto().sha256(&preimage).into();

        let key = (CIPHERTEXT, handle.clone());
        env.storage().persistent().set(&key, &ciphertext);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        Self::grant(env, &handle, owner);

        events::publish_ciphertext_created(env, handle.clone(), owner.clone());
        handle
    }
}
