#![no_std]

//! Asynchronous decryption oracle.
//!
//! Requesters register an ordered list of ciphertext handles together with
//! the callback they expect to be invoked. An off-ledger gateway later calls
//! [`DecryptionOracleContract::fulfill`], which decrypts through the executor
//! and publishes the cleartexts with a proof binding them to this request.
//! A relayer delivers the response to the requester's callback, and the
//! requester authenticates it with [`DecryptionOracleContract::verify`].
//!
//! The oracle never calls back into the requester itself.

pub mod events;
pub mod proof;


use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Bytes, BytesN, Env, Symbol, Vec,
};

const EXECUTOR: Symbol = symbol_short!("EXECUTOR");
const GATEWAY: Symbol = symbol_short!("GATEWAY");
const REQ_CTR: Symbol = symbol_short!("REQ_CTR");
const REQUEST: Symbol = symbol_short!("REQUEST");
const RESPONSE: Symbol = symbol_short!("RESPONSE");

const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 518_400;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallbackDescriptor {
    pub contract: Address,
    pub function: Symbol,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptionRequest {
    pub id: u64,
    pub handles: Vec<BytesN<32>>,
    pub callback: CallbackDescriptor,
    pub requested_at: u64,
    pub fulfilled: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptionResponse {
    pub request_id: u64,
    pub cleartexts: Bytes,
    pub proof: Bytes,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum OracleError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 10,
    RequestNotFound = 20,
    EmptyRequest = 30,
}

impl From<common::CommonError> for OracleError {
    fn from(err: common::CommonError) -> Self {
        match err {
            common::CommonError::AlreadyInitialized => OracleError::AlreadyInitialized,
            common::CommonError::NotInitialized => OracleError::NotInitialized,
            _ => OracleError::Unauthorized,
        }
    }
}

#[soroban_sdk::contractclient(name = "FheExecutorClient")]
#[allow(dead_code)]
trait FheExecutorInterface {
    fn is_allowed(env: Env, handle: BytesN<32>, account: Address) -> bool;
    fn decrypt(env: Env, caller: Address, handle: BytesN<32>) -> u128;
}

#[contract]
pub struct DecryptionOracleContract;

#[contractimpl]
impl DecryptionOracleContract {
    pub fn initialize(
        env: Env,
        admin: Address,
        executor: Address,
        gateway: Address,
    ) -> Result<(), OracleError> {
        common::init_owner(&env, &admin)?;
        env.storage().instance().set(&EXECUTOR, &executor);
        env.storage().instance().set(&GATEWAY, &gateway);
        env.storage().instance().set(&REQ_CTR, &0u64);
        Ok(())
    }

    pub fn set_gateway(env: Env, admin: Address, gateway: Address) -> Result<(), OracleError> {
        common::require_owner(&env, &admin)?;
        env.storage().instance().set(&GATEWAY, &gateway);
        events::publish_gateway_set(&env, gateway);
        Ok(())
    }

    pub fn get_gateway(env: Env) -> Result<Address, OracleError> {
        env.storage()
            .instance()
            .get(&GATEWAY)
            .ok_or(OracleError::NotInitialized)
    }

    /// Registers a decryption request and returns its id immediately.
    ///
    /// `callback` names the function on `requester` that the relayer invokes
    /// with `(request_id, cleartexts, proof)` once the request is fulfilled.
    pub fn request_decryption(
        env: Env,
        requester: Address,
        handles: Vec<BytesN<32>>,
        callback: Symbol,
    ) -> Result<u64, OracleError> {
        requester.require_auth();
        if handles.is_empty() {
            return Err(OracleError::EmptyRequest);
        }

        let executor = FheExecutorClient::new(&env, &Self::executor(&env)?);
        for handle in handles.iter() {
            if !executor.is_allowed(&handle, &requester) {
                return Err(OracleError::Unauthorized);
            }
        }

        let id: u64 = env
            .storage()
            .instance()
            .get(&REQ_CTR)
            .unwrap_or(0u64)
            .saturating_add(1);
        env.storage().instance().set(&REQ_CTR, &id);

        let request = DecryptionRequest {
            id,
            handles: handles.clone(),
            callback: CallbackDescriptor {
                contract: requester.clone(),
                function: callback.clone(),
            },
            requested_at: env.ledger().timestamp(),
            fulfilled: false,
        };
        Self::save_request(&env, &request);

        events::publish_decryption_asked(&env, id, requester, callback, handles);
        Ok(id)
    }

    /// Decrypts the handles of `request_id` and issues the proof.
    ///
    /// Calling it again for a fulfilled request returns the stored response.
    pub fn fulfill(
        env: Env,
        gateway: Address,
        request_id: u64,
    ) -> Result<DecryptionResponse, OracleError> {
        gateway.require_auth();
        if gateway != Self::get_gateway(env.clone())? {
            return Err(OracleError::Unauthorized);
        }

        let mut request = Self::load_request(&env, request_id)?;
        let response_key = (RESPONSE, request_id);
        if request.fulfilled {
            return env
                .storage()
                .persistent()
                .get(&response_key)
                .ok_or(OracleError::RequestNotFound);
        }

        let oracle = env.current_contract_address();
        let executor = FheExecutorClient::new(&env, &Self::executor(&env)?);
        let mut cleartexts = Bytes::new(&env);
        for handle in request.handles.iter() {
            let value = executor.decrypt(&oracle, &handle);
            cleartexts.extend_from_array(&proof::encode_word(value));
        }

        let digest = proof::compute(&env, &oracle, request_id, &request.handles, &cleartexts);
        let response = DecryptionResponse {
            request_id,
            cleartexts,
            proof: digest.clone().into(),
        };

        env.storage().persistent().set(&response_key, &response);
        env.storage()
            .persistent()
            .extend_ttl(&response_key, TTL_THRESHOLD, TTL_EXTEND_TO);
        request.fulfilled = true;
        Self::save_request(&env, &request);

        events::publish_decryption_fulfilled(&env, request_id, digest);
        Ok(response)
    }

    /// Returns `true` iff `proof` is the proof this oracle issued for
    /// `cleartexts` as the decryption of exactly the handles of `request_id`.
    pub fn verify(env: Env, request_id: u64, cleartexts: Bytes, proof: Bytes) -> bool {
        let Ok(request) = Self::load_request(&env, request_id) else {
            return false;
        };
        let issued: Option<DecryptionResponse> =
            env.storage().persistent().get(&(RESPONSE, request_id));
        let Some(issued) = issued else {
            return false;
        };

        let expected: Bytes = proof::compute(
            &env,
            &env.current_contract_address(),
            request_id,
            &request.handles,
            &cleartexts,
        )
        .into();
        expected == proof && issued.proof == proof
    }

    pub fn get_request(env: Env, request_id: u64) -> Option<DecryptionRequest> {
        env.storage().persistent().get(&(REQUEST, request_id))
    }

    pub fn request_count(env: Env) -> u64 {
        env.storage().instance().get(&REQ_CTR).unwrap_or(0)
    }
}

impl DecryptionOracleContract {
    fn executor(env: &Env) -> Result<Address, OracleError> {
        env.storage()
            .instance()
            .get(&EXECUTOR)
            .ok_or(OracleError::NotInitialized)
    }

    fn load_request(env: &Env, request_id: u64) -> Result<DecryptionRequest, OracleError> {
        env.storage()
            .persistent()
            .get(&(REQUEST, request_id))
            .ok_or(OracleError::RequestNotFound)
    }

    fn save_request(env: &Env, request: &DecryptionRequest) {
        let key = (REQUEST, request.id);
        env.storage().persistent().set(&key, request);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
