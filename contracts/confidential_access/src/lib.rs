#![no_std]

//! Confidential score aggregation with verified threshold decisions.
//!
//! Allow-listed providers push encrypted contributions into four running
//! totals while a batch is open. Anyone may then ask for an access check:
//! the contract fingerprints the current ciphertext handles and asks an
//! external oracle to decrypt them. The oracle's answer arrives later, as a
//! separate call to [`ConfidentialAccessContract::on_decryption`], and is
//! only accepted if the totals are unchanged since the request, the request
//! has not been answered before, and the oracle's proof checks out.

pub mod accumulator;
pub mod batch;
pub mod capabilities;
pub mod contribution;
pub mod decryption;
pub mod errors;
pub mod events;
pub mod fingerprint;
pub mod types;


use soroban_sdk::{contract, contractimpl, symbol_short, Address, Bytes, BytesN, Env, Symbol};

use crate::capabilities::{DecryptionOracleClient, FheExecutorClient};
pub use crate::errors::ContractError;
pub use crate::types::{
    AccessDecision, BatchState, DecryptionContext, Metric, MetricTotals, ACCESS_THRESHOLD,
};

// ── Storage keys ────────────────────────────────────────────────────────────────

const EXECUTOR: Symbol = symbol_short!("EXECUTOR");
const ORACLE: Symbol = symbol_short!("ORACLE");

// ── Contract ───────────────────────────────────────────────────────────────────

#[contract]
pub struct ConfidentialAccessContract;

#[contractimpl]
impl ConfidentialAccessContract {
    pub fn initialize(
        env: Env,
        owner: Address,
        executor: Address,
        oracle: Address,
        cooldown_secs: u64,
    ) -> Result<(), ContractError> {
        owner.require_auth();
        common::init_owner(&env, &owner)?;
        env.storage().instance().set(&EXECUTOR, &executor);
        env.storage().instance().set(&ORACLE, &oracle);
        common::set_cooldown_secs(&env, cooldown_secs);
        Ok(())
    }

    // ── Owner administration ─────────────────────────────────────────────────

    pub fn add_provider(env: Env, owner: Address, provider: Address) -> Result<(), ContractError> {
        common::require_owner(&env, &owner)?;
        if common::add_provider(&env, &provider) {
            events::publish_provider_added(&env, provider);
        }
        Ok(())
    }

    pub fn remove_provider(
        env: Env,
        owner: Address,
        provider: Address,
    ) -> Result<(), ContractError> {
        common::require_owner(&env, &owner)?;
        if common::remove_provider(&env, &provider) {
            events::publish_provider_removed(&env, provider);
        }
        Ok(())
    }

    pub fn pause(env: Env, owner: Address) -> Result<(), ContractError> {
        common::require_owner(&env, &owner)?;
        common::pause(&env, &owner);
        Ok(())
    }

    pub fn unpause(env: Env, owner: Address) -> Result<(), ContractError> {
        common::require_owner(&env, &owner)?;
        common::unpause(&env, &owner);
        Ok(())
    }

    pub fn set_cooldown(env: Env, owner: Address, secs: u64) -> Result<(), ContractError> {
        common::require_owner(&env, &owner)?;
        let old = common::set_cooldown_secs(&env, secs);
        events::publish_cooldown_set(&env, old, secs);
        Ok(())
    }

    // ── Batches ──────────────────────────────────────────────────────────────

    pub fn open_batch(env: Env, owner: Address) -> Result<u64, ContractError> {
        common::require_owner(&env, &owner)?;
        common::require_not_paused(&env)?;
        let batch_id = batch::open(&env)?;
        events::publish_batch_opened(&env, batch_id);
        Ok(batch_id)
    }

    pub fn close_batch(env: Env, owner: Address) -> Result<(), ContractError> {
        common::require_owner(&env, &owner)?;
        common::require_not_paused(&env)?;
        let batch_id = batch::close(&env)?;
        events::publish_batch_closed(&env, batch_id);
        Ok(())
    }

    // ── Contributions ────────────────────────────────────────────────────────

    /// Adds three encrypted values to the driving-style, route-preference and
    /// comfort-level totals (the comfort level also feeds the access score).
    /// Returns the batch the contribution was counted in.
    pub fn submit_contribution(
        env: Env,
        provider: Address,
        driving_style: BytesN<32>,
        route_preference: BytesN<32>,
        comfort_level: BytesN<32>,
    ) -> Result<u64, ContractError> {
        Self::require_ready(&env)?;
        let executor = Self::executor(&env)?;
        contribution::submit(
            &env,
            &executor,
            &provider,
            driving_style,
            route_preference,
            comfort_level,
        )
    }

    pub fn update_access_score(
        env: Env,
        provider: Address,
        encrypted_score: BytesN<32>,
    ) -> Result<u64, ContractError> {
        Self::require_ready(&env)?;
        let executor = Self::executor(&env)?;
        contribution::update_access_score(&env, &executor, &provider, encrypted_score)
    }

    // ── Decryption protocol ──────────────────────────────────────────────────

    /// Asks the oracle to decrypt the current totals. Returns the oracle's
    /// request id; the answer arrives through `on_decryption`.
    pub fn request_access_check(env: Env, caller: Address) -> Result<u64, ContractError> {
        caller.require_auth();
        Self::require_ready(&env)?;
        let executor = Self::executor(&env)?;
        let oracle = Self::oracle(&env)?;
        decryption::request(&env, &executor, &oracle, &caller)
    }

    /// Oracle delivery for `request_id`. Returns the access decision.
    pub fn on_decryption(
        env: Env,
        request_id: u64,
        cleartexts: Bytes,
        proof: Bytes,
    ) -> Result<bool, ContractError> {
        Self::require_ready(&env)?;
        let executor = Self::executor(&env)?;
        let oracle = Self::oracle(&env)?;
        decryption::fulfill(&env, &executor, &oracle, request_id, &cleartexts, &proof)
            .map(|decision| decision.access_granted)
    }

    // ── Views ────────────────────────────────────────────────────────────────

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        common::get_owner(&env).ok_or(ContractError::ContractNotInitialized)
    }

    pub fn get_executor(env: Env) -> Result<Address, ContractError> {
        Self::stored_address(&env, &EXECUTOR)
    }

    pub fn get_oracle(env: Env) -> Result<Address, ContractError> {
        Self::stored_address(&env, &ORACLE)
    }

    pub fn is_provider(env: Env, account: Address) -> bool {
        common::is_provider(&env, &account)
    }

    pub fn is_paused(env: Env) -> bool {
        common::is_paused(&env)
    }

    pub fn get_cooldown(env: Env) -> u64 {
        common::cooldown_secs(&env)
    }

    pub fn get_last_submission(env: Env, account: Address) -> Option<u64> {
        common::last_action(&env, &contribution::SUBMIT_CHANNEL, &account)
    }

    pub fn get_last_request(env: Env, account: Address) -> Option<u64> {
        common::last_action(&env, &decryption::REQUEST_CHANNEL, &account)
    }

    pub fn get_batch(env: Env) -> BatchState {
        batch::current(&env)
    }

    pub fn get_batch_submissions(env: Env, batch_id: u64) -> u32 {
        batch::submissions(&env, batch_id)
    }

    pub fn get_metric_handle(env: Env, metric: Metric) -> Option<BytesN<32>> {
        accumulator::handle(&env, metric)
    }

    /// Fingerprint of the live totals, as a request issued now would store it.
    pub fn get_state_hash(env: Env) -> Result<BytesN<32>, ContractError> {
        let executor = Self::executor(&env)?;
        let handles = accumulator::snapshot(&env, &executor)?;
        Ok(fingerprint::of_current_instance(&env, &handles))
    }

    pub fn get_decryption_context(env: Env, request_id: u64) -> Option<DecryptionContext> {
        decryption::context(&env, request_id)
    }

    pub fn get_decision(env: Env, request_id: u64) -> Option<AccessDecision> {
        decryption::decision(&env, request_id)
    }

    pub fn access_threshold() -> u32 {
        ACCESS_THRESHOLD
    }
}

impl ConfidentialAccessContract {
    fn require_ready(env: &Env) -> Result<(), ContractError> {
        if !common::has_owner(env) {
            return Err(ContractError::ContractNotInitialized);
        }
        common::require_not_paused(env)?;
        Ok(())
    }

    fn stored_address(env: &Env, key: &Symbol) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(ContractError::ContractNotInitialized)
    }

    fn executor(env: &Env) -> Result<FheExecutorClient<'_>, ContractError> {
        Ok(FheExecutorClient::new(env, &Self::stored_address(env, &EXECUTOR)?))
    }

    fn oracle(env: &Env) -> Result<DecryptionOracleClient<'_>, ContractError> {
        Ok(DecryptionOracleClient::new(env, &Self::stored_address(env, &ORACLE)?))
    }
}
