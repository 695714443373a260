use common::CommonError;
use soroban_sdk::contracterror;

/// Every rejection the contract can return.
///
/// All of them are terminal for the call that produced them: checks run
/// before any write, so a rejected call leaves no trace in storage.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle ────────────────────────────────────────────
    AlreadyInitialized = 1,
    ContractNotInitialized = 2,
    // ── Authorization ────────────────────────────────────────
    NotOwner = 10,
    NotProvider = 11,
    // ── Availability / rate limit ────────────────────────────
    PausedContract = 40,
    CooldownActive = 41,
    BatchNotOpen = 100,
    InvalidBatch = 101,
    // ── Data readiness ───────────────────────────────────────
    /// A metric has never received a contribution.
    NotInitialized = 102,
    /// A submitted handle is not usable by the provider or by this contract.
    UnauthorizedCiphertext = 103,
    // ── Protocol integrity ───────────────────────────────────
    ReplayAttempt = 110,
    StateMismatch = 111,
    InvalidProof = 112,
    UnknownRequest = 113,
    MalformedCleartext = 114,
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotInitialized => ContractError::ContractNotInitialized,
            CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
            CommonError::NotOwner => ContractError::NotOwner,
            CommonError::NotProvider => ContractError::NotProvider,
            CommonError::Paused => ContractError::PausedContract,
            CommonError::CooldownActive => ContractError::CooldownActive,
        }
    }
}
