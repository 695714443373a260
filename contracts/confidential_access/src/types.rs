use soroban_sdk::{contracttype, BytesN, U256};

/// Plaintext cutoff: access is granted when the decrypted score reaches it.
pub const ACCESS_THRESHOLD: u32 = 50;

/// Number of tracked metrics, and so of words in a cleartext payload.
pub const METRIC_COUNT: u32 = 4;

/// Width of one big-endian cleartext word.
pub const CLEARTEXT_WORD_LEN: u32 = 32;

/// The encrypted metrics held by the accumulator.
///
/// The discriminant is the metric's position in every snapshot, fingerprint
/// and cleartext payload.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Metric {
    DrivingStyle = 0,
    RoutePreference = 1,
    ComfortLevel = 2,
    AccessScore = 3,
}

/// Fixed snapshot order shared by requests, callbacks and decoding.
pub const SNAPSHOT_ORDER: [Metric; 4] = [
    Metric::DrivingStyle,
    Metric::RoutePreference,
    Metric::ComfortLevel,
    Metric::AccessScore,
];

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchState {
    /// Id of the current (or most recent) batch; 0 before the first open.
    pub id: u64,
    pub open: bool,
}

/// Pending or completed decryption round trip, keyed by oracle request id.
///
/// Never deleted: a processed context is the replay guard for its id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptionContext {
    pub batch_id: u64,
    pub state_hash: BytesN<32>,
    pub processed: bool,
    pub requested_at: u64,
}

/// Decoded cleartexts of a snapshot, in [`SNAPSHOT_ORDER`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetricTotals {
    pub driving_style: U256,
    pub route_preference: U256,
    pub comfort_level: U256,
    pub access_score: U256,
}

/// Outcome of an accepted callback.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessDecision {
    pub request_id: u64,
    pub batch_id: u64,
    pub totals: MetricTotals,
    pub access_granted: bool,
    pub decided_at: u64,
}
