//! # Property-Based Test Generators
//!
//! Composable `proptest` strategies for generating valid and adversarial inputs
//! across the confidential access operations.
//!
//! ## Design Decisions
//!
//! - Generators produce *semantic* values (metric values, durations, action
//!   sequences), not raw bytes, so tests exercise real code paths.
//! - Score values cluster around the threshold (49, 50, 51) where the access
//!   decision flips.
//! - Every value stays far below the demo key's modulus even when summed over
//!   the longest generated sequence, so totals never wrap.

extern crate std;

use proptest::prelude::*;
use soroban_sdk::{Bytes, Env};
use std::vec::Vec;

use super::THRESHOLD;

/// Upper bound for a single encrypted value.
pub const MAX_VALUE: u128 = 1_000_000;

// ── Scalar Generators ────────────────────────────────────────────────────────

/// Strategy for one metric value, biased toward edge cases.
pub fn value_strategy() -> impl Strategy<Value = u128> {
    prop_oneof![
        1 => Just(0u128),
        1 => Just(1u128),
        1 => Just(MAX_VALUE),
        7 => (0u128..=MAX_VALUE),
    ]
}

/// Strategy for a `(driving_style, route_preference, comfort_level)` triple.
pub fn contribution_strategy() -> impl Strategy<Value = [u128; 3]> {
    (value_strategy(), value_strategy(), value_strategy()).prop_map(|(d, r, c)| [d, r, c])
}

/// Strategy for access scores over the full `u32` domain, concentrated
/// around the threshold.
pub fn score_strategy() -> impl Strategy<Value = u128> {
    prop_oneof![
        2 => Just(THRESHOLD - 1),
        2 => Just(THRESHOLD),
        2 => Just(THRESHOLD + 1),
        2 => (0u128..THRESHOLD),
        2 => (THRESHOLD..=4 * THRESHOLD),
        1 => Just(u128::from(u32::MAX)),
        2 => (0u128..=u128::from(u32::MAX)),
    ]
}

/// Strategy for time durations in seconds.
pub fn duration_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        1 => Just(0u64),
        1 => Just(1u64),
        2 => (1u64..=60u64),
        3 => (1u64..=3_600u64),
        1 => Just(86_400u64),
    ]
}

/// Strategy for cooldown configurations.
pub fn cooldown_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        2 => Just(0u64),
        3 => (1u64..=60u64),
        2 => (60u64..=3_600u64),
    ]
}

// ── Action Generators ────────────────────────────────────────────────────────

/// Enumeration of all access contract actions for state exploration.
///
/// `user_index` selects from a pool of test users (modular indexing);
/// `request_index` selects from the requests issued so far.
#[derive(Debug, Clone)]
pub enum AccessAction {
    /// Submit a contribution.
    Submit { user_index: usize, values: [u128; 3] },
    /// Add an encrypted adjustment to the access score.
    UpdateScore { user_index: usize, value: u128 },
    /// Ask for an access check over the current totals.
    Request { user_index: usize },
    /// Gateway fulfils a request and the relayer delivers it.
    Deliver { request_index: usize },
    /// Advance time.
    AdvanceTime { delta: u64 },
    /// Owner: open a batch.
    OpenBatch,
    /// Owner: close the batch.
    CloseBatch,
    /// Owner: pause the contract.
    Pause,
    /// Owner: unpause the contract.
    Unpause,
}

/// Strategy for individual access actions.
///
/// Contributions, requests and deliveries dominate; owner operations are rare.
pub fn access_action_strategy(num_users: usize) -> impl Strategy<Value = AccessAction> {
    let user_idx = 0..num_users;

    prop_oneof![
        25 => (user_idx.clone(), contribution_strategy())
            .prop_map(|(u, v)| AccessAction::Submit { user_index: u, values: v }),
        8 => (user_idx.clone(), score_strategy())
            .prop_map(|(u, v)| AccessAction::UpdateScore { user_index: u, value: v }),
        15 => user_idx.clone().prop_map(|u| AccessAction::Request { user_index: u }),
        15 => (0usize..8).prop_map(|r| AccessAction::Deliver { request_index: r }),
        20 => duration_strategy().prop_map(|d| AccessAction::AdvanceTime { delta: d }),
        4 => Just(AccessAction::OpenBatch),
        3 => Just(AccessAction::CloseBatch),
        2 => Just(AccessAction::Pause),
        2 => Just(AccessAction::Unpause),
    ]
}

/// Strategy for a sequence of access actions, 1..=`max_len` long.
pub fn access_action_sequence(
    num_users: usize,
    max_len: usize,
) -> impl Strategy<Value = Vec<AccessAction>> {
    prop::collection::vec(access_action_strategy(num_users), 1..=max_len)
}

// ── Payload Mutations ────────────────────────────────────────────────────────

/// A tampering applied to an oracle response before it reaches the callback.
///
/// Every variant must be rejected by the contract.
#[derive(Debug, Clone)]
pub enum PayloadMutation {
    /// Raise the access-score word past the threshold.
    InflateScore,
    /// Exchange the comfort-level and access-score words.
    SwapWords,
    /// Drop the last byte of the cleartexts.
    Truncate,
    /// Append a zero byte to the cleartexts.
    Extend,
    /// Flip one bit of the proof.
    FlipProofBit(u8),
    /// Replace the proof with an empty one.
    EmptyProof,
}

/// Strategy for selecting a payload mutation.
pub fn payload_mutation_strategy() -> impl Strategy<Value = PayloadMutation> {
    prop_oneof![
        Just(PayloadMutation::InflateScore),
        Just(PayloadMutation::SwapWords),
        Just(PayloadMutation::Truncate),
        Just(PayloadMutation::Extend),
        (0u8..=255u8).prop_map(PayloadMutation::FlipProofBit),
        Just(PayloadMutation::EmptyProof),
    ]
}

/// Apply `mutation` to a `(cleartexts, proof)` pair.
///
/// Returns `None` when the mutation would leave the pair unchanged (e.g.
/// swapping two equal words), since that is not a tampering.
pub fn mutate_payload(
    env: &Env,
    cleartexts: &Bytes,
    proof: &Bytes,
    mutation: &PayloadMutation,
) -> Option<(Bytes, Bytes)> {
    let word = |i: u32| cleartexts.slice(i * 32..(i + 1) * 32);
    match mutation {
        PayloadMutation::InflateScore => {
            let mut out = cleartexts.slice(0..96);
            let mut score = [0u8; 32];
            score[0] = 0x01;
            out.extend_from_array(&score);
            (out != *cleartexts).then(|| (out, proof.clone()))
        }
        PayloadMutation::SwapWords => {
            if word(2) == word(3) {
                return None;
            }
            let mut out = cleartexts.slice(0..64);
            out.append(&word(3));
            out.append(&word(2));
            Some((out, proof.clone()))
        }
        PayloadMutation::Truncate => {
            let mut out = cleartexts.clone();
            out.pop_back();
            Some((out, proof.clone()))
        }
        PayloadMutation::Extend => {
            let mut out = cleartexts.clone();
            out.push_back(0);
            Some((out, proof.clone()))
        }
        PayloadMutation::FlipProofBit(bit) => {
            let index = u32::from(*bit / 8) % proof.len().max(1);
            let mut out = proof.clone();
            let byte = out.get(index)?;
            out.set(index, byte ^ (1 << (bit % 8)));
            Some((cleartexts.clone(), out))
        }
        PayloadMutation::EmptyProof => Some((cleartexts.clone(), Bytes::new(env))),
    }
}

// ── Historical Pattern Generators ────────────────────────────────────────────

/// Common interaction patterns, expanded into concrete action sequences.
#[derive(Debug, Clone)]
pub enum TransactionPattern {
    /// Open, two contributions, request, deliver.
    SingleRound,
    /// A contribution lands between request and delivery.
    StaleDelivery,
    /// The same request is delivered repeatedly.
    ReplayStorm,
    /// Contributions spread over several batches before one check.
    MultiBatch,
    /// Pause in the middle of a round, then resume.
    PauseMidRound,
}

/// Generate a concrete action sequence from a transaction pattern.
pub fn pattern_to_actions(pattern: &TransactionPattern, num_users: usize) -> Vec<AccessAction> {
    use AccessAction::*;
    match pattern {
        TransactionPattern::SingleRound => std::vec![
            OpenBatch,
            Submit { user_index: 0, values: [10, 20, 30] },
            Submit { user_index: 1 % num_users, values: [5, 5, 70] },
            Request { user_index: 0 },
            Deliver { request_index: 0 },
        ],
        TransactionPattern::StaleDelivery => std::vec![
            OpenBatch,
            Submit { user_index: 0, values: [1, 2, 3] },
            Request { user_index: 0 },
            AdvanceTime { delta: 3_600 },
            UpdateScore { user_index: 0, value: 60 },
            Deliver { request_index: 0 },
            Request { user_index: 0 },
            Deliver { request_index: 1 },
        ],
        TransactionPattern::ReplayStorm => {
            let mut actions = std::vec![
                OpenBatch,
                Submit { user_index: 0, values: [7, 7, 77] },
                Request { user_index: 0 },
            ];
            for _ in 0..4 {
                actions.push(Deliver { request_index: 0 });
            }
            actions
        }
        TransactionPattern::MultiBatch => {
            let mut actions = Vec::new();
            for i in 0..num_users.min(3) {
                actions.push(OpenBatch);
                actions.push(Submit { user_index: i, values: [i as u128 + 1, 2, 15] });
                actions.push(CloseBatch);
            }
            actions.push(OpenBatch);
            actions.push(Request { user_index: 0 });
            actions.push(Deliver { request_index: 0 });
            actions
        }
        TransactionPattern::PauseMidRound => std::vec![
            OpenBatch,
            Submit { user_index: 0, values: [3, 3, 50] },
            Request { user_index: 0 },
            Pause,
            Deliver { request_index: 0 },
            Submit { user_index: 1 % num_users, values: [1, 1, 1] },
            Unpause,
            Deliver { request_index: 0 },
        ],
    }
}

/// Strategy that selects a transaction pattern.
pub fn transaction_pattern_strategy() -> impl Strategy<Value = TransactionPattern> {
    prop_oneof![
        Just(TransactionPattern::SingleRound),
        Just(TransactionPattern::StaleDelivery),
        Just(TransactionPattern::ReplayStorm),
        Just(TransactionPattern::MultiBatch),
        Just(TransactionPattern::PauseMidRound),
    ]
}
