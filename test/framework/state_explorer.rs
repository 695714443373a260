//! # State Space Explorer
//!
//! Systematically explores reachable contract states by executing action
//! sequences and verifying invariants after every transition.
//!
//! ## Design
//!
//! Each explored state is an `AccessSnapshot`; edges are `AccessAction`s.
//! State invariants run on every snapshot and transition invariants on
//! every consecutive pair.
//!
//! ## Complexity
//!
//! - Time: O(S × (I + T·R)) where S = executed steps, I = state invariants,
//!   T = transition invariants, R = issued requests.
//! - Space: O(S) snapshots when recording is enabled, O(1) otherwise.

extern crate std;

use soroban_sdk::Address;
use std::string::String;
use std::vec::Vec;

use super::generators::AccessAction;
use super::invariants::{InvariantSet, TransitionInvariantSet};
use super::{AccessSnapshot, AccessTestHarness, ActionOutcome, TestRunSummary};

use confidential_access::ContractError;

// ── Explorer Configuration ───────────────────────────────────────────────────

/// Configuration for state-space exploration.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Maximum number of actions to execute in a single exploration run.
    pub max_steps: usize,
    /// Whether to halt on the first invariant violation (fail-fast).
    pub fail_fast: bool,
    /// Whether to record snapshots for later analysis.
    pub record_snapshots: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            fail_fast: true,
            record_snapshots: false,
        }
    }
}

// ── Exploration Result ───────────────────────────────────────────────────────

/// Full result of an exploration run.
#[derive(Debug)]
pub struct ExplorationResult {
    pub summary: TestRunSummary,
    pub snapshots: Vec<AccessSnapshot>,
    pub action_log: Vec<(AccessAction, ActionOutcome)>,
}

impl ExplorationResult {
    pub fn passed(&self) -> bool {
        self.summary.passed()
    }

    /// Contract error codes observed, in order of occurrence.
    pub fn rejections(&self) -> Vec<u32> {
        self.action_log
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                ActionOutcome::ExpectedError(code) => Some(*code),
                _ => None,
            })
            .collect()
    }
}

// ── State Space Explorer ─────────────────────────────────────────────────────

/// Executes action sequences against the access contract, checking
/// invariants after every transition.
pub struct StateExplorer<'h, 'a> {
    harness: &'h AccessTestHarness<'a>,
    invariants: InvariantSet,
    transitions: TransitionInvariantSet,
    config: ExplorerConfig,
    users: Vec<Address>,
}

impl<'h, 'a> StateExplorer<'h, 'a> {
    /// Create an explorer for the given harness and user pool.
    pub fn new(
        harness: &'h AccessTestHarness<'a>,
        invariants: InvariantSet,
        transitions: TransitionInvariantSet,
        config: ExplorerConfig,
        users: Vec<Address>,
    ) -> Self {
        Self {
            harness,
            invariants,
            transitions,
            config,
            users,
        }
    }

    /// Create an explorer with default configuration and built-in invariants.
    pub fn with_defaults(harness: &'h AccessTestHarness<'a>, users: Vec<Address>) -> Self {
        Self::new(
            harness,
            InvariantSet::access_defaults(),
            TransitionInvariantSet::access_defaults(),
            ExplorerConfig::default(),
            users,
        )
    }

    /// Execute a sequence of actions, checking invariants after each.
    pub fn explore(&mut self, actions: &[AccessAction]) -> ExplorationResult {
        let mut summary = TestRunSummary::new();
        let mut snapshots = Vec::new();
        let mut action_log = Vec::new();

        let mut previous = self.harness.snapshot();
        if self.config.record_snapshots {
            snapshots.push(previous.clone());
        }

        let steps = actions.len().min(self.config.max_steps);

        for action in actions.iter().take(steps) {
            let outcome = self.execute_action(action);
            summary.entry_points_hit.insert(action_entry_point(action));
            summary.actions_executed += 1;
            summary.transitions_observed += 1;
            action_log.push((action.clone(), outcome));

            let snapshot = self.harness.snapshot();
            let mut violations = self.invariants.check_all(&snapshot);
            violations.extend(self.transitions.check_all(&previous, &snapshot));
            summary.invariant_checks += 1;

            let failed = !violations.is_empty();
            for (name, msg) in violations {
                summary.invariant_violations.push(std::format!(
                    "After action #{} ({:?}): [{}] {}",
                    summary.actions_executed,
                    action,
                    name,
                    msg
                ));
            }

            if self.config.record_snapshots {
                snapshots.push(snapshot.clone());
            }
            if failed && self.config.fail_fast {
                break;
            }
            previous = snapshot;
        }

        ExplorationResult {
            summary,
            snapshots,
            action_log,
        }
    }

    fn user(&self, index: usize) -> &Address {
        &self.users[index % self.users.len()]
    }

    /// Execute a single action against the harness, returning the outcome.
    fn execute_action(&mut self, action: &AccessAction) -> ActionOutcome {
        let h = self.harness;
        match action {
            AccessAction::Submit { user_index, values } => {
                outcome(h.try_submit(self.user(*user_index), *values))
            }
            AccessAction::UpdateScore { user_index, value } => {
                outcome(h.try_update_score(self.user(*user_index), *value))
            }
            AccessAction::Request { user_index } => {
                outcome(h.try_request_access(self.user(*user_index)))
            }
            AccessAction::Deliver { request_index } => {
                let issued = h.issued_requests();
                if issued.is_empty() {
                    return ActionOutcome::Ok;
                }
                let id = issued[request_index % issued.len()];
                outcome(h.complete(id))
            }
            AccessAction::AdvanceTime { delta } => {
                h.env.advance_time(*delta);
                ActionOutcome::Ok
            }
            AccessAction::OpenBatch => outcome(crate::settle(h.client.try_open_batch(&h.owner))),
            AccessAction::CloseBatch => {
                outcome(crate::settle(h.client.try_close_batch(&h.owner)))
            }
            AccessAction::Pause => outcome(crate::settle(h.client.try_pause(&h.owner))),
            AccessAction::Unpause => outcome(crate::settle(h.client.try_unpause(&h.owner))),
        }
    }
}

fn outcome<T>(res: Result<T, ContractError>) -> ActionOutcome {
    match res {
        Ok(_) => ActionOutcome::Ok,
        Err(e) => ActionOutcome::ExpectedError(e as u32),
    }
}

/// Map an access action to its entry point name for coverage tracking.
fn action_entry_point(action: &AccessAction) -> String {
    match action {
        AccessAction::Submit { .. } => "submit_contribution".into(),
        AccessAction::UpdateScore { .. } => "update_access_score".into(),
        AccessAction::Request { .. } => "request_access_check".into(),
        AccessAction::Deliver { .. } => "on_decryption".into(),
        AccessAction::AdvanceTime { .. } => "advance_time".into(),
        AccessAction::OpenBatch => "open_batch".into(),
        AccessAction::CloseBatch => "close_batch".into(),
        AccessAction::Pause => "pause".into(),
        AccessAction::Unpause => "unpause".into(),
    }
}

/// The access contract's state-changing entry points, for coverage calculation.
pub const ACCESS_ENTRY_POINTS: &[&str] = &[
    "submit_contribution",
    "update_access_score",
    "request_access_check",
    "on_decryption",
    "open_batch",
    "close_batch",
    "pause",
    "unpause",
];
