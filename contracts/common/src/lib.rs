//! Shared guards and error types for the confidential-access contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: standardised error codes for all contracts.
//! - [`ownership`]: single-owner storage and the `require_owner` guard.
//! - [`pausable`]: global pause flag and its guard.
//! - [`providers`]: the allow-listed provider set.
//! - [`cooldown`]: per-sender timestamps used for rate limiting.
//!
//! None of the helpers emit authorisation side effects beyond what their
//! docs state, so each contract decides where in its entry points they run.
//!
//! Contract-specific errors can extend the range starting at code **100** and
//! above, ensuring no collisions with the common set.

#![no_std]
#![allow(clippy::arithmetic_side_effects)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod cooldown;
pub mod ownership;
pub mod pausable;
pub mod providers;

pub use cooldown::*;
pub use ownership::*;
pub use pausable::*;
pub use providers::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by every contract in the suite.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authentication & authorisation |
/// | 40 – 49 | Contract state / rate limiting |
/// | 100+    | Reserved for contract-specific |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Caller is not the stored owner.
    NotOwner = 10,
    /// Caller is not in the provider set.
    NotProvider = 11,
    // ── Contract state (40–49) ───────────────────────────────
    /// The contract is currently paused and cannot process requests.
    Paused = 40,
    /// The sender acted again before its cooldown window elapsed.
    CooldownActive = 41,
}
