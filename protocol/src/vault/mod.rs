//! # Vault Module — Record & Policy Logic
//!
//! The vault record and the pure policy logic that operates on it. If
//! the registry is the traffic cop, this module is the rulebook: each
//! file answers one question about a single vault and mutates nothing
//! beyond the record it is handed.
//!
//! ```text
//! record.rs    — the Vault struct: passkey, balance, nonce, policy state
//! nonce.rs     — replay protection: strictly increasing counters
//! timelock.rs  — absolute unlock timestamps gating withdrawals
//! limits.rs    — rolling 24-hour withdrawal accounting
//! recovery.rs  — guardian contact, delay, and balance sweep
//! ```
//!
//! ## Design Principles
//!
//! 1. **No hidden state.** Every function takes the vault (and the
//!    current time) explicitly. There are no side tables — the record
//!    *is* the state, and the registry owns all the records.
//!
//! 2. **Checks are separate from mutations.** `limits::check` decides,
//!    `limits::commit` records; `timelock::ensure_unlocked` decides, the
//!    registry moves the money. The registry runs every check before the
//!    first mutation so a failed operation leaves no trace.
//!
//! 3. **Caller authorization lives in the registry.** These functions
//!    trust that "owner-only" and "contact-only" were already enforced;
//!    keeping identity out of the policy logic keeps it trivially
//!    testable.

pub mod limits;
pub mod nonce;
pub mod record;
pub mod recovery;
pub mod timelock;

pub use record::Vault;
