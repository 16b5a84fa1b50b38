//! # The Vault Record
//!
//! One record per owning identity: the passkey that authorizes spending,
//! the balance, the replay-protection nonce, and the security policy
//! state (time-lock, daily limit, recovery). Every other file in this
//! module is pure logic over these fields — the record itself has no
//! behavior beyond construction.

use serde::{Deserialize, Serialize};

use crate::crypto::PasskeyPublicKey;
use crate::identity::Principal;

/// A single passkey-secured vault.
///
/// Owned exclusively by the registry's vault table. Amounts are `u128`
/// micro-STX; timestamps are Unix seconds as supplied by the substrate
/// clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vault {
    /// Unique id, assigned sequentially from 1 at creation. Immutable.
    pub id: u64,

    /// The owning identity. At most one vault per owner.
    pub owner: Principal,

    /// The compressed P-256 public key that authorizes withdrawals and
    /// rotations. Replaced only by a rotation signed with its predecessor.
    pub passkey: PasskeyPublicKey,

    /// Current balance in µSTX. Increased only by deposits; decreased
    /// only by successful withdrawals and recovery payouts.
    pub balance: u128,

    /// Replay-protection counter. Starts at 0, +1 per successful
    /// signature-gated operation, never reused or decremented.
    pub nonce: u64,

    /// Absolute unlock timestamp. `None` or a past value means unlocked.
    pub time_lock_until: Option<u64>,

    /// Rolling 24-hour withdrawal cap, owner-settable.
    pub daily_withdrawal_limit: u128,

    /// Amount withdrawn inside the current window.
    pub daily_withdrawn: u128,

    /// Start of the current 24-hour accounting window.
    pub window_start: u64,

    /// Identity allowed to run the emergency-recovery flow, if configured.
    pub recovery_contact: Option<Principal>,

    /// Mandatory wait between a recovery request and its execution.
    /// Zero until a contact is configured; >= 604800 afterwards.
    pub recovery_delay_secs: u64,

    /// Timestamp of a pending recovery request, if one is open.
    pub recovery_requested_at: Option<u64>,
}

impl Vault {
    /// Creates a fresh vault: zero balance, zero nonce, no lock, no
    /// recovery setup, accounting window anchored at `now`.
    ///
    /// The initial time-lock (if any) is applied by the caller through
    /// the time-lock logic — creation itself knows nothing about lock
    /// policy.
    pub fn new(
        id: u64,
        owner: Principal,
        passkey: PasskeyPublicKey,
        daily_withdrawal_limit: u128,
        now: u64,
    ) -> Self {
        Self {
            id,
            owner,
            passkey,
            balance: 0,
            nonce: 0,
            time_lock_until: None,
            daily_withdrawal_limit,
            daily_withdrawn: 0,
            window_start: now,
            recovery_contact: None,
            recovery_delay_secs: 0,
            recovery_requested_at: None,
        }
    }
}
