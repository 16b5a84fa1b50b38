//! # Error Taxonomy
//!
//! Every way a vault operation can fail, with the numeric codes the
//! deployed contract ABI exposes. Existing callers and the event relay
//! dispatch on these numbers, so the mapping is frozen: changing a code
//! is a breaking change no matter how much nicer the new arrangement
//! would look.
//!
//! Each failure rejects exactly one call. Nothing here is fatal to the
//! process, nothing is retried internally, and no failed call leaves
//! partial state behind.

use thiserror::Error;

/// Errors raised by vault operations.
///
/// The numeric codes (see [`VaultError::code`]) are part of the ABI.
/// The variant payloads exist for diagnostics only — they are not part
/// of the compatibility surface and may grow fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VaultError {
    /// Code 100. The caller is not allowed to perform this operation:
    /// owner mismatch, non-admin shutdown toggle, wrong recovery caller,
    /// or any mutating call while the protocol is shut down.
    #[error("not authorized")]
    NotAuthorized,

    /// Code 101. No vault exists with the given id.
    #[error("vault {0} not found")]
    VaultNotFound(u64),

    /// Code 102. The withdrawal exceeds what the vault can pay out right
    /// now — either the rolling daily cap or the actual balance.
    ///
    /// Historical note: the deployed contract reuses its
    /// `ERR_INSUFFICIENT_BALANCE` code for daily-limit violations, so
    /// both conditions map to 102. Callers already depend on that
    /// overload; keep it.
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Amount the caller tried to withdraw.
        requested: u128,
        /// Amount still withdrawable (daily headroom or balance,
        /// whichever check failed).
        available: u128,
    },

    /// Code 103. Signature verification failed: bad signature, wrong
    /// key, a replayed nonce, or a message bound to a different amount.
    /// Deliberately one code for all of these — a detailed failure
    /// oracle helps nobody but an attacker.
    #[error("invalid signature")]
    InvalidSignature,

    /// Code 104. The vault's time-lock has not expired, or a recovery
    /// delay has not yet elapsed.
    #[error("time lock active until {until}")]
    TimeLockActive {
        /// Unix timestamp at which the lock expires.
        until: u64,
    },

    /// Code 105. A time-lock or recovery-delay duration is below the
    /// enforced minimum.
    #[error("invalid duration: {given}s is below the minimum of {minimum}s")]
    InvalidTimeLock {
        /// The duration the caller asked for.
        given: u64,
        /// The minimum this operation enforces.
        minimum: u64,
    },

    /// Code 106. The caller already owns a vault; one vault per owner.
    #[error("owner already has vault {existing}")]
    VaultExists {
        /// Id of the caller's existing vault.
        existing: u64,
    },

    /// Code 107. A zero-amount value movement.
    #[error("amount must be non-zero")]
    ZeroAmount,

    /// Code 108. The public key is not a plausible compressed P-256
    /// point: wrong length or a prefix byte other than `0x02`/`0x03`.
    #[error("invalid public key: {reason}")]
    InvalidPublicKey {
        /// What was wrong with the key bytes.
        reason: &'static str,
    },
}

impl VaultError {
    /// The stable numeric error code exposed through the ABI.
    pub fn code(&self) -> u32 {
        match self {
            VaultError::NotAuthorized => 100,
            VaultError::VaultNotFound(_) => 101,
            VaultError::InsufficientBalance { .. } => 102,
            VaultError::InvalidSignature => 103,
            VaultError::TimeLockActive { .. } => 104,
            VaultError::InvalidTimeLock { .. } => 105,
            VaultError::VaultExists { .. } => 106,
            VaultError::ZeroAmount => 107,
            VaultError::InvalidPublicKey { .. } => 108,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_frozen() {
        // The whole point of this table. If this test fails, you broke
        // every deployed caller.
        assert_eq!(VaultError::NotAuthorized.code(), 100);
        assert_eq!(VaultError::VaultNotFound(9).code(), 101);
        assert_eq!(
            VaultError::InsufficientBalance {
                requested: 2,
                available: 1
            }
            .code(),
            102
        );
        assert_eq!(VaultError::InvalidSignature.code(), 103);
        assert_eq!(VaultError::TimeLockActive { until: 0 }.code(), 104);
        assert_eq!(
            VaultError::InvalidTimeLock {
                given: 0,
                minimum: 3600
            }
            .code(),
            105
        );
        assert_eq!(VaultError::VaultExists { existing: 1 }.code(), 106);
        assert_eq!(VaultError::ZeroAmount.code(), 107);
        assert_eq!(
            VaultError::InvalidPublicKey { reason: "x" }.code(),
            108
        );
    }

    #[test]
    fn messages_do_not_leak_signature_details() {
        let msg = VaultError::InvalidSignature.to_string();
        assert_eq!(msg, "invalid signature");
    }
}
