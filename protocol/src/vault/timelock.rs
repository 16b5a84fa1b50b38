//! # Time-Lock Gating
//!
//! An absolute unlock timestamp per vault. While `now` is before it,
//! withdrawals are refused; deposits and queries are unaffected. The
//! lock is a speed bump against a stolen passkey — the thief can sign,
//! but can't move funds until the lock expires, which is time for the
//! owner to rotate the key or start recovery.
//!
//! Two entry points with different rules:
//!
//! - At **creation**, any duration is accepted, including sub-hour ones;
//!   zero means "no lock". The owner is setting up their own vault and
//!   gets to choose.
//! - **After creation**, `set` enforces a one-hour minimum. A 30-second
//!   lock set in a panic provides nothing but false comfort.

use super::record::Vault;
use crate::config::MIN_TIME_LOCK_SECS;
use crate::error::VaultError;

/// Applies the initial lock chosen at vault creation. Zero duration
/// leaves the vault unlocked; no minimum is enforced here.
pub fn apply_initial_lock(vault: &mut Vault, duration_secs: u64, now: u64) {
    if duration_secs > 0 {
        // Saturate: an absurd duration pins the lock at the end of time
        // rather than wrapping around to the past.
        vault.time_lock_until = Some(now.saturating_add(duration_secs));
    }
}

/// Sets a new time-lock expiring `duration_secs` from `now`.
///
/// Returns the absolute unlock timestamp.
///
/// # Errors
///
/// [`VaultError::InvalidTimeLock`] (105) if the duration is below
/// [`MIN_TIME_LOCK_SECS`].
pub fn set(vault: &mut Vault, duration_secs: u64, now: u64) -> Result<u64, VaultError> {
    if duration_secs < MIN_TIME_LOCK_SECS {
        return Err(VaultError::InvalidTimeLock {
            given: duration_secs,
            minimum: MIN_TIME_LOCK_SECS,
        });
    }
    let until = now.saturating_add(duration_secs);
    vault.time_lock_until = Some(until);
    Ok(until)
}

/// Whether the vault is currently locked.
pub fn is_locked(vault: &Vault, now: u64) -> bool {
    matches!(vault.time_lock_until, Some(until) if now < until)
}

/// Seconds until the lock expires; zero when unlocked.
pub fn remaining(vault: &Vault, now: u64) -> u64 {
    match vault.time_lock_until {
        Some(until) if now < until => until - now,
        _ => 0,
    }
}

/// Gate used by withdrawal paths.
///
/// # Errors
///
/// [`VaultError::TimeLockActive`] (104) while locked.
pub fn ensure_unlocked(vault: &Vault, now: u64) -> Result<(), VaultError> {
    match vault.time_lock_until {
        Some(until) if now < until => Err(VaultError::TimeLockActive { until }),
        _ => Ok(()),
    }
}
