//! # Rolling Daily-Withdrawal Accounting
//!
//! A per-vault cap on cumulative withdrawals over a rolling 24-hour
//! window. The window is lazy: nothing ticks in the background. Each
//! withdrawal attempt first checks whether a full window has elapsed
//! since `window_start` and, if so, resets the accumulator and anchors a
//! new window at `now`. The invariant that matters:
//!
//! > `daily_withdrawn <= daily_withdrawal_limit` whenever
//! > `now - window_start < 86400`.
//!
//! A cap violation is reported as error **102** — the deployed contract
//! reuses its insufficient-balance code for this, and callers dispatch on
//! the number, so the overload is preserved (see [`VaultError`]).

use super::record::Vault;
use crate::config::DAILY_WINDOW_SECS;
use crate::error::VaultError;

/// Rolls the accounting window forward if a full day has elapsed.
///
/// Part of [`commit`]; exposed separately so callers that only need to
/// refresh the window (without recording a withdrawal) can do so.
pub fn roll_window(vault: &mut Vault, now: u64) {
    if now.saturating_sub(vault.window_start) >= DAILY_WINDOW_SECS {
        vault.daily_withdrawn = 0;
        vault.window_start = now;
    }
}

/// Checks the daily cap for a withdrawal of `amount` against a rolled
/// view of the window. Mutates nothing — a rejected operation must
/// leave no trace, so the actual roll happens in [`commit`] once every
/// check of the operation has passed.
///
/// # Errors
///
/// [`VaultError::InsufficientBalance`] (102) if the amount would push
/// the window total past the limit.
pub fn check(vault: &Vault, amount: u128, now: u64) -> Result<(), VaultError> {
    let headroom = available_today(vault, now);
    if amount > headroom {
        return Err(VaultError::InsufficientBalance {
            requested: amount,
            available: headroom,
        });
    }
    Ok(())
}

/// Commits a successful withdrawal: rolls the window if due, then adds
/// `amount` to the accumulator.
///
/// Must follow a passing [`check`] with the same `now` within the same
/// operation; the substrate's serialization guarantees no interleaving.
pub fn commit(vault: &mut Vault, amount: u128, now: u64) {
    roll_window(vault, now);
    vault.daily_withdrawn += amount;
}

/// Replaces the daily limit, effective immediately.
///
/// Deliberately does NOT reset `daily_withdrawn` or the window anchor:
/// lowering the limit below what was already withdrawn today blocks
/// further withdrawals until the window rolls, and raising it frees
/// headroom at once.
pub fn update_limit(vault: &mut Vault, new_limit: u128) {
    vault.daily_withdrawal_limit = new_limit;
}

/// How much can still be withdrawn today.
///
/// Read-only: computes against a rolled view of the window without
/// mutating the vault, so queries never change state.
pub fn available_today(vault: &Vault, now: u64) -> u128 {
    if now.saturating_sub(vault.window_start) >= DAILY_WINDOW_SECS {
        vault.daily_withdrawal_limit
    } else {
        vault
            .daily_withdrawal_limit
            .saturating_sub(vault.daily_withdrawn)
    }
}
