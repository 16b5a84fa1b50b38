//! # Emergency Recovery
//!
//! The escape hatch for a lost passkey. The owner designates a recovery
//! contact and a delay (at least seven days); the contact can then open a
//! recovery request and, once the delay has fully elapsed, sweep the
//! vault's balance to themselves. The delay is the defense: a hostile or
//! compromised contact announces their intent a week in advance, and the
//! real owner cancels.
//!
//! The flow, in order:
//!
//! 1. `set_contact` — owner configures contact + delay (>= 604800 s).
//! 2. `open_request` — contact starts the clock; timestamp recorded.
//! 3. `clear_request` — owner cancels a pending request at any time.
//! 4. `execute` — contact collects the full balance after the delay.
//!
//! Execution pays out the entire balance and nothing else: the owner and
//! passkey are untouched. Recovering *control* (rather than funds) is
//! done by the owner rotating the passkey, which needs no special flow.
//!
//! Caller authorization (owner-only vs. contact-only) is enforced by the
//! registry; this module is pure state logic, like its siblings.

use super::record::Vault;
use crate::config::MIN_RECOVERY_DELAY_SECS;
use crate::error::VaultError;
use crate::identity::Principal;

/// Configures the recovery contact and delay.
///
/// Any pending request is cleared: changing the recovery policy
/// invalidates clocks started under the old one.
///
/// # Errors
///
/// [`VaultError::InvalidTimeLock`] (105) if `delay_secs` is below
/// [`MIN_RECOVERY_DELAY_SECS`].
pub fn set_contact(
    vault: &mut Vault,
    contact: Principal,
    delay_secs: u64,
) -> Result<(), VaultError> {
    if delay_secs < MIN_RECOVERY_DELAY_SECS {
        return Err(VaultError::InvalidTimeLock {
            given: delay_secs,
            minimum: MIN_RECOVERY_DELAY_SECS,
        });
    }
    vault.recovery_contact = Some(contact);
    vault.recovery_delay_secs = delay_secs;
    vault.recovery_requested_at = None;
    Ok(())
}

/// Whether `caller` is the configured recovery contact.
pub fn is_contact(vault: &Vault, caller: &Principal) -> bool {
    vault.recovery_contact.as_ref() == Some(caller)
}

/// Opens (or restarts) a recovery request at `now`.
///
/// Re-requesting restarts the delay from scratch — that only ever delays
/// the contact further, so it needs no special handling.
pub fn open_request(vault: &mut Vault, now: u64) {
    vault.recovery_requested_at = Some(now);
}

/// Cancels a pending recovery request, if any.
pub fn clear_request(vault: &mut Vault) {
    vault.recovery_requested_at = None;
}

/// Executes a matured recovery: sweeps the entire balance, clears the
/// pending request, and returns the amount paid out.
///
/// # Errors
///
/// - [`VaultError::NotAuthorized`] (100) if no request is pending.
/// - [`VaultError::TimeLockActive`] (104) if the delay has not elapsed;
///   the error carries the timestamp at which execution becomes valid.
pub fn execute(vault: &mut Vault, now: u64) -> Result<u128, VaultError> {
    let requested_at = vault
        .recovery_requested_at
        .ok_or(VaultError::NotAuthorized)?;
    let ready_at = requested_at.saturating_add(vault.recovery_delay_secs);
    if now < ready_at {
        return Err(VaultError::TimeLockActive { until: ready_at });
    }

    let amount = vault.balance;
    vault.balance = 0;
    vault.recovery_requested_at = None;
    Ok(amount)
}
