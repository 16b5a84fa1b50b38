//! # Nonce Tracking
//!
//! The entire replay-protection mechanism, in two functions. Each
//! signature-gated operation must be signed over the vault's *current*
//! nonce; on success the nonce advances by exactly one, and every
//! signature bound to the old value is dead forever. There is no
//! used-signature set, no bloom filter, no expiry heuristic — strictly
//! increasing counters are cheaper and impossible to get subtly wrong.

use super::record::Vault;

/// The nonce the next signature must be bound to.
pub fn current(vault: &Vault) -> u64 {
    vault.nonce
}

/// Advances the nonce after a successful signature-gated mutation.
///
/// Must be called exactly once per such mutation, atomically with it —
/// the registry sequences this; nothing else may touch the counter.
pub fn advance(vault: &mut Vault) {
    vault.nonce += 1;
}
