//! # Canonical Signed Messages
//!
//! The exact byte layouts a passkey signs. These are consensus-critical:
//! a signer and a verifier that disagree by a single byte produce
//! signatures that never verify, and a layout that is *almost* canonical
//! invites cross-operation replay.
//!
//! Every numeric field — vault id, amount, nonce — is encoded as a
//! 16-byte big-endian value, zero-padded even though the logical values
//! are far smaller. Wasteful? Slightly. But it means one fixed layout
//! regardless of magnitude, no varint ambiguity, and byte-for-byte
//! compatibility with every signature ever produced against the
//! deployed contract.
//!
//! Two message kinds exist:
//!
//! - **Withdrawal**: `vault_id(16B) ‖ amount(16B) ‖ nonce(16B)` — 48 bytes.
//! - **Key rotation**: `vault_id(16B) ‖ new_key(33B) ‖ nonce(16B)` — 65 bytes.
//!
//! Both are SHA-256 hashed before signing. Binding the nonce makes each
//! signature single-use; binding the amount (or the replacement key)
//! makes it authorize exactly one operation. There is no such thing as a
//! range or blanket authorization in this protocol.

use super::hash::sha256;
use super::keys::PasskeyPublicKey;
use crate::config::{
    MESSAGE_HASH_LENGTH, PREIMAGE_FIELD_LENGTH, ROTATION_PREIMAGE_LENGTH,
    WITHDRAWAL_PREIMAGE_LENGTH,
};

/// Encodes a numeric field as 16 bytes, big-endian, zero-padded.
#[inline]
fn field(value: u128) -> [u8; PREIMAGE_FIELD_LENGTH] {
    value.to_be_bytes()
}

/// Builds the 48-byte withdrawal preimage.
///
/// `amount` and `nonce` must be the operation's declared amount and the
/// vault's current nonce — the verifier recomputes this preimage from
/// its own view of the vault, so a signature over anything else simply
/// fails.
pub fn withdrawal_preimage(
    vault_id: u64,
    amount: u128,
    nonce: u64,
) -> [u8; WITHDRAWAL_PREIMAGE_LENGTH] {
    let mut out = [0u8; WITHDRAWAL_PREIMAGE_LENGTH];
    out[0..16].copy_from_slice(&field(vault_id as u128));
    out[16..32].copy_from_slice(&field(amount));
    out[32..48].copy_from_slice(&field(nonce as u128));
    out
}

/// SHA-256 of the withdrawal preimage — the digest a passkey signs to
/// authorize one withdrawal of one exact amount at one exact nonce.
pub fn withdrawal_message_hash(
    vault_id: u64,
    amount: u128,
    nonce: u64,
) -> [u8; MESSAGE_HASH_LENGTH] {
    sha256(&withdrawal_preimage(vault_id, amount, nonce))
}

/// Builds the 65-byte key-rotation preimage.
///
/// The replacement key sits between the vault id and the nonce, so a
/// rotation signature binds to exactly one successor key.
pub fn rotation_preimage(
    vault_id: u64,
    new_key: &PasskeyPublicKey,
    nonce: u64,
) -> [u8; ROTATION_PREIMAGE_LENGTH] {
    let mut out = [0u8; ROTATION_PREIMAGE_LENGTH];
    out[0..16].copy_from_slice(&field(vault_id as u128));
    out[16..49].copy_from_slice(new_key.as_bytes());
    out[49..65].copy_from_slice(&field(nonce as u128));
    out
}

/// SHA-256 of the rotation preimage, verified against the *current*
/// (outgoing) key — the holder of the old passkey approves its successor.
pub fn rotation_message_hash(
    vault_id: u64,
    new_key: &PasskeyPublicKey,
    nonce: u64,
) -> [u8; MESSAGE_HASH_LENGTH] {
    sha256(&rotation_preimage(vault_id, new_key, nonce))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn withdrawal_preimage_layout() {
        // vault_id=1, amount=100_000_000 (0x05F5E100), nonce=0 — the
        // canonical fixture the offline tooling has always produced.
        let preimage = withdrawal_preimage(1, 100_000_000, 0);
        let mut expected = [0u8; 48];
        expected[15] = 0x01;
        expected[28..32].copy_from_slice(&[0x05, 0xF5, 0xE1, 0x00]);
        assert_eq!(preimage, expected);
    }

    #[test]
    fn withdrawal_fields_are_big_endian() {
        let preimage = withdrawal_preimage(0x0102, 0x0304, 0x0506);
        assert_eq!(&preimage[14..16], &[0x01, 0x02]);
        assert_eq!(&preimage[30..32], &[0x03, 0x04]);
        assert_eq!(&preimage[46..48], &[0x05, 0x06]);
    }

    #[test]
    fn rotation_preimage_layout() {
        let mut key_bytes = [0xBBu8; 33];
        key_bytes[0] = 0x03;
        let key = PasskeyPublicKey::from_bytes(&key_bytes).unwrap();

        let preimage = rotation_preimage(7, &key, 2);
        assert_eq!(preimage[15], 7);
        assert_eq!(&preimage[16..49], key.as_bytes());
        assert_eq!(preimage[64], 2);
    }

    #[test]
    fn distinct_inputs_hash_distinctly() {
        let base = withdrawal_message_hash(1, 100, 0);
        assert_ne!(base, withdrawal_message_hash(2, 100, 0));
        assert_ne!(base, withdrawal_message_hash(1, 101, 0));
        assert_ne!(base, withdrawal_message_hash(1, 100, 1));
    }

    #[test]
    fn withdrawal_and_rotation_domains_cannot_collide() {
        // 48-byte vs 65-byte preimages: no byte string is both, so the
        // two message kinds can never produce the same digest input.
        assert_ne!(WITHDRAWAL_PREIMAGE_LENGTH, ROTATION_PREIMAGE_LENGTH);
    }

    #[test]
    fn max_values_fit_the_fields() {
        let preimage = withdrawal_preimage(u64::MAX, u128::MAX, u64::MAX);
        assert_eq!(&preimage[16..32], &[0xFF; 16]);
        assert_eq!(&preimage[0..8], &[0x00; 8]);
        assert_eq!(&preimage[8..16], &[0xFF; 8]);
    }
}
