//! # Signature Verification
//!
//! ECDSA P-256 verification of raw 64-byte signatures — the authorization
//! backbone of the vault. Every withdrawal and every key rotation is
//! gated by one call into this module.
//!
//! ## Wire format
//!
//! Signatures arrive as `r(32B) ‖ s(32B)`, both big-endian and
//! zero-padded. DER/ASN.1 wrapping is not accepted: WebAuthn clients and
//! the offline tooling strip DER before submission, and accepting both
//! formats would give every signature two encodings.
//!
//! ## Failure semantics
//!
//! [`verify`] returns a plain `bool`. We intentionally do not distinguish
//! "off-curve key" from "malformed signature" from "wrong message" —
//! callers map `false` to one error code, and a detailed failure oracle
//! helps nobody but an attacker probing the boundary.

use p256::ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::{Signature, VerifyingKey};

use super::keys::PasskeyPublicKey;
use crate::config::{MESSAGE_HASH_LENGTH, SIGNATURE_LENGTH};

/// Verifies a raw P-256 signature over a prehashed message digest.
///
/// Returns `true` iff:
/// - `public_key` decodes to a valid point on P-256 (format validation
///   happened at registration; *point* validation happens here),
/// - `signature` parses as two in-range, non-zero scalars, and
/// - the ECDSA verification equation holds for `message_hash`.
///
/// The digest is consumed as-is (`verify_prehash`) — it must already be
/// the SHA-256 of a canonical preimage from [`crate::crypto::message`].
pub fn verify(
    public_key: &PasskeyPublicKey,
    message_hash: &[u8; MESSAGE_HASH_LENGTH],
    signature: &[u8; SIGNATURE_LENGTH],
) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(public_key.as_bytes()) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(signature) else {
        return false;
    };
    verifying_key.verify_prehash(message_hash, &signature).is_ok()
}
