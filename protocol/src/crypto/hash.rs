//! # Hashing
//!
//! SHA-256, the one hash function in this protocol. Signed-message
//! preimages are hashed with SHA-256 because that is what WebAuthn
//! signers and the deployed contract agreed on years ago. Adding a
//! second hash function here requires a very good reason, and
//! "it's faster" is not one — the preimages are 48 and 65 bytes.

use sha2::{Digest, Sha256};

use crate::config::MESSAGE_HASH_LENGTH;

/// Computes the SHA-256 digest of `data` as a fixed-size array.
///
/// The array return type propagates naturally into the signature paths,
/// which all want `[u8; 32]`.
pub fn sha256(data: &[u8]) -> [u8; MESSAGE_HASH_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut out = [0u8; MESSAGE_HASH_LENGTH];
    out.copy_from_slice(&digest);
    out
}
