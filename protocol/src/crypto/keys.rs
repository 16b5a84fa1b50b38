//! # Passkey Key Material
//!
//! Compressed P-256 public keys and the signing-side helper used by
//! offline tooling and tests.
//!
//! Every vault stores exactly one passkey public key: 33 bytes of SEC1
//! compressed point — a `0x02`/`0x03` prefix byte followed by the 32-byte
//! X coordinate. That is the encoding WebAuthn authenticators export and
//! the encoding every signed message embeds, so it is the only encoding
//! this module accepts.
//!
//! ## Format validation vs. point validation
//!
//! [`PasskeyPublicKey::from_bytes`] checks *format* only (length and
//! prefix byte). It does not check that the X coordinate is on the curve.
//! This mirrors the deployed contract: a well-formed but off-curve key is
//! accepted at registration and simply fails every signature verification
//! afterwards. Full point validation happens inside
//! [`crate::crypto::signatures::verify`].
//!
//! ## Security considerations
//!
//! - Private key material lives only in [`Passkey`], which is tooling for
//!   fixture generation and tests. The running core never holds a private
//!   key.
//! - Key bytes are hex in `Display` output because public keys are public.
//!   Secret keys are never printed. If you add logging of secret material,
//!   you will be asked to leave.

use p256::ecdsa::signature::hazmat::PrehashSigner;
use p256::ecdsa::{Signature, SigningKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::config::{
    COMPRESSED_KEY_LENGTH, KEY_PREFIX_EVEN, KEY_PREFIX_ODD, MESSAGE_HASH_LENGTH, SIGNATURE_LENGTH,
};
use crate::error::VaultError;

/// Errors from the signing-side helper.
///
/// These never cross the vault ABI — they belong to offline tooling.
/// ABI-visible key problems are [`VaultError::InvalidPublicKey`].
#[derive(Debug, Error)]
pub enum KeyError {
    /// The secret key bytes are not a valid P-256 scalar.
    #[error("invalid secret key bytes: not a valid P-256 scalar")]
    InvalidSecretKey,

    /// The signer failed to produce a signature. With P-256 and RFC 6979
    /// nonces this indicates key or input corruption, not bad luck.
    #[error("signing failed")]
    SigningFailed,
}

/// A compressed P-256 public key as stored in a vault record.
///
/// Exactly [`COMPRESSED_KEY_LENGTH`] bytes, prefix `0x02` or `0x03`.
/// Construction goes through [`from_bytes`](Self::from_bytes), which
/// enforces the format and nothing more — see the module docs for why.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PasskeyPublicKey {
    bytes: [u8; COMPRESSED_KEY_LENGTH],
}

impl PasskeyPublicKey {
    /// Validates and wraps compressed public key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidPublicKey`] (code 108) if the slice
    /// is not exactly 33 bytes or the first byte is not `0x02`/`0x03`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VaultError> {
        if bytes.len() != COMPRESSED_KEY_LENGTH {
            return Err(VaultError::InvalidPublicKey {
                reason: "expected exactly 33 bytes",
            });
        }
        if bytes[0] != KEY_PREFIX_EVEN && bytes[0] != KEY_PREFIX_ODD {
            return Err(VaultError::InvalidPublicKey {
                reason: "prefix byte must be 0x02 or 0x03",
            });
        }
        let mut arr = [0u8; COMPRESSED_KEY_LENGTH];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Parses a hex-encoded compressed key, with or without a `0x` prefix.
    ///
    /// Convenience for CLI arguments and fixture files.
    pub fn from_hex(hex_str: &str) -> Result<Self, VaultError> {
        let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(stripped).map_err(|_| VaultError::InvalidPublicKey {
            reason: "not valid hex",
        })?;
        Self::from_bytes(&bytes)
    }

    /// The raw 33 compressed bytes.
    pub fn as_bytes(&self) -> &[u8; COMPRESSED_KEY_LENGTH] {
        &self.bytes
    }

    /// Hex encoding of the compressed bytes, without a `0x` prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for PasskeyPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PasskeyPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PasskeyPublicKey({})", self.to_hex())
    }
}

impl Serialize for PasskeyPublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PasskeyPublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PasskeyPublicKey::from_hex(&s).map_err(D::Error::custom)
    }
}

/// A P-256 signing key — the private half of a passkey.
///
/// This type exists for fixture generation (`passvault-node keygen`) and
/// tests that need real signatures. In production the private key lives
/// inside a hardware authenticator and never touches this code.
///
/// `Passkey` intentionally does NOT implement `Serialize`/`Deserialize`.
/// Exporting a private key should be a deliberate act via
/// [`secret_bytes`](Self::secret_bytes), not something that happens
/// because a struct got shoved into a JSON response.
pub struct Passkey {
    signing_key: SigningKey,
}

impl Passkey {
    /// Generates a fresh P-256 keypair from the OS CSPRNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Reconstructs a passkey from 32 raw secret-scalar bytes.
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self, KeyError> {
        let signing_key =
            SigningKey::from_slice(secret).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// The compressed public key to register with a vault.
    pub fn public_key(&self) -> PasskeyPublicKey {
        let point = self.signing_key.verifying_key().to_encoded_point(true);
        // A P-256 point compresses to exactly 33 bytes with an 02/03
        // prefix, so this construction cannot fail.
        let mut bytes = [0u8; COMPRESSED_KEY_LENGTH];
        bytes.copy_from_slice(point.as_bytes());
        PasskeyPublicKey { bytes }
    }

    /// The raw 32-byte secret scalar. Handle with care.
    pub fn secret_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }

    /// Signs a prehashed 32-byte message digest, returning the raw
    /// 64-byte `r ‖ s` signature the vault expects.
    ///
    /// The digest must already be the SHA-256 of a canonical preimage
    /// (see [`crate::crypto::message`]) — this function does not hash.
    pub fn sign_hash(
        &self,
        message_hash: &[u8; MESSAGE_HASH_LENGTH],
    ) -> Result<[u8; SIGNATURE_LENGTH], KeyError> {
        let signature: Signature = self
            .signing_key
            .sign_prehash(message_hash)
            .map_err(|_| KeyError::SigningFailed)?;
        let mut out = [0u8; SIGNATURE_LENGTH];
        out.copy_from_slice(&signature.to_bytes());
        Ok(out)
    }
}

impl fmt::Debug for Passkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the secret scalar.
        write!(f, "Passkey(public={})", self.public_key().to_hex())
    }
}
