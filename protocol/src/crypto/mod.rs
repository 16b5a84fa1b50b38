//! # Cryptographic Primitives for Passvault
//!
//! Everything security-related in the vault flows through here: key
//! format validation, canonical message construction, and ECDSA
//! verification.
//!
//! We deliberately chose boring, well-audited cryptography:
//!
//! - **ECDSA over P-256** for signatures — not because P-256 is anyone's
//!   favorite curve, but because it is *the* passkey curve. WebAuthn
//!   authenticators ship P-256 keys, so the vault verifies P-256
//!   signatures. Interop beats aesthetics.
//! - **SHA-256** for message hashing — same reason. The signer on the
//!   other side is a hardware authenticator we don't control.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. The curve arithmetic lives in the `p256` crate; this module
//! only defines byte layouts and wraps the audited verify call. If you're
//! tempted to optimize these functions, please reconsider. Then go read
//! about timing attacks and come back when you've lost the urge.

pub mod hash;
pub mod keys;
pub mod message;
pub mod signatures;

// Re-export the things people actually need so they don't have to
// memorize the module hierarchy.
pub use hash::sha256;
pub use keys::{KeyError, Passkey, PasskeyPublicKey};
pub use message::{rotation_message_hash, withdrawal_message_hash};
pub use signatures::verify;
