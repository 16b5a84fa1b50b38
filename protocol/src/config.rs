//! # Protocol Configuration & Constants
//!
//! Every magic number in Passvault lives here. If you're hardcoding a
//! constant somewhere else, you're doing it wrong and you owe the team
//! coffee.
//!
//! Several of these values are consensus-critical: the byte layouts and
//! minimum durations are baked into signed messages and deployed callers.
//! Changing them breaks every existing signature and integration, so don't.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// The protocol version string, assembled at compile time.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// secp256r1 (NIST P-256) — the curve WebAuthn authenticators actually
/// speak. Passkeys are P-256 keys, so the vault verifies P-256 signatures.
/// Not negotiable without replacing every enrolled passkey on the planet.
pub const SIGNING_CURVE: &str = "secp256r1";

/// Compressed SEC1 public key length: one prefix byte plus the 32-byte
/// X coordinate.
pub const COMPRESSED_KEY_LENGTH: usize = 33;

/// SEC1 prefix byte for a point with an even Y coordinate.
pub const KEY_PREFIX_EVEN: u8 = 0x02;

/// SEC1 prefix byte for a point with an odd Y coordinate.
pub const KEY_PREFIX_ODD: u8 = 0x03;

/// Raw signature length: `r(32B) ‖ s(32B)`, both big-endian and
/// zero-padded. No DER, no ASN.1, no exceptions.
pub const SIGNATURE_LENGTH: usize = 64;

/// SHA-256 digest length. Signed messages are always hashed before
/// signing or verification.
pub const MESSAGE_HASH_LENGTH: usize = 32;

/// Width of each numeric field in a signed-message preimage. Vault id,
/// amount, and nonce are all encoded as 16-byte big-endian values,
/// zero-padded even though the logical values are far smaller. This
/// layout is what existing signers produce; preserve it exactly.
pub const PREIMAGE_FIELD_LENGTH: usize = 16;

/// Withdrawal preimage: `vault_id(16B) ‖ amount(16B) ‖ nonce(16B)`.
pub const WITHDRAWAL_PREIMAGE_LENGTH: usize = 48;

/// Key-rotation preimage: `vault_id(16B) ‖ new_key(33B) ‖ nonce(16B)`.
pub const ROTATION_PREIMAGE_LENGTH: usize = 65;

// ---------------------------------------------------------------------------
// Policy Minimums & Windows
// ---------------------------------------------------------------------------

/// Minimum time-lock duration accepted by `set_time_lock`: one hour.
/// Shorter locks are rejected — they provide no meaningful protection
/// and only generate support tickets. Initial locks at vault creation
/// are exempt (zero means "no lock").
pub const MIN_TIME_LOCK_SECS: u64 = 3_600;

/// Minimum recovery delay: seven days. Recovery exists for the
/// "lost my passkey" case, and a week gives the real owner time to
/// notice and cancel a hostile request.
pub const MIN_RECOVERY_DELAY_SECS: u64 = 604_800;

/// Length of the rolling daily-withdrawal window.
pub const DAILY_WINDOW_SECS: u64 = 86_400;

// ---------------------------------------------------------------------------
// Identifiers & Units
// ---------------------------------------------------------------------------

/// The first vault id ever assigned. Ids are sequential from here; id 0
/// is deliberately never valid, which makes uninitialized-id bugs loud.
pub const FIRST_VAULT_ID: u64 = 1;

/// Micro-STX per STX. All balances and limits are denominated in µSTX.
pub const MICRO_STX_PER_STX: u128 = 1_000_000;
