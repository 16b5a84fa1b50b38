// Copyright (c) 2026 Passvault Contributors. MIT License.
// See LICENSE for details.

//! # Passvault Protocol — Core Library
//!
//! The authorization core of a passkey-secured value vault: every rule
//! that decides whether money may move lives here, and nowhere else.
//!
//! Passvault takes a deliberately narrow stance: ECDSA over NIST P-256
//! (the curve every platform authenticator already speaks), SHA-256 for
//! message digests, and raw 64-byte signatures over canonical fixed-width
//! messages — no DER, no malleable encodings, no ambiguity about what
//! was signed.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns of a
//! custody system:
//!
//! - **crypto** — Key handling, canonical messages, signature checks.
//! - **vault** — The vault record and its pure policy logic: nonces,
//!   time-locks, daily limits, recovery.
//! - **registry** — The orchestration core. Owns every vault, runs every
//!   operation's checks in a fixed order, mutates only when all pass.
//! - **admin** — Protocol aggregates and the emergency shutdown switch.
//! - **events** — Structured kebab-case events, one per mutation.
//! - **identity** — Substrate-attested caller principals.
//! - **clock** — The block-time seam; tests drive it by hand.
//! - **error** — The frozen 100–108 error taxonomy.
//! - **config** — Protocol constants and wire-format lengths.
//!
//! ## Design Philosophy
//!
//! 1. A signature authorizes one exact operation at one exact nonce.
//! 2. Every check runs before the first mutation — failure leaves no trace.
//! 3. If it touches money, it has tests. Plural.

pub mod admin;
pub mod clock;
pub mod config;
pub mod crypto;
pub mod error;
pub mod events;
pub mod identity;
pub mod registry;
pub mod vault;

pub use error::VaultError;
pub use identity::Principal;
pub use registry::VaultRegistry;
