//! End-to-end integration tests for the Passvault protocol.
//!
//! These tests exercise full vault lifecycles through the public registry
//! API with real P-256 keys and real signatures. They prove that the
//! core components compose correctly: key registration, deposits,
//! canonical message signing, signature-gated withdrawals, nonce replay
//! protection, time-locks, daily-limit windows, passkey rotation,
//! guardian recovery, and the emergency shutdown switch.
//!
//! Each test stands alone with its own registry, manual clock, and
//! in-memory event sink. No shared state, no test ordering dependencies,
//! no flaky failures.

use std::sync::Arc;

use passvault_protocol::clock::{Clock, ManualClock};
use passvault_protocol::crypto::{
    rotation_message_hash, withdrawal_message_hash, Passkey,
};
use passvault_protocol::events::{EventSink, MemorySink, VaultEvent};
use passvault_protocol::registry::RawSignature;
use passvault_protocol::{Principal, VaultError, VaultRegistry};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const GENESIS_TIME: u64 = 1_700_000_000;
const DAY: u64 = 86_400;
const WEEK: u64 = 604_800;
const STX: u128 = 1_000_000;

/// Spins up a registry with a manual clock and a recording sink.
/// Returns the shared components so tests can inspect them directly.
fn setup() -> (VaultRegistry, Arc<ManualClock>, Arc<MemorySink>) {
    let clock = Arc::new(ManualClock::new(GENESIS_TIME));
    let sink = Arc::new(MemorySink::new());
    let registry = VaultRegistry::new(
        Principal::from("deployer"),
        Arc::clone(&clock) as Arc<dyn Clock>,
        Arc::clone(&sink) as Arc<dyn EventSink>,
    );
    (registry, clock, sink)
}

fn deployer() -> Principal {
    Principal::from("deployer")
}

/// Signs the canonical withdrawal message for the given parameters.
fn sign_withdrawal(passkey: &Passkey, vault_id: u64, amount: u128, nonce: u64) -> RawSignature {
    let hash = withdrawal_message_hash(vault_id, amount, nonce);
    passkey.sign_hash(&hash).expect("signing")
}

/// Signs the canonical passkey-rotation message with the current key.
fn sign_rotation(current: &Passkey, vault_id: u64, new: &Passkey, nonce: u64) -> RawSignature {
    let hash = rotation_message_hash(vault_id, &new.public_key(), nonce);
    current.sign_hash(&hash).expect("signing")
}

// ---------------------------------------------------------------------------
// The canonical lifecycle
// ---------------------------------------------------------------------------

#[test]
fn create_deposit_withdraw_lifecycle() {
    let (mut registry, _clock, sink) = setup();
    let owner = Principal::from("wallet_1");
    let passkey = Passkey::generate();

    // Register with no lock and a 1000 STX daily cap.
    let id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), 0, 1_000 * STX)
        .expect("create");
    assert_eq!(id, 1);

    // Fund with 500 STX.
    let balance = registry.deposit_stx(&owner, id, 500 * STX).expect("deposit");
    assert_eq!(balance, 500 * STX);

    // Withdraw 100 STX with a signature over nonce 0.
    let sig = sign_withdrawal(&passkey, id, 100 * STX, 0);
    let remaining = registry
        .withdraw_with_passkey(id, 100 * STX, &sig)
        .expect("withdraw");
    assert_eq!(remaining, 400 * STX);

    // The record reflects every step.
    let vault = registry.get_vault(id).expect("vault");
    assert_eq!(vault.balance, 400 * STX);
    assert_eq!(vault.nonce, 1);
    assert_eq!(vault.daily_withdrawn, 100 * STX);

    // And exactly three events left the core, in order.
    let names: Vec<_> = sink.events().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["vault-created", "deposit", "withdrawal"]);
}

#[test]
fn vault_ids_are_sequential_across_owners() {
    let (mut registry, _clock, _sink) = setup();
    for i in 1..=3u64 {
        let owner = Principal::from(format!("wallet_{i}"));
        let key = Passkey::generate();
        let id = registry
            .create_vault(&owner, key.public_key().as_bytes(), 0, STX)
            .expect("create");
        assert_eq!(id, i);
    }
    assert_eq!(registry.get_protocol_stats().total_vaults, 3);
}

#[test]
fn second_vault_for_the_same_owner_is_refused() {
    let (mut registry, _clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let key = Passkey::generate();
    registry
        .create_vault(&owner, key.public_key().as_bytes(), 0, STX)
        .expect("create");

    let err = registry
        .create_vault(&owner, key.public_key().as_bytes(), 0, STX)
        .unwrap_err();
    assert_eq!(err, VaultError::VaultExists { existing: 1 });
    assert_eq!(err.code(), 106);
}

#[test]
fn malformed_keys_are_rejected_at_registration() {
    let (mut registry, _clock, _sink) = setup();
    let owner = Principal::from("wallet_1");

    // Wrong length.
    let err = registry.create_vault(&owner, &[0x02; 32], 0, STX).unwrap_err();
    assert_eq!(err.code(), 108);

    // Wrong prefix (uncompressed marker).
    let mut bad = [0xAAu8; 33];
    bad[0] = 0x04;
    let err = registry.create_vault(&owner, &bad, 0, STX).unwrap_err();
    assert_eq!(err.code(), 108);

    // Format-valid but off-curve bytes are accepted here...
    let mut off_curve = [0xAAu8; 33];
    off_curve[0] = 0x02;
    let id = registry
        .create_vault(&owner, &off_curve, 0, 1_000 * STX)
        .expect("format-only validation");
    registry.deposit_stx(&owner, id, 10 * STX).expect("deposit");

    // ...and every signature against them fails at verification time.
    let sig = [0u8; 64];
    let err = registry.withdraw_with_passkey(id, STX, &sig).unwrap_err();
    assert_eq!(err, VaultError::InvalidSignature);
}

// ---------------------------------------------------------------------------
// Replay protection & signature binding
// ---------------------------------------------------------------------------

#[test]
fn a_signature_spends_exactly_once() {
    let (mut registry, _clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let passkey = Passkey::generate();
    let id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), 0, 1_000 * STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 500 * STX).expect("deposit");

    let sig = sign_withdrawal(&passkey, id, 100 * STX, 0);
    registry.withdraw_with_passkey(id, 100 * STX, &sig).expect("first use");

    // Replay: identical bytes, but the nonce has advanced.
    let err = registry.withdraw_with_passkey(id, 100 * STX, &sig).unwrap_err();
    assert_eq!(err, VaultError::InvalidSignature);
    assert_eq!(err.code(), 103);

    // The failed replay left no trace.
    let vault = registry.get_vault(id).expect("vault");
    assert_eq!(vault.balance, 400 * STX);
    assert_eq!(vault.nonce, 1);
    assert_eq!(vault.daily_withdrawn, 100 * STX);
}

#[test]
fn a_signature_binds_amount_vault_and_nonce() {
    let (mut registry, _clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let passkey = Passkey::generate();
    let id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), 0, 1_000 * STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 500 * STX).expect("deposit");

    // Signed 100 STX, submitted 200 STX.
    let sig = sign_withdrawal(&passkey, id, 100 * STX, 0);
    assert_eq!(
        registry.withdraw_with_passkey(id, 200 * STX, &sig).unwrap_err(),
        VaultError::InvalidSignature
    );

    // Signed for a different vault id.
    let sig = sign_withdrawal(&passkey, id + 1, 100 * STX, 0);
    assert_eq!(
        registry.withdraw_with_passkey(id, 100 * STX, &sig).unwrap_err(),
        VaultError::InvalidSignature
    );

    // Signed at a future nonce.
    let sig = sign_withdrawal(&passkey, id, 100 * STX, 5);
    assert_eq!(
        registry.withdraw_with_passkey(id, 100 * STX, &sig).unwrap_err(),
        VaultError::InvalidSignature
    );

    // Nothing moved.
    assert_eq!(registry.get_vault(id).expect("vault").balance, 500 * STX);
    assert_eq!(registry.get_nonce(id).expect("nonce"), 0);
}

#[test]
fn anyone_may_relay_a_validly_signed_withdrawal() {
    // The registry never looks at the caller for withdrawals — there is
    // no caller parameter to look at. This test documents that the
    // signature alone moves the money, wherever it arrives from.
    let (mut registry, _clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let passkey = Passkey::generate();
    let id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), 0, 1_000 * STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 500 * STX).expect("deposit");

    let sig = sign_withdrawal(&passkey, id, 50 * STX, 0);
    let remaining = registry.withdraw_with_passkey(id, 50 * STX, &sig).expect("relay");
    assert_eq!(remaining, 450 * STX);
}

// ---------------------------------------------------------------------------
// Time-locks
// ---------------------------------------------------------------------------

#[test]
fn time_lock_blocks_withdrawals_until_expiry() {
    let (mut registry, clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let passkey = Passkey::generate();
    let id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), DAY, 1_000 * STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 500 * STX).expect("deposit");

    assert!(registry.is_time_locked(id).expect("query"));
    assert_eq!(registry.get_time_lock_remaining(id).expect("query"), DAY);

    let sig = sign_withdrawal(&passkey, id, 10 * STX, 0);
    let err = registry.withdraw_with_passkey(id, 10 * STX, &sig).unwrap_err();
    assert_eq!(
        err,
        VaultError::TimeLockActive {
            until: GENESIS_TIME + DAY
        }
    );
    assert_eq!(err.code(), 104);

    // One second before expiry: still locked.
    clock.advance(DAY - 1);
    assert!(registry.is_time_locked(id).expect("query"));

    // At expiry exactly: unlocked, and the unused signature still works.
    clock.advance(1);
    assert!(!registry.is_time_locked(id).expect("query"));
    registry
        .withdraw_with_passkey(id, 10 * STX, &sig)
        .expect("post-expiry withdrawal");
}

#[test]
fn owner_set_lock_enforces_the_one_hour_minimum() {
    let (mut registry, _clock, sink) = setup();
    let owner = Principal::from("wallet_1");
    let passkey = Passkey::generate();
    let id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), 0, STX)
        .expect("create");

    let err = registry.set_time_lock(&owner, id, 3_599).unwrap_err();
    assert_eq!(
        err,
        VaultError::InvalidTimeLock {
            given: 3_599,
            minimum: 3_600
        }
    );
    assert_eq!(err.code(), 105);

    let until = registry.set_time_lock(&owner, id, 3_600).expect("set");
    assert_eq!(until, GENESIS_TIME + 3_600);
    assert_eq!(
        sink.last(),
        Some(VaultEvent::TimeLockSet {
            vault_id: id,
            duration: 3_600,
            until,
        })
    );

    // Non-owners cannot touch the lock.
    let err = registry
        .set_time_lock(&Principal::from("wallet_2"), id, 3_600)
        .unwrap_err();
    assert_eq!(err.code(), 100);
}

#[test]
fn initial_lock_has_no_minimum() {
    let (mut registry, _clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let key = Passkey::generate();

    // 60 seconds would be rejected by set_time_lock, but is fine at
    // creation.
    let id = registry
        .create_vault(&owner, key.public_key().as_bytes(), 60, STX)
        .expect("create");
    assert!(registry.is_time_locked(id).expect("query"));
    assert_eq!(registry.get_time_lock_remaining(id).expect("query"), 60);
}

// ---------------------------------------------------------------------------
// Daily withdrawal limits
// ---------------------------------------------------------------------------

#[test]
fn the_daily_cap_holds_until_the_window_rolls() {
    let (mut registry, clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let passkey = Passkey::generate();
    let id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), 0, 50 * STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 500 * STX).expect("deposit");

    // A single over-cap attempt: 100 STX against a 50 STX cap.
    let sig = sign_withdrawal(&passkey, id, 100 * STX, 0);
    let err = registry.withdraw_with_passkey(id, 100 * STX, &sig).unwrap_err();
    assert_eq!(
        err,
        VaultError::InsufficientBalance {
            requested: 100 * STX,
            available: 50 * STX,
        }
    );
    assert_eq!(err.code(), 102);
    // The rejected attempt consumed nothing — not even the nonce.
    assert_eq!(registry.get_nonce(id).expect("nonce"), 0);

    // Exhaust the cap exactly.
    let sig = sign_withdrawal(&passkey, id, 50 * STX, 0);
    registry.withdraw_with_passkey(id, 50 * STX, &sig).expect("at cap");
    assert_eq!(registry.get_daily_withdrawal_available(id).expect("query"), 0);

    // One second short of a day: still exhausted.
    clock.advance(DAY - 1);
    let sig = sign_withdrawal(&passkey, id, STX, 1);
    assert_eq!(
        registry.withdraw_with_passkey(id, STX, &sig).unwrap_err().code(),
        102
    );

    // The window rolls at exactly 24 hours, and the signature that was
    // refused (never consumed) now clears.
    clock.advance(1);
    assert_eq!(
        registry.get_daily_withdrawal_available(id).expect("query"),
        50 * STX
    );
    registry.withdraw_with_passkey(id, STX, &sig).expect("fresh window");
}

#[test]
fn lowering_the_limit_mid_window_blocks_further_withdrawals() {
    let (mut registry, clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let passkey = Passkey::generate();
    let id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), 0, 100 * STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 500 * STX).expect("deposit");

    let sig = sign_withdrawal(&passkey, id, 80 * STX, 0);
    registry.withdraw_with_passkey(id, 80 * STX, &sig).expect("withdraw");

    // Lower the cap below what was already withdrawn today. The window
    // is deliberately not reset, so the vault is dry until tomorrow.
    registry
        .update_withdrawal_limit(&owner, id, 50 * STX)
        .expect("update");
    assert_eq!(registry.get_daily_withdrawal_available(id).expect("query"), 0);

    let sig = sign_withdrawal(&passkey, id, STX, 1);
    assert_eq!(
        registry.withdraw_with_passkey(id, STX, &sig).unwrap_err().code(),
        102
    );

    clock.advance(DAY);
    registry.withdraw_with_passkey(id, STX, &sig).expect("next day");
}

#[test]
fn balance_shortfall_reports_the_actual_balance() {
    let (mut registry, _clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let passkey = Passkey::generate();
    let id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), 0, u128::MAX)
        .expect("create");
    registry.deposit_stx(&owner, id, 100).expect("deposit");

    let sig = sign_withdrawal(&passkey, id, 200, 0);
    let err = registry.withdraw_with_passkey(id, 200, &sig).unwrap_err();
    assert_eq!(
        err,
        VaultError::InsufficientBalance {
            requested: 200,
            available: 100,
        }
    );
}

// ---------------------------------------------------------------------------
// Passkey rotation
// ---------------------------------------------------------------------------

#[test]
fn rotation_hands_authority_to_the_new_key() {
    let (mut registry, _clock, sink) = setup();
    let owner = Principal::from("wallet_1");
    let old_key = Passkey::generate();
    let new_key = Passkey::generate();
    let id = registry
        .create_vault(&owner, old_key.public_key().as_bytes(), 0, 1_000 * STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 500 * STX).expect("deposit");

    let sig = sign_rotation(&old_key, id, &new_key, 0);
    registry
        .update_passkey(id, new_key.public_key().as_bytes(), &sig)
        .expect("rotate");
    assert_eq!(sink.last(), Some(VaultEvent::PasskeyUpdated { vault_id: id }));
    assert_eq!(registry.get_nonce(id).expect("nonce"), 1);

    // The old key is dead, the new one lives, both at nonce 1.
    let stale = sign_withdrawal(&old_key, id, 10 * STX, 1);
    assert_eq!(
        registry.withdraw_with_passkey(id, 10 * STX, &stale).unwrap_err(),
        VaultError::InvalidSignature
    );
    let fresh = sign_withdrawal(&new_key, id, 10 * STX, 1);
    registry.withdraw_with_passkey(id, 10 * STX, &fresh).expect("new key");
}

#[test]
fn rotation_must_be_approved_by_the_outgoing_key() {
    let (mut registry, _clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let old_key = Passkey::generate();
    let new_key = Passkey::generate();
    let id = registry
        .create_vault(&owner, old_key.public_key().as_bytes(), 0, STX)
        .expect("create");

    // A rotation message signed by the incoming key proves nothing.
    let sig = sign_rotation(&new_key, id, &new_key, 0);
    let err = registry
        .update_passkey(id, new_key.public_key().as_bytes(), &sig)
        .unwrap_err();
    assert_eq!(err, VaultError::InvalidSignature);
    assert_eq!(
        registry.get_vault(id).expect("vault").passkey,
        old_key.public_key()
    );
}

// ---------------------------------------------------------------------------
// Guardian recovery
// ---------------------------------------------------------------------------

#[test]
fn recovery_sweeps_the_balance_after_the_delay() {
    let (mut registry, clock, sink) = setup();
    let owner = Principal::from("wallet_1");
    let guardian = Principal::from("guardian");
    let passkey = Passkey::generate();
    let id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), 0, 1_000 * STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 500 * STX).expect("deposit");

    registry
        .set_recovery_contact(&owner, id, guardian.clone(), WEEK)
        .expect("set contact");
    let requested_at = registry.request_recovery(&guardian, id).expect("request");
    assert_eq!(requested_at, GENESIS_TIME);

    // Premature execution reports when it will become possible.
    clock.advance(WEEK - 1);
    let err = registry.emergency_recovery(&guardian, id).unwrap_err();
    assert_eq!(
        err,
        VaultError::TimeLockActive {
            until: GENESIS_TIME + WEEK
        }
    );

    clock.advance(1);
    let paid = registry.emergency_recovery(&guardian, id).expect("execute");
    assert_eq!(paid, 500 * STX);

    let vault = registry.get_vault(id).expect("vault");
    assert_eq!(vault.balance, 0);
    // Recovery moves funds, not control.
    assert_eq!(vault.owner, owner);
    assert_eq!(vault.passkey, passkey.public_key());
    assert_eq!(registry.get_protocol_stats().total_recoveries, 1);
    assert_eq!(
        sink.last(),
        Some(VaultEvent::EmergencyRecovery {
            vault_id: id,
            amount: 500 * STX,
        })
    );
}

#[test]
fn recovery_requires_a_standing_request() {
    let (mut registry, clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let guardian = Principal::from("guardian");
    let key = Passkey::generate();
    let id = registry
        .create_vault(&owner, key.public_key().as_bytes(), 0, STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 100 * STX).expect("deposit");
    registry
        .set_recovery_contact(&owner, id, guardian.clone(), WEEK)
        .expect("set contact");

    // No request opened: immediate execution is refused even after the
    // delay worth of time passes.
    clock.advance(WEEK * 2);
    assert_eq!(
        registry.emergency_recovery(&guardian, id).unwrap_err().code(),
        100
    );
}

#[test]
fn owner_cancellation_defeats_a_hostile_guardian() {
    let (mut registry, clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let guardian = Principal::from("guardian");
    let key = Passkey::generate();
    let id = registry
        .create_vault(&owner, key.public_key().as_bytes(), 0, STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 100 * STX).expect("deposit");
    registry
        .set_recovery_contact(&owner, id, guardian.clone(), WEEK)
        .expect("set contact");
    registry.request_recovery(&guardian, id).expect("request");

    // The delay is the owner's reaction window.
    clock.advance(DAY);
    registry.cancel_recovery(&owner, id).expect("cancel");

    clock.advance(WEEK);
    assert_eq!(
        registry.emergency_recovery(&guardian, id).unwrap_err().code(),
        100
    );
    assert_eq!(registry.get_vault(id).expect("vault").balance, 100 * STX);
}

#[test]
fn reconfiguring_the_contact_clears_a_pending_request() {
    let (mut registry, clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let first = Principal::from("guardian_1");
    let second = Principal::from("guardian_2");
    let key = Passkey::generate();
    let id = registry
        .create_vault(&owner, key.public_key().as_bytes(), 0, STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 100 * STX).expect("deposit");

    registry
        .set_recovery_contact(&owner, id, first.clone(), WEEK)
        .expect("set contact");
    registry.request_recovery(&first, id).expect("request");

    // Swapping guardians invalidates the old request outright.
    registry
        .set_recovery_contact(&owner, id, second.clone(), WEEK)
        .expect("replace contact");
    clock.advance(WEEK * 2);
    assert_eq!(
        registry.emergency_recovery(&second, id).unwrap_err().code(),
        100
    );
    // And the displaced guardian lost all standing.
    assert_eq!(
        registry.request_recovery(&first, id).unwrap_err().code(),
        100
    );
}

// ---------------------------------------------------------------------------
// Emergency shutdown
// ---------------------------------------------------------------------------

#[test]
fn shutdown_freezes_mutations_but_not_queries() {
    let (mut registry, _clock, sink) = setup();
    let owner = Principal::from("wallet_1");
    let passkey = Passkey::generate();
    let id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), 0, 1_000 * STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 500 * STX).expect("deposit");

    assert!(registry.emergency_shutdown_toggle(&deployer()).expect("toggle"));
    assert_eq!(
        sink.last(),
        Some(VaultEvent::EmergencyShutdown { enabled: true })
    );

    // Everything that moves value is refused with 100.
    assert_eq!(registry.deposit_stx(&owner, id, STX).unwrap_err().code(), 100);
    let sig = sign_withdrawal(&passkey, id, STX, 0);
    assert_eq!(
        registry.withdraw_with_passkey(id, STX, &sig).unwrap_err().code(),
        100
    );
    assert_eq!(
        registry
            .create_vault(
                &Principal::from("wallet_2"),
                Passkey::generate().public_key().as_bytes(),
                0,
                STX
            )
            .unwrap_err()
            .code(),
        100
    );
    assert_eq!(
        registry.set_time_lock(&owner, id, 3_600).unwrap_err().code(),
        100
    );

    // Queries keep answering.
    assert_eq!(registry.get_vault(id).expect("vault").balance, 500 * STX);
    assert_eq!(registry.get_nonce(id).expect("nonce"), 0);
    assert!(registry.get_protocol_stats().emergency_shutdown);

    // Service resumes on the second toggle, and the held signature was
    // never consumed.
    assert!(!registry.emergency_shutdown_toggle(&deployer()).expect("toggle"));
    registry.withdraw_with_passkey(id, STX, &sig).expect("resumed");
}

#[test]
fn only_the_deployer_may_toggle_shutdown() {
    let (mut registry, _clock, _sink) = setup();
    assert_eq!(
        registry
            .emergency_shutdown_toggle(&Principal::from("wallet_1"))
            .unwrap_err()
            .code(),
        100
    );
    assert!(!registry.get_protocol_stats().emergency_shutdown);
}

// ---------------------------------------------------------------------------
// Protocol aggregates
// ---------------------------------------------------------------------------

#[test]
fn stats_track_lifetime_volume() {
    let (mut registry, clock, _sink) = setup();
    let owner = Principal::from("wallet_1");
    let guardian = Principal::from("guardian");
    let passkey = Passkey::generate();

    let id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), 0, 1_000 * STX)
        .expect("create");
    registry.deposit_stx(&owner, id, 300 * STX).expect("deposit");
    registry.deposit_stx(&owner, id, 200 * STX).expect("deposit");

    // Withdrawals never reduce total_deposits — it is lifetime inflow.
    let sig = sign_withdrawal(&passkey, id, 400 * STX, 0);
    registry.withdraw_with_passkey(id, 400 * STX, &sig).expect("withdraw");

    registry
        .set_recovery_contact(&owner, id, guardian.clone(), WEEK)
        .expect("set contact");
    registry.request_recovery(&guardian, id).expect("request");
    clock.advance(WEEK);
    registry.emergency_recovery(&guardian, id).expect("recover");

    let stats = registry.get_protocol_stats();
    assert_eq!(stats.total_vaults, 1);
    assert_eq!(stats.total_deposits, 500 * STX);
    assert_eq!(stats.total_recoveries, 1);
}
