//! # Structured Events
//!
//! One event per successful mutation — the contract the external relay
//! indexes against. The relay dispatches on the `event` tag and reads
//! fields by name, so both are frozen: `vault-id`, `new-balance`,
//! `remaining-balance` and friends are kebab-case because that is what
//! the deployed observers already parse. Renaming a field here silently
//! zeroes a dashboard somewhere.
//!
//! Failed operations emit nothing. The relay only ever sees state that
//! actually came to exist.
//!
//! ## The sink seam
//!
//! The core does not know how events leave the process — that is the
//! relay's transport, which is out of scope. [`EventSink`] is the seam:
//! the node wires in [`LogSink`] (events as structured log lines), tests
//! wire in [`MemorySink`] and assert on what was emitted.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::identity::Principal;

/// An event describing one successful vault mutation.
///
/// Serializes to the relay's wire shape: an `event` tag plus the
/// operation's numeric parameters under stable kebab-case names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum VaultEvent {
    /// A new vault was registered.
    #[serde(rename = "vault-created")]
    VaultCreated {
        #[serde(rename = "vault-id")]
        vault_id: u64,
        owner: Principal,
        /// Initial lock duration in seconds; zero if none.
        #[serde(rename = "time-lock")]
        time_lock: u64,
        #[serde(rename = "daily-limit")]
        daily_limit: u128,
    },

    /// Funds entered a vault.
    #[serde(rename = "deposit")]
    Deposit {
        #[serde(rename = "vault-id")]
        vault_id: u64,
        amount: u128,
        #[serde(rename = "new-balance")]
        new_balance: u128,
    },

    /// A passkey-authorized withdrawal succeeded.
    #[serde(rename = "withdrawal")]
    Withdrawal {
        #[serde(rename = "vault-id")]
        vault_id: u64,
        amount: u128,
        #[serde(rename = "remaining-balance")]
        remaining_balance: u128,
    },

    /// The owner set a new time-lock.
    #[serde(rename = "time-lock-set")]
    TimeLockSet {
        #[serde(rename = "vault-id")]
        vault_id: u64,
        /// Requested duration in seconds.
        duration: u64,
        /// Absolute unlock timestamp.
        until: u64,
    },

    /// The passkey was rotated. The key itself is deliberately not in
    /// the event — public keys in an analytics stream are an
    /// unnecessary correlation gift.
    #[serde(rename = "passkey-updated")]
    PasskeyUpdated {
        #[serde(rename = "vault-id")]
        vault_id: u64,
    },

    /// The daily withdrawal cap changed.
    #[serde(rename = "withdrawal-limit-updated")]
    WithdrawalLimitUpdated {
        #[serde(rename = "vault-id")]
        vault_id: u64,
        #[serde(rename = "new-limit")]
        new_limit: u128,
    },

    /// A recovery contact and delay were configured.
    #[serde(rename = "recovery-contact-set")]
    RecoveryContactSet {
        #[serde(rename = "vault-id")]
        vault_id: u64,
        contact: Principal,
        /// Delay in seconds between request and execution.
        delay: u64,
    },

    /// The recovery contact opened a recovery request.
    #[serde(rename = "recovery-requested")]
    RecoveryRequested {
        #[serde(rename = "vault-id")]
        vault_id: u64,
        #[serde(rename = "requested-at")]
        requested_at: u64,
    },

    /// The owner cancelled a pending recovery request.
    #[serde(rename = "recovery-cancelled")]
    RecoveryCancelled {
        #[serde(rename = "vault-id")]
        vault_id: u64,
    },

    /// A matured recovery swept the vault balance to the contact.
    #[serde(rename = "emergency-recovery")]
    EmergencyRecovery {
        #[serde(rename = "vault-id")]
        vault_id: u64,
        amount: u128,
    },

    /// The admin flipped the protocol-wide shutdown switch.
    #[serde(rename = "emergency-shutdown")]
    EmergencyShutdown { enabled: bool },
}

impl VaultEvent {
    /// The stable `event` tag value.
    pub fn name(&self) -> &'static str {
        match self {
            VaultEvent::VaultCreated { .. } => "vault-created",
            VaultEvent::Deposit { .. } => "deposit",
            VaultEvent::Withdrawal { .. } => "withdrawal",
            VaultEvent::TimeLockSet { .. } => "time-lock-set",
            VaultEvent::PasskeyUpdated { .. } => "passkey-updated",
            VaultEvent::WithdrawalLimitUpdated { .. } => "withdrawal-limit-updated",
            VaultEvent::RecoveryContactSet { .. } => "recovery-contact-set",
            VaultEvent::RecoveryRequested { .. } => "recovery-requested",
            VaultEvent::RecoveryCancelled { .. } => "recovery-cancelled",
            VaultEvent::EmergencyRecovery { .. } => "emergency-recovery",
            VaultEvent::EmergencyShutdown { .. } => "emergency-shutdown",
        }
    }
}

/// Where emitted events go. Exactly one `emit` per successful mutation.
pub trait EventSink: Send + Sync {
    /// Delivers one event. Must not fail — delivery problems are the
    /// sink's to handle; the mutation has already happened.
    fn emit(&self, event: &VaultEvent);
}

/// Emits events as structured `tracing` log lines under the
/// `passvault::events` target. The shape the relay would consume.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: &VaultEvent) {
        match serde_json::to_string(event) {
            Ok(json) => {
                tracing::info!(target: "passvault::events", event = %json, "event emitted");
            }
            Err(err) => {
                // Serialization of these enums cannot realistically
                // fail, but swallowing an event silently would be worse
                // than a noisy log line.
                tracing::error!(target: "passvault::events", error = %err, "event serialization failed");
            }
        }
    }
}

/// Collects events in memory for test assertions.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<VaultEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<VaultEvent> {
        self.events.lock().clone()
    }

    /// The most recent event, if any.
    pub fn last(&self) -> Option<VaultEvent> {
        self.events.lock().last().cloned()
    }

    /// Drains and returns all collected events.
    pub fn take(&self) -> Vec<VaultEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &VaultEvent) {
        self.events.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_wire_shape_matches_the_relay() {
        let event = VaultEvent::Deposit {
            vault_id: 1,
            amount: 500_000_000,
            new_balance: 500_000_000,
        };
        let value: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "deposit");
        assert_eq!(value["vault-id"], 1);
        assert_eq!(value["amount"], 500_000_000u64);
        assert_eq!(value["new-balance"], 500_000_000u64);
    }

    #[test]
    fn withdrawal_uses_remaining_balance_field() {
        let event = VaultEvent::Withdrawal {
            vault_id: 2,
            amount: 100,
            remaining_balance: 400,
        };
        let value: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "withdrawal");
        assert_eq!(value["remaining-balance"], 400);
    }

    #[test]
    fn tag_names_match_the_event_method() {
        let events = [
            VaultEvent::PasskeyUpdated { vault_id: 1 },
            VaultEvent::EmergencyShutdown { enabled: true },
            VaultEvent::TimeLockSet {
                vault_id: 1,
                duration: 3_600,
                until: 10_000,
            },
        ];
        for event in events {
            let value: serde_json::Value = serde_json::to_value(&event).unwrap();
            assert_eq!(value["event"], event.name());
        }
    }

    #[test]
    fn roundtrip_through_json() {
        let event = VaultEvent::EmergencyRecovery {
            vault_id: 7,
            amount: 123_456,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: VaultEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn memory_sink_collects_in_order() {
        let sink = MemorySink::new();
        sink.emit(&VaultEvent::PasskeyUpdated { vault_id: 1 });
        sink.emit(&VaultEvent::PasskeyUpdated { vault_id: 2 });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            sink.last(),
            Some(VaultEvent::PasskeyUpdated { vault_id: 2 })
        );

        sink.take();
        assert!(sink.events().is_empty());
    }
}
