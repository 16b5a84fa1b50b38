//! # The Vault Registry
//!
//! The single entry point for every vault operation. The registry owns
//! the vault table and the owner index outright — no other component
//! holds vault state — and orchestrates the policy modules in a fixed
//! order for each operation:
//!
//! ```text
//! shutdown gate → resolve vault → authorization → policy checks
//!               → mutate → advance nonce (signature-gated ops)
//!               → update aggregates → emit event
//! ```
//!
//! Authorization comes in two modes, and each operation declares exactly
//! one:
//!
//! - **Owner-gated** (`deposit`, `set_time_lock`, limit and recovery
//!   configuration): the substrate-attested caller must equal the
//!   vault's owner.
//! - **Signature-gated** (`withdraw_with_passkey`, `update_passkey`):
//!   the caller's identity is irrelevant — anyone may relay the call —
//!   and authorization is a P-256 signature over a canonical message
//!   bound to the vault's current nonce. Replay protection is the nonce
//!   alone.
//!
//! ## Atomicity
//!
//! Each public method is one substrate transaction. Every check runs
//! before the first mutation, so a failing operation returns its error
//! with the registry byte-for-byte unchanged: no balance movement, no
//! nonce advance, no window roll, no event. The substrate serializes
//! calls; the registry itself takes `&mut self` and performs no locking.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::admin::{ProtocolAdmin, ProtocolState};
use crate::clock::Clock;
use crate::config::FIRST_VAULT_ID;
use crate::crypto::{
    rotation_message_hash, signatures, withdrawal_message_hash, PasskeyPublicKey,
};
use crate::error::VaultError;
use crate::events::{EventSink, VaultEvent};
use crate::identity::Principal;
use crate::vault::{limits, nonce, recovery, timelock, Vault};

/// Raw signature bytes as they arrive from a caller: `r(32B) ‖ s(32B)`.
pub type RawSignature = [u8; crate::config::SIGNATURE_LENGTH];

/// The vault table, owner index, protocol aggregates, and the
/// collaborators every operation consults.
pub struct VaultRegistry {
    /// Vault records keyed by id. BTreeMap keeps iteration in id order,
    /// which debugging and state dumps appreciate.
    vaults: BTreeMap<u64, Vault>,
    /// One vault per owner, enforced at creation through this index.
    owner_index: HashMap<Principal, u64>,
    /// The next id to assign. Starts at [`FIRST_VAULT_ID`].
    next_id: u64,
    /// Protocol-wide aggregates and the shutdown flag.
    state: ProtocolState,
    /// The designated administrator.
    admin: ProtocolAdmin,
    /// Block-time source supplied by the substrate.
    clock: Arc<dyn Clock>,
    /// Where successful mutations are announced.
    sink: Arc<dyn EventSink>,
}

impl VaultRegistry {
    /// Creates a registry at genesis: empty table, clean aggregates,
    /// the given identity as the permanent administrator.
    pub fn new(admin: Principal, clock: Arc<dyn Clock>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            vaults: BTreeMap::new(),
            owner_index: HashMap::new(),
            next_id: FIRST_VAULT_ID,
            state: ProtocolState::genesis(),
            admin: ProtocolAdmin::new(admin),
            clock,
            sink,
        }
    }

    // -----------------------------------------------------------------
    // Mutating operations
    // -----------------------------------------------------------------

    /// Registers a new vault for `caller` and returns its id.
    ///
    /// Ids are assigned sequentially starting at 1. The initial lock
    /// duration has no minimum (zero means unlocked); the daily limit
    /// takes effect immediately.
    ///
    /// # Errors
    ///
    /// 100 while shut down; 108 for a malformed key; 106 if `caller`
    /// already owns a vault.
    pub fn create_vault(
        &mut self,
        caller: &Principal,
        public_key: &[u8],
        lock_duration_secs: u64,
        daily_limit: u128,
    ) -> Result<u64, VaultError> {
        self.admin.ensure_active(&self.state)?;
        let passkey = PasskeyPublicKey::from_bytes(public_key)?;
        if let Some(&existing) = self.owner_index.get(caller) {
            return Err(VaultError::VaultExists { existing });
        }

        let now = self.clock.now();
        let id = self.next_id;
        let mut vault = Vault::new(id, caller.clone(), passkey, daily_limit, now);
        timelock::apply_initial_lock(&mut vault, lock_duration_secs, now);

        self.next_id += 1;
        self.owner_index.insert(caller.clone(), id);
        self.vaults.insert(id, vault);
        self.state.total_vaults += 1;

        tracing::info!(vault_id = id, owner = %caller, "vault created");
        self.sink.emit(&VaultEvent::VaultCreated {
            vault_id: id,
            owner: caller.clone(),
            time_lock: lock_duration_secs,
            daily_limit,
        });
        Ok(id)
    }

    /// Deposits `amount` µSTX into the caller's vault. Returns the new
    /// balance.
    ///
    /// Owner-gated: only the vault owner funds a vault. Deposits are
    /// allowed while time-locked — the lock gates outflow, not inflow.
    ///
    /// # Errors
    ///
    /// 100 while shut down or for a non-owner; 101 for an unknown vault;
    /// 107 for a zero amount.
    pub fn deposit_stx(
        &mut self,
        caller: &Principal,
        vault_id: u64,
        amount: u128,
    ) -> Result<u128, VaultError> {
        self.admin.ensure_active(&self.state)?;
        let vault = self
            .vaults
            .get_mut(&vault_id)
            .ok_or(VaultError::VaultNotFound(vault_id))?;
        if caller != &vault.owner {
            return Err(VaultError::NotAuthorized);
        }
        if amount == 0 {
            return Err(VaultError::ZeroAmount);
        }

        // Saturate rather than wrap: µSTX volumes cannot plausibly reach
        // u128::MAX, but a counter that pins there beats one that
        // silently restarts from zero.
        vault.balance = vault.balance.saturating_add(amount);
        let new_balance = vault.balance;
        self.state.total_deposits = self.state.total_deposits.saturating_add(amount);

        tracing::info!(vault_id, amount, new_balance, "deposit");
        self.sink.emit(&VaultEvent::Deposit {
            vault_id,
            amount,
            new_balance,
        });
        Ok(new_balance)
    }

    /// Withdraws `amount` µSTX, authorized solely by a passkey signature
    /// over the canonical withdrawal message at the vault's current
    /// nonce. Returns the remaining balance.
    ///
    /// Signature-gated: any caller may relay this. The signature binds
    /// one exact amount at one exact nonce; on success the nonce
    /// advances and the signature is dead forever.
    ///
    /// # Errors
    ///
    /// 100 while shut down; 101 unknown vault; 107 zero amount; 104
    /// while time-locked; 103 for any signature problem (including
    /// replay and amount mismatch); 102 when the daily cap or the
    /// balance falls short.
    pub fn withdraw_with_passkey(
        &mut self,
        vault_id: u64,
        amount: u128,
        signature: &RawSignature,
    ) -> Result<u128, VaultError> {
        self.admin.ensure_active(&self.state)?;
        let now = self.clock.now();
        let vault = self
            .vaults
            .get_mut(&vault_id)
            .ok_or(VaultError::VaultNotFound(vault_id))?;
        if amount == 0 {
            return Err(VaultError::ZeroAmount);
        }

        // Checks, in the canonical order: lock, signature, daily cap,
        // balance. All against unmodified state.
        timelock::ensure_unlocked(vault, now)?;

        let message_hash = withdrawal_message_hash(vault_id, amount, nonce::current(vault));
        if !signatures::verify(&vault.passkey, &message_hash, signature) {
            return Err(VaultError::InvalidSignature);
        }

        limits::check(vault, amount, now)?;
        if amount > vault.balance {
            return Err(VaultError::InsufficientBalance {
                requested: amount,
                available: vault.balance,
            });
        }

        // Commit. From here on nothing can fail.
        vault.balance -= amount;
        limits::commit(vault, amount, now);
        nonce::advance(vault);
        let remaining_balance = vault.balance;
        let new_nonce = vault.nonce;

        tracing::info!(
            vault_id,
            amount,
            remaining_balance,
            nonce = new_nonce,
            "withdrawal"
        );
        self.sink.emit(&VaultEvent::Withdrawal {
            vault_id,
            amount,
            remaining_balance,
        });
        Ok(remaining_balance)
    }

    /// Rotates the vault's passkey to `new_public_key`, authorized by a
    /// signature from the *current* key over the canonical rotation
    /// message — the outgoing key approves its successor.
    ///
    /// Signature-gated; advances the nonce like any other signed
    /// operation, so a rotation signature is also single-use.
    ///
    /// # Errors
    ///
    /// 100 while shut down; 101 unknown vault; 108 for a malformed
    /// replacement key; 103 for any signature problem.
    pub fn update_passkey(
        &mut self,
        vault_id: u64,
        new_public_key: &[u8],
        signature: &RawSignature,
    ) -> Result<(), VaultError> {
        self.admin.ensure_active(&self.state)?;
        let vault = self
            .vaults
            .get_mut(&vault_id)
            .ok_or(VaultError::VaultNotFound(vault_id))?;
        let new_key = PasskeyPublicKey::from_bytes(new_public_key)?;

        let message_hash = rotation_message_hash(vault_id, &new_key, nonce::current(vault));
        if !signatures::verify(&vault.passkey, &message_hash, signature) {
            return Err(VaultError::InvalidSignature);
        }

        vault.passkey = new_key;
        nonce::advance(vault);

        tracing::info!(vault_id, nonce = vault.nonce, "passkey rotated");
        self.sink.emit(&VaultEvent::PasskeyUpdated { vault_id });
        Ok(())
    }

    /// Sets a new time-lock on the caller's vault. Owner-gated; the
    /// duration must be at least one hour. Returns the absolute unlock
    /// timestamp.
    pub fn set_time_lock(
        &mut self,
        caller: &Principal,
        vault_id: u64,
        duration_secs: u64,
    ) -> Result<u64, VaultError> {
        self.admin.ensure_active(&self.state)?;
        let now = self.clock.now();
        let vault = self
            .vaults
            .get_mut(&vault_id)
            .ok_or(VaultError::VaultNotFound(vault_id))?;
        if caller != &vault.owner {
            return Err(VaultError::NotAuthorized);
        }

        let until = timelock::set(vault, duration_secs, now)?;

        tracing::info!(vault_id, duration_secs, until, "time lock set");
        self.sink.emit(&VaultEvent::TimeLockSet {
            vault_id,
            duration: duration_secs,
            until,
        });
        Ok(until)
    }

    /// Replaces the daily withdrawal cap, effective immediately.
    /// Owner-gated. Does not reset the current accounting window.
    pub fn update_withdrawal_limit(
        &mut self,
        caller: &Principal,
        vault_id: u64,
        new_limit: u128,
    ) -> Result<(), VaultError> {
        self.admin.ensure_active(&self.state)?;
        let vault = self
            .vaults
            .get_mut(&vault_id)
            .ok_or(VaultError::VaultNotFound(vault_id))?;
        if caller != &vault.owner {
            return Err(VaultError::NotAuthorized);
        }

        limits::update_limit(vault, new_limit);

        tracing::info!(vault_id, new_limit, "withdrawal limit updated");
        self.sink.emit(&VaultEvent::WithdrawalLimitUpdated {
            vault_id,
            new_limit,
        });
        Ok(())
    }

    /// Configures the recovery contact and delay. Owner-gated; the
    /// delay must be at least seven days. Clears any pending request.
    pub fn set_recovery_contact(
        &mut self,
        caller: &Principal,
        vault_id: u64,
        contact: Principal,
        delay_secs: u64,
    ) -> Result<(), VaultError> {
        self.admin.ensure_active(&self.state)?;
        let vault = self
            .vaults
            .get_mut(&vault_id)
            .ok_or(VaultError::VaultNotFound(vault_id))?;
        if caller != &vault.owner {
            return Err(VaultError::NotAuthorized);
        }

        recovery::set_contact(vault, contact.clone(), delay_secs)?;

        tracing::info!(vault_id, contact = %contact, delay_secs, "recovery contact set");
        self.sink.emit(&VaultEvent::RecoveryContactSet {
            vault_id,
            contact,
            delay: delay_secs,
        });
        Ok(())
    }

    /// Opens a recovery request, starting the delay clock. Restricted
    /// to the configured recovery contact. Returns the request
    /// timestamp.
    pub fn request_recovery(
        &mut self,
        caller: &Principal,
        vault_id: u64,
    ) -> Result<u64, VaultError> {
        self.admin.ensure_active(&self.state)?;
        let now = self.clock.now();
        let vault = self
            .vaults
            .get_mut(&vault_id)
            .ok_or(VaultError::VaultNotFound(vault_id))?;
        if !recovery::is_contact(vault, caller) {
            return Err(VaultError::NotAuthorized);
        }

        recovery::open_request(vault, now);

        tracing::info!(vault_id, requested_at = now, "recovery requested");
        self.sink.emit(&VaultEvent::RecoveryRequested {
            vault_id,
            requested_at: now,
        });
        Ok(now)
    }

    /// Cancels a pending recovery request. Owner-gated — this is the
    /// owner's defense against a hostile contact.
    pub fn cancel_recovery(
        &mut self,
        caller: &Principal,
        vault_id: u64,
    ) -> Result<(), VaultError> {
        self.admin.ensure_active(&self.state)?;
        let vault = self
            .vaults
            .get_mut(&vault_id)
            .ok_or(VaultError::VaultNotFound(vault_id))?;
        if caller != &vault.owner {
            return Err(VaultError::NotAuthorized);
        }

        recovery::clear_request(vault);

        tracing::info!(vault_id, "recovery cancelled");
        self.sink.emit(&VaultEvent::RecoveryCancelled { vault_id });
        Ok(())
    }

    /// Executes a matured recovery: sweeps the vault's entire balance
    /// to the recovery contact. Restricted to the contact; requires a
    /// request older than the configured delay. Returns the amount paid
    /// out.
    ///
    /// The owner and passkey are untouched — recovery moves funds, not
    /// control. See the recovery module docs for the rationale.
    pub fn emergency_recovery(
        &mut self,
        caller: &Principal,
        vault_id: u64,
    ) -> Result<u128, VaultError> {
        self.admin.ensure_active(&self.state)?;
        let now = self.clock.now();
        let vault = self
            .vaults
            .get_mut(&vault_id)
            .ok_or(VaultError::VaultNotFound(vault_id))?;
        if !recovery::is_contact(vault, caller) {
            return Err(VaultError::NotAuthorized);
        }

        let amount = recovery::execute(vault, now)?;
        self.state.total_recoveries += 1;

        tracing::warn!(vault_id, amount, contact = %caller, "emergency recovery executed");
        self.sink.emit(&VaultEvent::EmergencyRecovery { vault_id, amount });
        Ok(amount)
    }

    /// Flips the protocol-wide emergency shutdown switch. Admin-only.
    /// Returns the new value.
    pub fn emergency_shutdown_toggle(&mut self, caller: &Principal) -> Result<bool, VaultError> {
        let enabled = self.admin.toggle_shutdown(caller, &mut self.state)?;
        tracing::warn!(enabled, "emergency shutdown toggled");
        self.sink.emit(&VaultEvent::EmergencyShutdown { enabled });
        Ok(enabled)
    }

    // -----------------------------------------------------------------
    // Read-only queries — no authorization, no mutation
    // -----------------------------------------------------------------

    /// The full vault record, if it exists.
    pub fn get_vault(&self, vault_id: u64) -> Option<&Vault> {
        self.vaults.get(&vault_id)
    }

    /// The owner's vault record, if they have one.
    pub fn get_vault_by_owner(&self, owner: &Principal) -> Option<&Vault> {
        self.owner_index
            .get(owner)
            .and_then(|id| self.vaults.get(id))
    }

    /// The nonce the next signed message must bind to.
    pub fn get_nonce(&self, vault_id: u64) -> Result<u64, VaultError> {
        self.resolve(vault_id).map(nonce::current)
    }

    /// Whether withdrawals are currently time-locked.
    pub fn is_time_locked(&self, vault_id: u64) -> Result<bool, VaultError> {
        let vault = self.resolve(vault_id)?;
        Ok(timelock::is_locked(vault, self.clock.now()))
    }

    /// Seconds until the time-lock expires; zero when unlocked.
    pub fn get_time_lock_remaining(&self, vault_id: u64) -> Result<u64, VaultError> {
        let vault = self.resolve(vault_id)?;
        Ok(timelock::remaining(vault, self.clock.now()))
    }

    /// How much the vault may still withdraw in the current window.
    pub fn get_daily_withdrawal_available(&self, vault_id: u64) -> Result<u128, VaultError> {
        let vault = self.resolve(vault_id)?;
        Ok(limits::available_today(vault, self.clock.now()))
    }

    /// The substrate's current block timestamp.
    pub fn get_block_timestamp(&self) -> u64 {
        self.clock.now()
    }

    /// Protocol-wide aggregates and the shutdown flag.
    pub fn get_protocol_stats(&self) -> &ProtocolState {
        &self.state
    }

    fn resolve(&self, vault_id: u64) -> Result<&Vault, VaultError> {
        self.vaults
            .get(&vault_id)
            .ok_or(VaultError::VaultNotFound(vault_id))
    }
}
