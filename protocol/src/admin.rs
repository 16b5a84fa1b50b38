//! # Protocol Administration
//!
//! The process-wide singleton state and the one privileged identity that
//! may touch it. Deliberately tiny: the admin can flip the emergency
//! shutdown switch, and that is the entire extent of administrative
//! power. No fund access, no vault overrides, no parameter tuning — a
//! compromised admin key can freeze the protocol but cannot steal from
//! it.
//!
//! `ProtocolState` is an explicit struct passed by reference into every
//! handler, not a `static` or a lazy singleton. Explicit plumbing keeps
//! genesis, tests, and the shutdown gate all honest about who reads and
//! writes this state.

use serde::{Deserialize, Serialize};

use crate::error::VaultError;
use crate::identity::Principal;

/// Aggregate protocol state, created once at genesis and alive for the
/// system's entire lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolState {
    /// Number of vaults ever created.
    #[serde(rename = "total-vaults")]
    pub total_vaults: u64,

    /// Cumulative sum of every deposit, in µSTX. Never decreases — this
    /// is lifetime volume, not value locked.
    #[serde(rename = "total-deposits")]
    pub total_deposits: u128,

    /// Number of emergency recoveries ever executed.
    #[serde(rename = "total-recoveries")]
    pub total_recoveries: u64,

    /// While true, every value-moving operation is refused.
    #[serde(rename = "emergency-shutdown")]
    pub emergency_shutdown: bool,
}

impl ProtocolState {
    /// The genesis state: all counters zero, shutdown off.
    pub fn genesis() -> Self {
        Self {
            total_vaults: 0,
            total_deposits: 0,
            total_recoveries: 0,
            emergency_shutdown: false,
        }
    }
}

impl Default for ProtocolState {
    fn default() -> Self {
        Self::genesis()
    }
}

/// The designated administrator identity, fixed at genesis.
#[derive(Debug, Clone)]
pub struct ProtocolAdmin {
    admin: Principal,
}

impl ProtocolAdmin {
    /// Binds the admin identity. There is exactly one, forever — admin
    /// rotation would need a redeploy, which is the point.
    pub fn new(admin: Principal) -> Self {
        Self { admin }
    }

    /// The administrator identity.
    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    /// Flips the emergency shutdown switch. Returns the new value.
    ///
    /// # Errors
    ///
    /// [`VaultError::NotAuthorized`] (100) for any caller but the admin.
    pub fn toggle_shutdown(
        &self,
        caller: &Principal,
        state: &mut ProtocolState,
    ) -> Result<bool, VaultError> {
        if caller != &self.admin {
            return Err(VaultError::NotAuthorized);
        }
        state.emergency_shutdown = !state.emergency_shutdown;
        Ok(state.emergency_shutdown)
    }

    /// Gate consulted before every mutating vault operation.
    ///
    /// # Errors
    ///
    /// [`VaultError::NotAuthorized`] (100) while shut down — same code
    /// as an ordinary authorization failure, matching the deployed ABI.
    pub fn ensure_active(&self, state: &ProtocolState) -> Result<(), VaultError> {
        if state.emergency_shutdown {
            return Err(VaultError::NotAuthorized);
        }
        Ok(())
    }
}
