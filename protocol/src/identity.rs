//! # Caller Identity
//!
//! The vault core never authenticates callers itself — the execution
//! substrate has already done that by the time a call arrives. What the
//! core needs is an opaque, comparable identity value: something to store
//! as a vault owner, index by, and compare against the caller of an
//! owner-gated operation.
//!
//! [`Principal`] is exactly that and nothing more. It deliberately has no
//! notion of address format, key derivation, or checksums; those belong
//! to the substrate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque caller identity, as attested by the execution substrate.
///
/// Equality is the only meaningful operation: the registry checks
/// `caller == vault.owner` (or the admin, or a recovery contact) and
/// never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Wraps a substrate-attested identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The underlying identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Principal {
    fn from(s: String) -> Self {
        Self(s)
    }
}
