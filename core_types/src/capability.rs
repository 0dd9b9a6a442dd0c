//! Root capabilities
//!
//! A root capability is the only authority a caller holds over a storage
//! subtree. It is issued once by a capability store (after a user consent
//! flow) and is consumed here as an opaque token.
//!
//! ## Example
//!
//! ```
//! use core_types::RootCapability;
//!
//! let root = RootCapability::from_token("content://tree/primary%3AGames");
//! assert_eq!(root.token(), "content://tree/primary%3AGames");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An opaque, previously granted reference to a storage subtree
///
/// The token is meaningful only to the capability store that issued it
/// and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootCapability {
    token: String,
}

impl RootCapability {
    /// Wraps a token issued by a capability store
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the token
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for RootCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Root({})", self.token)
    }
}

/// Errors raised when a root capability cannot be turned into a node
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapabilityError {
    /// The store never issued this token
    #[error("Unknown capability: {0}")]
    Unknown(String),

    /// The token was issued but has since been revoked
    #[error("Capability has been revoked: {0}")]
    Revoked(String),

    /// The token is valid but the subtree behind it is gone
    #[error("Capability target is unavailable: {0}")]
    TargetUnavailable(String),
}
