//! Diagnostics Snapshot
//!
//! Environment-derived values exposed to operators. Built per request,
//! never stored.

use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct DiagnosticsSnapshot {
    /// Value of the configured variable; empty when unset
    pub secret: String,
}

impl fmt::Debug for DiagnosticsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticsSnapshot")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
