//! Session identity: distinguishing "my echo" from "someone else's action".
//!
//! Each board session generates one random identifier at start and attaches
//! it as `sender` to every outgoing envelope. Inbound broadcasts carrying
//! the same identifier are echoes of local actions and must be reconciled
//! rather than appended.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::envelope::ActionEnvelope;

/// Per-load random identifier for one board session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random session identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Whether an inbound envelope is the broadcast echo of an action this
    /// session emitted.
    #[must_use]
    pub fn is_echo(&self, envelope: &ActionEnvelope) -> bool {
        envelope.sender == *self
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
