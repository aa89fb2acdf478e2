//! Persistence collaborator: durable history and server-side undo/redo.
//!
//! The authoritative action log and undo stack live server-side. This seam
//! exposes the three calls the engine needs: a bulk ordered history fetch
//! for hydration, and point undo/redo calls that return the affected action
//! so its effect can be mirrored locally. "Nothing to undo/redo" is an
//! expected empty-state answer, distinguishable from a transport failure.

use serde::{Deserialize, Serialize};

use crate::envelope::{BoardId, InstanceId};
use crate::payload::ActionPayload;

/// One durable action as returned by the history and undo/redo endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Correlation key of the action.
    pub instance_id: InstanceId,
    /// The drawable payload.
    pub payload: ActionPayload,
}

/// Errors surfaced by the persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The server-side undo stack is empty. Expected empty state, not a failure.
    #[error("nothing to undo")]
    NothingToUndo,
    /// The server-side redo stack is empty. Expected empty state, not a failure.
    #[error("nothing to redo")]
    NothingToRedo,
    /// The request failed for network or server reasons; retryable.
    #[error("persistence request failed: {0}")]
    Request(String),
}

/// Durable store access for one board.
pub trait Persistence {
    /// Fetch the full ordered action history for hydration.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Request`] on network or server failure.
    fn fetch_actions(&mut self, board_id: BoardId) -> Result<Vec<HistoryEntry>, PersistenceError>;

    /// Undo the most recent action, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NothingToUndo`] when the stack is empty,
    /// [`PersistenceError::Request`] on failure.
    fn undo(&mut self, board_id: BoardId) -> Result<HistoryEntry, PersistenceError>;

    /// Redo the most recently undone action, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NothingToRedo`] when the stack is empty,
    /// [`PersistenceError::Request`] on failure.
    fn redo(&mut self, board_id: BoardId) -> Result<HistoryEntry, PersistenceError>;
}
