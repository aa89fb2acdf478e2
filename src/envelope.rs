//! Wire envelope and JSON codec for the realtime action stream.
//!
//! The envelope is the transport unit: routing metadata plus one
//! [`ActionPayload`]. The payload travels without an instance id of its own;
//! the id on the envelope is the sole correlation key between a locally
//! optimistic action and its server echo.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::payload::ActionPayload;
use crate::session::SessionId;

/// Unique identifier for one drawing action, assigned client-side at creation.
pub type InstanceId = Uuid;

/// Unique identifier for a board.
pub type BoardId = Uuid;

/// What an envelope does to the canonical action list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// Append a new action.
    ObjectAdd,
    /// Replace the payload of an existing action.
    ObjectUpdate,
    /// Remove an action (undo propagation).
    ObjectDelete,
}

/// One message on the board's broadcast topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEnvelope {
    /// Board this action belongs to.
    pub board_id: BoardId,
    /// Operation kind.
    #[serde(rename = "type")]
    pub kind: ActionType,
    /// Tool-specific geometry and style.
    pub payload: ActionPayload,
    /// Correlation key, unique across the board session's lifetime.
    pub instance_id: InstanceId,
    /// Session identity of the emitting client.
    pub sender: SessionId,
}

/// Error returned by the envelope codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text could not be read or written as an envelope.
    #[error("malformed action envelope: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode an envelope as a JSON string for the transport.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_envelope(envelope: &ActionEnvelope) -> Result<String, CodecError> {
    Ok(serde_json::to_string(envelope)?)
}

/// Decode a JSON string from the transport into an envelope.
///
/// Unrecognized `tool` discriminants decode to [`ActionPayload::Unknown`]
/// rather than failing, so newer peers never break older clients.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed text.
pub fn decode_envelope(text: &str) -> Result<ActionEnvelope, CodecError> {
    Ok(serde_json::from_str(text)?)
}

/// Broadcast topic for a board's action stream.
#[must_use]
pub fn board_topic(board_id: BoardId) -> String {
    format!("/topic/board/{board_id}")
}

/// Publish destination for a board's outgoing actions.
#[must_use]
pub fn board_destination(board_id: BoardId) -> String {
    format!("/app/board/{board_id}")
}
