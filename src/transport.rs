//! Transport collaborator: the publish/subscribe seam.
//!
//! The engine does not own connection management. It only requires that a
//! transport can register interest in a board topic, publish one envelope,
//! and deliver inbound envelopes — in server send order — to
//! [`crate::controller::BoardSession::on_message`]. Implementations are
//! expected to queue messages for a topic subscribed before the connection
//! is established and deliver them once ready.

use crate::envelope::ActionEnvelope;

/// Errors surfaced by a transport implementation.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The underlying connection is closed or was never established.
    #[error("transport is not connected")]
    NotConnected,
    /// Registering the topic callback failed.
    #[error("subscribe failed: {0}")]
    Subscribe(String),
    /// The envelope could not be handed to the transport.
    #[error("publish failed: {0}")]
    Publish(String),
}

/// Publish/subscribe message transport for one client connection.
///
/// `publish` is fire-and-forget: an `Err` is treated as a publish failure by
/// the optimistic layer and is never retried automatically.
pub trait Transport {
    /// Register interest in a broadcast topic.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Subscribe`] or
    /// [`TransportError::NotConnected`] if registration fails outright.
    fn subscribe(&mut self, topic: &str) -> Result<(), TransportError>;

    /// Drop interest in a broadcast topic. Infallible by design; a dead
    /// connection has nothing left to unsubscribe.
    fn unsubscribe(&mut self, topic: &str);

    /// Send one envelope to a destination.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Publish`] or
    /// [`TransportError::NotConnected`] when the envelope could not be sent.
    fn publish(&mut self, destination: &str, envelope: &ActionEnvelope) -> Result<(), TransportError>;
}
