//! Board session controller: top-level orchestration for one open board.
//!
//! Owns the canonical action list, the undo/redo counters, and the session
//! identity; wires the transport and persistence collaborators together and
//! exposes the render-ready list plus `emit`/`undo`/`redo` to the UI layer.
//!
//! Concurrency model: single-threaded, event-driven. The host pumps every
//! inbound envelope for the board topic into [`BoardSession::on_message`]
//! in server send order; each handler is one atomic list mutation, so no
//! locking is needed. Local emission is applied synchronously before the
//! publish call returns, so the emitting user always sees their own stroke
//! first. On teardown (`Drop`) the topic subscription is released and no
//! background work continues.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::collections::VecDeque;
use std::time::Duration;

use uuid::Uuid;

use crate::envelope::{
    ActionEnvelope, ActionType, BoardId, InstanceId, board_destination, board_topic,
};
use crate::oplog::{ActionLog, TrackedAction};
use crate::payload::ActionPayload;
use crate::persistence::{Persistence, PersistenceError};
use crate::session::SessionId;
use crate::transport::{Transport, TransportError};
use crate::undo::UndoRedoCounters;

/// Advisory notification for the UI layer. None of these halt the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A local action could not be published; it stays visible as failed and
    /// other participants will not see it.
    PublishFailed {
        /// Id of the affected action.
        instance_id: InstanceId,
    },
    /// A pending action never received its echo and was marked failed.
    ActionTimedOut {
        /// Id of the affected action.
        instance_id: InstanceId,
    },
    /// There is nothing to undo.
    NothingToUndo,
    /// There is nothing to redo.
    NothingToRedo,
    /// The undo request failed; retryable.
    UndoFailed(String),
    /// The redo request failed; retryable.
    RedoFailed(String),
}

/// Synchronization engine for one open board.
///
/// Each open board owns an independent instance; there is no cross-board
/// shared state.
pub struct BoardSession<T: Transport, P: Persistence> {
    board_id: BoardId,
    session_id: SessionId,
    topic: String,
    destination: String,
    transport: T,
    persistence: P,
    log: ActionLog,
    counters: UndoRedoCounters,
    notices: VecDeque<Notice>,
}

impl<T: Transport, P: Persistence> BoardSession<T, P> {
    /// Open a session: generate the session identity and register the one
    /// transport callback for the board's topic.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the topic subscription fails.
    pub fn open(board_id: BoardId, mut transport: T, persistence: P) -> Result<Self, TransportError> {
        let topic = board_topic(board_id);
        transport.subscribe(&topic)?;
        Ok(Self {
            board_id,
            session_id: SessionId::generate(),
            topic,
            destination: board_destination(board_id),
            transport,
            persistence,
            log: ActionLog::new(),
            counters: UndoRedoCounters::new(),
            notices: VecDeque::new(),
        })
    }

    // --- Hydration ---

    /// Fetch durable history and hydrate the canonical list and counters.
    ///
    /// # Errors
    ///
    /// Returns the persistence error; the session stays usable and can be
    /// hydrated again.
    pub fn hydrate(&mut self) -> Result<(), PersistenceError> {
        let history = self.persistence.fetch_actions(self.board_id)?;
        let count = history.len();
        self.log
            .load_history(history.into_iter().map(|e| (e.instance_id, e.payload)));
        self.counters.initialize(count);
        log::debug!("hydrated board {} with {count} actions", self.board_id);
        Ok(())
    }

    /// Full refresh: replace the list and resynchronize the counters, e.g.
    /// after a detected canvas-configuration change or reconnect.
    ///
    /// # Errors
    ///
    /// Returns the persistence error; local state is left untouched on
    /// failure.
    pub fn refresh(&mut self) -> Result<(), PersistenceError> {
        self.hydrate()
    }

    // --- Emission ---

    /// Apply a locally originated action optimistically and publish it.
    ///
    /// The action is appended as `pending` before the publish attempt, so
    /// the local canvas reflects it with zero perceived latency. On publish
    /// failure the entry flips to `failed`, the undo counter is left
    /// untouched, and a [`Notice::PublishFailed`] is queued.
    pub fn emit(&mut self, payload: ActionPayload) -> InstanceId {
        let instance_id = Uuid::new_v4();
        self.log.append_local(instance_id, payload.clone());

        let envelope = ActionEnvelope {
            board_id: self.board_id,
            kind: ActionType::ObjectAdd,
            payload,
            instance_id,
            sender: self.session_id,
        };
        match self.transport.publish(&self.destination, &envelope) {
            Ok(()) => self.counters.local_emit(),
            Err(err) => {
                log::warn!("publish failed for action {instance_id}: {err}");
                self.log.mark_failed(instance_id);
                self.notices.push_back(Notice::PublishFailed { instance_id });
            }
        }
        instance_id
    }

    // --- Inbound routing ---

    /// Route one inbound broadcast envelope.
    ///
    /// Own echoes reconcile the matching optimistic entry; remote actions
    /// append, update, or delete directly as already-confirmed changes.
    pub fn on_message(&mut self, envelope: ActionEnvelope) {
        if envelope.board_id != self.board_id {
            log::debug!("ignoring envelope for foreign board {}", envelope.board_id);
            return;
        }
        if self.session_id.is_echo(&envelope) {
            match envelope.kind {
                ActionType::ObjectAdd | ActionType::ObjectUpdate => {
                    self.log.confirm(envelope.instance_id, envelope.payload);
                }
                // Echo of our own undo delete; already removed locally.
                ActionType::ObjectDelete => {
                    self.log.remove(envelope.instance_id);
                }
            }
        } else {
            match envelope.kind {
                ActionType::ObjectAdd => {
                    self.log.append_remote(envelope.instance_id, envelope.payload);
                }
                ActionType::ObjectUpdate => {
                    self.log.update(envelope.instance_id, envelope.payload);
                }
                ActionType::ObjectDelete => {
                    self.log.remove(envelope.instance_id);
                }
            }
        }
    }

    // --- Undo / redo ---

    /// Request a server-side undo. Counter-gated; counters change only after
    /// the server confirms. Returns `true` if an action was undone.
    pub fn undo(&mut self) -> bool {
        if !self.counters.can_undo() {
            self.notices.push_back(Notice::NothingToUndo);
            return false;
        }
        match self.persistence.undo(self.board_id) {
            Ok(entry) => {
                self.log.remove(entry.instance_id);
                self.counters.undo_applied();
                true
            }
            Err(PersistenceError::NothingToUndo) => {
                // Server is authoritative; the local counter had drifted.
                self.counters.clear_undoable();
                self.notices.push_back(Notice::NothingToUndo);
                false
            }
            Err(err) => {
                log::warn!("undo failed on board {}: {err}", self.board_id);
                self.notices.push_back(Notice::UndoFailed(err.to_string()));
                false
            }
        }
    }

    /// Request a server-side redo. Symmetric to [`BoardSession::undo`].
    pub fn redo(&mut self) -> bool {
        if !self.counters.can_redo() {
            self.notices.push_back(Notice::NothingToRedo);
            return false;
        }
        match self.persistence.redo(self.board_id) {
            Ok(entry) => {
                self.log.confirm(entry.instance_id, entry.payload);
                self.counters.redo_applied();
                true
            }
            Err(PersistenceError::NothingToRedo) => {
                self.counters.clear_redoable();
                self.notices.push_back(Notice::NothingToRedo);
                false
            }
            Err(err) => {
                log::warn!("redo failed on board {}: {err}", self.board_id);
                self.notices.push_back(Notice::RedoFailed(err.to_string()));
                false
            }
        }
    }

    // --- Timeout policy ---

    /// Mark pending actions older than `max_age` as failed and queue a
    /// notice for each. A late echo still resurrects them to confirmed.
    /// Returns the number of expired actions.
    pub fn fail_stale_pending(&mut self, max_age: Duration) -> usize {
        let expired = self.log.fail_stale_pending(max_age);
        for instance_id in &expired {
            log::warn!("action {instance_id} never reconciled; marking failed");
            self.notices.push_back(Notice::ActionTimedOut { instance_id: *instance_id });
        }
        expired.len()
    }

    // --- Queries ---

    /// The render-ready ordered action list.
    #[must_use]
    pub fn actions(&self) -> &[TrackedAction] {
        self.log.actions()
    }

    /// Whether an undo is currently available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.counters.can_undo()
    }

    /// Whether a redo is currently available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.counters.can_redo()
    }

    /// The undo/redo counter pair.
    #[must_use]
    pub fn counters(&self) -> UndoRedoCounters {
        self.counters
    }

    /// This session's identity, attached to every outgoing envelope.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The board this session is attached to.
    #[must_use]
    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Drain queued advisory notices for the UI layer.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}

impl<T: Transport, P: Persistence> Drop for BoardSession<T, P> {
    fn drop(&mut self) {
        self.transport.unsubscribe(&self.topic);
    }
}
