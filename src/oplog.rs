//! Canonical action list and the optimistic reconciliation state machine.
//!
//! The log owns the ordered, render-ready list of actions for one board
//! session. Entries enter it four ways: hydration from durable history,
//! local optimistic append (status `pending`), remote append (already
//! confirmed), and re-insertion during reconciliation of an echo that lost
//! its pending entry. Arrival order is preserved; entries are never
//! reordered after insertion — the server serializes the authoritative
//! stream and this client trusts it.
//!
//! Status transitions per local action: `pending → confirmed` on echo,
//! `pending → failed` on publish error or expiry. A late echo for a
//! `failed` entry resurrects it to `confirmed`, since the server is
//! authoritative.

#[cfg(test)]
#[path = "oplog_test.rs"]
mod oplog_test;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::envelope::InstanceId;
use crate::payload::ActionPayload;

/// Per-action lifecycle tag, used only for visual feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Applied locally, publish attempted, echo not yet received.
    Pending,
    /// Publish in flight (reserved for transports that report staging).
    Sending,
    /// Acknowledged by the server broadcast.
    Confirmed,
    /// Publish failed or the echo never arrived.
    Failed,
}

/// One entry of the canonical action list.
///
/// Entries hydrated from durable history carry no status; the renderer
/// treats an absent status as confirmed.
#[derive(Debug, Clone)]
pub struct TrackedAction {
    /// Correlation key shared with the wire envelope.
    pub instance_id: InstanceId,
    /// The drawable payload.
    pub payload: ActionPayload,
    /// Transaction status for entries touched this session.
    pub status: Option<TransactionStatus>,
    /// When the local optimistic append happened, for expiry sweeps.
    emitted_at: Option<Instant>,
}

impl TrackedAction {
    /// The status the renderer should act on; absent means confirmed.
    #[must_use]
    pub fn effective_status(&self) -> TransactionStatus {
        self.status.unwrap_or(TransactionStatus::Confirmed)
    }
}

/// Ordered action list with an id index for reconciliation.
#[derive(Debug, Default)]
pub struct ActionLog {
    entries: Vec<TrackedAction>,
    index: HashMap<InstanceId, usize>,
}

impl ActionLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The render-ready action list in arrival order.
    #[must_use]
    pub fn actions(&self) -> &[TrackedAction] {
        &self.entries
    }

    /// Look up one entry by instance id.
    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&TrackedAction> {
        self.index.get(&id).map(|&pos| &self.entries[pos])
    }

    /// Number of entries in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace all entries with server-confirmed history, in order.
    ///
    /// Hydrated entries carry no status. Used both for initial hydration and
    /// for a full refresh after a detected configuration change.
    pub fn load_history(&mut self, history: impl IntoIterator<Item = (InstanceId, ActionPayload)>) {
        self.entries.clear();
        self.index.clear();
        for (instance_id, payload) in history {
            self.push(TrackedAction { instance_id, payload, status: None, emitted_at: None });
        }
    }

    /// Append a locally emitted action as `pending`.
    pub fn append_local(&mut self, instance_id: InstanceId, payload: ActionPayload) {
        self.push(TrackedAction {
            instance_id,
            payload,
            status: Some(TransactionStatus::Pending),
            emitted_at: Some(Instant::now()),
        });
    }

    /// Append a remote-originated action as confirmed.
    pub fn append_remote(&mut self, instance_id: InstanceId, payload: ActionPayload) {
        self.push(TrackedAction {
            instance_id,
            payload,
            status: Some(TransactionStatus::Confirmed),
            emitted_at: None,
        });
    }

    /// Reconcile the echo of a local action: flip the matching entry to
    /// confirmed. Idempotent; if no entry matches (reconnection replay, or
    /// the entry expired and was pruned), the payload is inserted as a new
    /// confirmed entry instead. A `failed` entry is resurrected.
    pub fn confirm(&mut self, instance_id: InstanceId, payload: ActionPayload) {
        if let Some(&pos) = self.index.get(&instance_id) {
            let entry = &mut self.entries[pos];
            entry.status = Some(TransactionStatus::Confirmed);
            entry.emitted_at = None;
        } else {
            self.append_remote(instance_id, payload);
        }
    }

    /// Mark a local entry as failed after a publish error. Unknown ids are a
    /// silent no-op.
    pub fn mark_failed(&mut self, instance_id: InstanceId) {
        if let Some(&pos) = self.index.get(&instance_id) {
            self.entries[pos].status = Some(TransactionStatus::Failed);
        }
    }

    /// Replace the payload of an existing entry, keeping its position and
    /// status. Unknown ids are a silent no-op.
    pub fn update(&mut self, instance_id: InstanceId, payload: ActionPayload) {
        if let Some(&pos) = self.index.get(&instance_id) {
            self.entries[pos].payload = payload;
        }
    }

    /// Remove the entry with the given id, returning it if present. A delete
    /// for an unknown id is a silent no-op.
    pub fn remove(&mut self, instance_id: InstanceId) -> Option<TrackedAction> {
        let pos = self.index.remove(&instance_id)?;
        let removed = self.entries.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Flip `pending`/`sending` entries older than `max_age` to `failed`,
    /// returning the affected ids. This is the timeout policy for echoes
    /// that never arrive; a late echo still resurrects the entry.
    pub fn fail_stale_pending(&mut self, max_age: Duration) -> Vec<InstanceId> {
        let mut expired = Vec::new();
        for entry in &mut self.entries {
            let in_flight = matches!(
                entry.status,
                Some(TransactionStatus::Pending | TransactionStatus::Sending)
            );
            if in_flight && entry.emitted_at.is_some_and(|at| at.elapsed() >= max_age) {
                entry.status = Some(TransactionStatus::Failed);
                expired.push(entry.instance_id);
            }
        }
        expired
    }

    fn push(&mut self, entry: TrackedAction) {
        // Duplicate ids never arrive from a well-behaved server; replace in
        // place to keep the list/index consistent if one does.
        if let Some(&pos) = self.index.get(&entry.instance_id) {
            self.entries[pos] = entry;
            return;
        }
        self.index.insert(entry.instance_id, self.entries.len());
        self.entries.push(entry);
    }
}
