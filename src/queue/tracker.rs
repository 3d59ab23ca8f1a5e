//! Current-entry tracking.
//!
//! The tracker is the only writer of the current/previous pointers. Every
//! change reports which rows lose or gain the "now playing" marker so the
//! grid can redraw exactly those.

use smallvec::SmallVec;

use super::store::QueueStore;
use crate::error::QueueError;
use crate::model::{QueueEntry, UniqueId};

/// Rows to redraw after the current entry changed (at most two).
pub type RedrawSet = SmallVec<[UniqueId; 2]>;

/// Outcome of a current-entry change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentChange {
    /// The entry now playing
    pub entry: QueueEntry,
    /// The entry to scroll into view (always the new current entry)
    pub visible: UniqueId,
    /// Rows whose "now playing" marker changed
    pub redraw: RedrawSet,
}

/// Rows that must be redrawn when the current entry moves from `previous`
/// to `current`.
pub fn redraw_set(previous: Option<&UniqueId>, current: Option<&UniqueId>) -> RedrawSet {
    let mut set = RedrawSet::new();
    set.extend(previous.copied());
    if let Some(id) = current {
        if !set.contains(id) {
            set.push(*id);
        }
    }
    set
}

/// Moves the current pointer of a [`QueueStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveItemTracker;

impl ActiveItemTracker {
    /// Make `id` the current entry.
    pub fn mark_current<S: QueueStore + ?Sized>(
        &self,
        store: &mut S,
        id: &UniqueId,
    ) -> Result<CurrentChange, QueueError> {
        let before = store.current_id().copied();
        let entry = store.set_current(id)?;
        // Re-marking the current entry changes nothing on screen
        let redraw = if before == Some(*id) {
            RedrawSet::new()
        } else {
            redraw_set(before.as_ref(), Some(id))
        };
        tracing::debug!(current = %id, redraw = redraw.len(), "Marked current");
        Ok(CurrentChange {
            visible: entry.unique_id,
            entry,
            redraw,
        })
    }

    /// Advance to the entry after the current one.
    ///
    /// Starts at the first entry when nothing is current. Returns `None` at
    /// the end of the queue.
    pub fn step_forward<S: QueueStore + ?Sized>(&self, store: &mut S) -> Option<CurrentChange> {
        let next = match store.current_id().and_then(|id| store.position_of(id)) {
            Some(pos) => store.entries().get(pos + 1),
            None => store.entries().first(),
        }
        .map(|e| e.unique_id)?;
        self.mark_current(store, &next).ok()
    }

    /// Go back to the entry before the current one.
    ///
    /// Returns `None` at the start of the queue or when nothing is current.
    pub fn step_back<S: QueueStore + ?Sized>(&self, store: &mut S) -> Option<CurrentChange> {
        let pos = store.current_id().and_then(|id| store.position_of(id))?;
        let prev = store.entries().get(pos.checked_sub(1)?)?.unique_id;
        self.mark_current(store, &prev).ok()
    }
}
