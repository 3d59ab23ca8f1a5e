//! Play queue storage with current/previous tracking.

use std::collections::HashMap;

use crate::error::QueueError;
use crate::model::{QueueEntry, SongRef, UniqueId};

/// Read/write access to an ordered play queue.
///
/// Components receive a store explicitly instead of reaching into shared
/// state, so tests can hand in any implementation.
pub trait QueueStore {
    /// All entries in playback order.
    fn entries(&self) -> &[QueueEntry];

    /// Replace the ordering of the queue.
    ///
    /// `new_order` must contain every queued id exactly once. On error the
    /// queue is left untouched.
    fn set_order(&mut self, new_order: &[UniqueId]) -> Result<(), QueueError>;

    /// Make `id` the current entry and return it.
    ///
    /// The old current id becomes the previous id, unless `id` is already
    /// current, in which case nothing changes.
    fn set_current(&mut self, id: &UniqueId) -> Result<QueueEntry, QueueError>;

    /// Id of the entry being played.
    fn current_id(&self) -> Option<&UniqueId>;

    /// Id of the entry that was current before the last change.
    fn previous_id(&self) -> Option<&UniqueId>;

    /// Position of an entry in playback order.
    fn position_of(&self, id: &UniqueId) -> Option<usize> {
        self.entries().iter().position(|e| e.unique_id == *id)
    }

    /// Look up an entry by id.
    fn get(&self, id: &UniqueId) -> Option<&QueueEntry> {
        self.entries().iter().find(|e| e.unique_id == *id)
    }

    /// Get current entry.
    fn current(&self) -> Option<&QueueEntry> {
        self.current_id().and_then(|id| self.get(id))
    }

    /// Get previous entry, if it is still queued.
    fn previous(&self) -> Option<&QueueEntry> {
        self.previous_id().and_then(|id| self.get(id))
    }

    /// Ids in playback order.
    fn ids(&self) -> Vec<UniqueId> {
        self.entries().iter().map(|e| e.unique_id).collect()
    }

    /// Entries after the current one (everything when nothing is current).
    fn upcoming(&self) -> &[QueueEntry] {
        let entries = self.entries();
        match self.current_id().and_then(|id| self.position_of(id)) {
            Some(pos) => &entries[pos + 1..],
            None => entries,
        }
    }
}

/// In-memory play queue.
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    /// All entries in playback order
    entries: Vec<QueueEntry>,
    current: Option<UniqueId>,
    previous: Option<UniqueId>,
    /// Next id to hand out; only ever grows
    next_id: u64,
}

impl PlayQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Create a queue holding `songs` in order.
    pub fn with_songs(songs: impl IntoIterator<Item = SongRef>) -> Self {
        let mut queue = Self::new();
        queue.extend(songs);
        queue
    }

    /// Check if queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get queue length.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn allocate_id(&mut self) -> UniqueId {
        // Default-constructed queues start at 0; skip it so ids are always >= 1.
        self.next_id = self.next_id.max(1);
        let id = UniqueId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a song to the end of the queue.
    pub fn add(&mut self, song: SongRef) -> UniqueId {
        let unique_id = self.allocate_id();
        tracing::debug!(id = %unique_id, title = %song.title, "Queued");
        self.entries.push(QueueEntry { unique_id, song });
        unique_id
    }

    /// Add songs to the end of the queue, returning their ids.
    pub fn extend(&mut self, songs: impl IntoIterator<Item = SongRef>) -> Vec<UniqueId> {
        songs.into_iter().map(|song| self.add(song)).collect()
    }

    /// Add a song right after the current entry (at the front when idle).
    pub fn add_next(&mut self, song: SongRef) -> UniqueId {
        let insert_pos = self
            .current
            .and_then(|id| self.position_of(&id))
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let unique_id = self.allocate_id();
        tracing::debug!(id = %unique_id, position = insert_pos, "Queued next");
        self.entries.insert(insert_pos, QueueEntry { unique_id, song });
        unique_id
    }

    /// Remove an entry.
    ///
    /// Removing the current entry clears the current pointer; removing the
    /// previous entry clears the previous pointer.
    pub fn remove(&mut self, id: &UniqueId) -> Option<QueueEntry> {
        let pos = self.position_of(id)?;
        let entry = self.entries.remove(pos);
        if self.current == Some(*id) {
            tracing::debug!(id = %id, "Removed current entry");
            self.current = None;
        }
        if self.previous == Some(*id) {
            self.previous = None;
        }
        Some(entry)
    }

    /// Clear the queue. Ids handed out so far are not reused.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
        self.previous = None;
    }
}

impl QueueStore for PlayQueue {
    fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    fn set_order(&mut self, new_order: &[UniqueId]) -> Result<(), QueueError> {
        if new_order.len() != self.entries.len() {
            return Err(QueueError::OrderMismatch {
                expected: self.entries.len(),
                actual: new_order.len(),
            });
        }

        let index: HashMap<UniqueId, usize> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.unique_id, i))
            .collect();

        // Validate everything before touching the entries
        let mut seen = vec![false; self.entries.len()];
        let mut positions = Vec::with_capacity(new_order.len());
        for id in new_order {
            let &pos = index.get(id).ok_or(QueueError::UnknownId(*id))?;
            if std::mem::replace(&mut seen[pos], true) {
                return Err(QueueError::DuplicateId(*id));
            }
            positions.push(pos);
        }

        let mut old: Vec<Option<QueueEntry>> = self.entries.drain(..).map(Some).collect();
        self.entries = positions
            .into_iter()
            .filter_map(|pos| old[pos].take())
            .collect();

        tracing::debug!(len = self.entries.len(), "Queue reordered");
        Ok(())
    }

    fn set_current(&mut self, id: &UniqueId) -> Result<QueueEntry, QueueError> {
        let entry = self.get(id).cloned().ok_or(QueueError::UnknownId(*id))?;
        if self.current != Some(*id) {
            self.previous = self.current.replace(*id);
            tracing::debug!(
                current = %id,
                previous = ?self.previous.map(|p| p.0),
                "Current entry changed"
            );
        }
        Ok(entry)
    }

    fn current_id(&self) -> Option<&UniqueId> {
        self.current.as_ref()
    }

    fn previous_id(&self) -> Option<&UniqueId> {
        self.previous.as_ref()
    }
}
