//! Playback backend boundary.
//!
//! The engine never plays audio. After the queue changes it hands the new
//! order to a [`PlaybackBackend`], which in the application is the audio
//! player process. [`ChannelBackend`] forwards the updates as
//! [`PlayerCommand`]s over a crossbeam channel to whatever thread owns the
//! player.

use crossbeam_channel::{Receiver, Sender, bounded};

use crate::model::{QueueEntry, SongRef};
use crate::queue::QueueStore;

/// Full queue handed to the backend when playback (re)starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerData {
    /// Songs in playback order
    pub queue: Vec<SongRef>,
    /// Index of the song to play
    pub position: Option<usize>,
}

impl PlayerData {
    /// Snapshot a store.
    pub fn from_store<S: QueueStore + ?Sized>(store: &S) -> Self {
        Self {
            queue: store.entries().iter().map(|e| e.song.clone()).collect(),
            position: store.current_id().and_then(|id| store.position_of(id)),
        }
    }

    /// Get the song at the play position.
    pub fn current(&self) -> Option<&SongRef> {
        self.position.and_then(|i| self.queue.get(i))
    }
}

/// Songs of a slice of entries.
pub fn songs_of(entries: &[QueueEntry]) -> Vec<SongRef> {
    entries.iter().map(|e| e.song.clone()).collect()
}

/// Receiver of queue updates.
pub trait PlaybackBackend: Send + Sync {
    /// Replace the whole queue and start at `data.position`.
    fn set_queue(&self, data: &PlayerData) -> Result<(), PlayerError>;

    /// Replace only what plays after the current song.
    fn set_queue_next(&self, upcoming: &[SongRef]) -> Result<(), PlayerError>;
}

/// Commands sent to the player thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Load a new queue and play from its position
    SetQueue(PlayerData),
    /// Swap the songs after the current one
    SetQueueNext(Vec<SongRef>),
}

/// Backend that forwards updates over a channel.
#[derive(Debug, Clone)]
pub struct ChannelBackend {
    command_tx: Sender<PlayerCommand>,
}

impl ChannelBackend {
    /// Create a backend and the receiving end for the player thread.
    pub fn new() -> (Self, Receiver<PlayerCommand>) {
        let (command_tx, command_rx) = bounded(32);
        (Self { command_tx }, command_rx)
    }
}

impl PlaybackBackend for ChannelBackend {
    fn set_queue(&self, data: &PlayerData) -> Result<(), PlayerError> {
        tracing::debug!(len = data.queue.len(), position = ?data.position, "Sending queue");
        self.command_tx
            .send(PlayerCommand::SetQueue(data.clone()))
            .map_err(|_| PlayerError::ChannelClosed)
    }

    fn set_queue_next(&self, upcoming: &[SongRef]) -> Result<(), PlayerError> {
        tracing::debug!(len = upcoming.len(), "Sending upcoming songs");
        self.command_tx
            .send(PlayerCommand::SetQueueNext(upcoming.to_vec()))
            .map_err(|_| PlayerError::ChannelClosed)
    }
}

/// Player errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    #[error("Playback channel closed")]
    ChannelClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::PlayQueue;
    use crate::test_utils::{abc_queue, mock_song};

    #[test]
    fn test_player_data_from_store() {
        let (mut queue, ids) = abc_queue();
        assert_eq!(PlayerData::from_store(&queue).position, None);

        queue.set_current(&ids[1]).unwrap();
        let data = PlayerData::from_store(&queue);
        assert_eq!(data.queue.len(), 3);
        assert_eq!(data.position, Some(1));
        assert_eq!(data.current().unwrap().title, "b");
    }

    #[test]
    fn test_channel_backend_forwards_commands() {
        let (backend, rx) = ChannelBackend::new();
        let queue = PlayQueue::with_songs([mock_song("a")]);

        backend.set_queue(&PlayerData::from_store(&queue)).unwrap();
        backend.set_queue_next(&[mock_song("b")]).unwrap();

        assert!(matches!(rx.try_recv(), Ok(PlayerCommand::SetQueue(d)) if d.queue.len() == 1));
        assert_eq!(
            rx.try_recv().unwrap(),
            PlayerCommand::SetQueueNext(vec![mock_song("b")])
        );
    }

    #[test]
    fn test_channel_backend_closed() {
        let (backend, rx) = ChannelBackend::new();
        drop(rx);
        assert_eq!(backend.set_queue_next(&[]), Err(PlayerError::ChannelClosed));
    }
}
