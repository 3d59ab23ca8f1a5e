//! Test utilities and fixtures for play-queue tests.
//!
//! Provides song/queue factories and a [`QueueView`] wired to
//! channel-backed grid and playback collaborators, so tests can assert on
//! the commands a view sends.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{abc_queue, titles};
//!
//! let (mut queue, ids) = abc_queue();
//! queue.set_order(&[ids[2], ids[1], ids[0]])?;
//! assert_eq!(titles(&queue), ["c", "b", "a"]);
//! ```

use crossbeam_channel::Receiver;
use std::sync::Arc;

use crate::backend::{ChannelBackend, PlayerCommand};
use crate::config::{Config, SharedConfig};
use crate::controller::QueueView;
use crate::debounce::RedrawDebouncer;
use crate::grid::{ChannelGrid, GridCommand};
use crate::model::{SongRef, TableType, UniqueId};
use crate::queue::{PlayQueue, QueueStore};

/// Creates a mock song whose id and title are both `title`.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let song = SongRef { artist: Some("Artist".into()), ..mock_song("a") };
/// ```
pub fn mock_song(title: &str) -> SongRef {
    SongRef {
        id: format!("song-{title}"),
        title: title.to_string(),
        artist: Some("Test Artist".to_string()),
        album: Some("Test Album".to_string()),
        duration: Some(180),
        path: None,
    }
}

/// Queue of songs with the given titles, plus their ids in order.
pub fn queue_of(names: &[&str]) -> (PlayQueue, Vec<UniqueId>) {
    let mut queue = PlayQueue::new();
    let ids = queue.extend(names.iter().map(|n| mock_song(n)));
    (queue, ids)
}

/// Queue `[a, b, c]`.
pub fn abc_queue() -> (PlayQueue, Vec<UniqueId>) {
    queue_of(&["a", "b", "c"])
}

/// Queue `[a, b, c, d, e]`.
pub fn abcde_queue() -> (PlayQueue, Vec<UniqueId>) {
    queue_of(&["a", "b", "c", "d", "e"])
}

/// Titles in playback order.
pub fn titles<S: QueueStore + ?Sized>(store: &S) -> Vec<String> {
    store.entries().iter().map(|e| e.song.title.clone()).collect()
}

/// A view plus the receiving ends of its collaborators.
pub struct TestView {
    pub view: QueueView<PlayQueue>,
    pub grid_rx: Receiver<GridCommand>,
    pub player_rx: Receiver<PlayerCommand>,
    pub settings: SharedConfig,
}

/// Builds a [`TestView`]. Must be called inside a tokio runtime.
pub fn test_view(queue: PlayQueue, table: TableType, config: Config) -> TestView {
    let (grid, grid_rx) = ChannelGrid::new();
    let (backend, player_rx) = ChannelBackend::new();
    let delay = config.queue.redraw_delay();
    let settings = config.shared();
    let redraw = RedrawDebouncer::on_current_runtime(delay)
        .expect("test views need a tokio runtime");

    TestView {
        view: QueueView::new(
            queue,
            table,
            Arc::new(grid),
            Arc::new(backend),
            Arc::clone(&settings),
            redraw,
        ),
        grid_rx,
        player_rx,
        settings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_song_defaults() {
        let song = mock_song("a");
        assert_eq!(song.id, "song-a");
        assert_eq!(song.title, "a");
        assert_eq!(song.display_artist(), "Test Artist");
    }

    #[test]
    fn test_queue_of() {
        let (queue, ids) = queue_of(&["x", "y"]);
        assert_eq!(ids.len(), 2);
        assert_eq!(titles(&queue), ["x", "y"]);
        assert_eq!(queue.position_of(&ids[1]), Some(1));
    }

    #[tokio::test]
    async fn test_view_starts_idle() {
        let (queue, _) = abc_queue();
        let t = test_view(queue, TableType::SideQueue, Config::default());
        assert_eq!(t.view.table(), TableType::SideQueue);
        assert!(!t.view.redraw_pending());
        assert!(t.grid_rx.try_recv().is_err());
        assert!(t.player_rx.try_recv().is_err());
    }
}
