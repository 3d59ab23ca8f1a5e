//! Play Queue - the queue engine behind a music player's "now playing" grid.
//!
//! Keeps an ordered queue with a current/previous pointer, resolves
//! drag-and-drop reorders, tells the grid which rows to redraw and merges
//! column changes back into the persisted table layout. Audio playback and
//! rendering stay outside; they are reached through [`backend::PlaybackBackend`]
//! and [`grid::GridView`].

pub mod backend;
pub mod cli;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod grid;
pub mod layout;
pub mod model;
pub mod queue;
#[cfg(test)]
pub mod test_utils;

pub use controller::QueueView;
pub use error::{Error, QueueError, Result};
pub use queue::{ActiveItemTracker, PlayQueue, QueueStore, TargetPolicy};
