//! Grid view boundary.
//!
//! The grid that renders the queue is an opaque surface: the engine only
//! tells it which rows to redraw, which row to scroll to and when to refit
//! its columns. [`ChannelGrid`] forwards those requests as [`GridCommand`]s
//! to the UI thread.

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};

use crate::model::UniqueId;

/// Operations the engine needs from the grid.
pub trait GridView: Send + Sync {
    /// Redraw specific rows.
    fn redraw_rows(&self, ids: &[UniqueId]);

    /// Redraw every row.
    fn redraw_all(&self);

    /// Scroll a row into the middle of the viewport.
    fn ensure_visible(&self, id: &UniqueId);

    /// Fit column widths to the grid width.
    fn size_columns_to_fit(&self);

    /// Recompute row heights after the configured height changed.
    fn reset_row_heights(&self);
}

/// Requests sent to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCommand {
    RedrawRows(Vec<UniqueId>),
    RedrawAll,
    EnsureVisible(UniqueId),
    SizeColumnsToFit,
    ResetRowHeights,
}

/// Grid that forwards requests over a channel.
///
/// Requests are fire-and-forget; when the UI is gone or behind they are
/// dropped with a warning.
#[derive(Debug, Clone)]
pub struct ChannelGrid {
    tx: Sender<GridCommand>,
}

impl ChannelGrid {
    pub fn new() -> (Self, Receiver<GridCommand>) {
        let (tx, rx) = bounded(64);
        (Self { tx }, rx)
    }

    fn send(&self, command: GridCommand) {
        match self.tx.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(cmd)) => {
                tracing::warn!(command = ?cmd, "Grid command queue full, dropping");
            }
            Err(TrySendError::Disconnected(cmd)) => {
                tracing::warn!(command = ?cmd, "Grid is gone, dropping");
            }
        }
    }
}

impl GridView for ChannelGrid {
    fn redraw_rows(&self, ids: &[UniqueId]) {
        if !ids.is_empty() {
            self.send(GridCommand::RedrawRows(ids.to_vec()));
        }
    }

    fn redraw_all(&self) {
        self.send(GridCommand::RedrawAll);
    }

    fn ensure_visible(&self, id: &UniqueId) {
        self.send(GridCommand::EnsureVisible(*id));
    }

    fn size_columns_to_fit(&self) {
        self.send(GridCommand::SizeColumnsToFit);
    }

    fn reset_row_heights(&self) {
        self.send(GridCommand::ResetRowHeights);
    }
}
