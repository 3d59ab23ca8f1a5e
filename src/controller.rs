//! Queue view event handling.
//!
//! # Control Flow
//!
//! Every gesture on a queue grid flows through a [`QueueView`] method:
//!
//! - double-click → [`QueueView::play_row`] → tracker → backend `set_queue`
//!   → redraw old/new current rows
//! - drag end → [`QueueView::drag_ended`] → reorder engine → store →
//!   backend `set_queue_next` → debounced full redraw
//! - column move/resize → [`QueueView::columns_changed`] → reconcile →
//!   settings
//!
//! The view owns its store and debouncer; the grid, backend and settings
//! are handed in.

use std::path::Path;
use std::sync::Arc;

use crate::backend::{PlaybackBackend, PlayerData, songs_of};
use crate::config::{self, SharedConfig, TableConfig};
use crate::debounce::RedrawDebouncer;
use crate::error::{Error, QueueError, Result, ResultExt};
use crate::grid::GridView;
use crate::layout;
use crate::model::{ColumnConfig, LiveColumn, TableType, UniqueId};
use crate::queue::{ActiveItemTracker, CurrentChange, QueueStore, apply_reorder};

/// One rendered queue table and the state behind it.
pub struct QueueView<S: QueueStore> {
    store: S,
    table: TableType,
    tracker: ActiveItemTracker,
    grid: Arc<dyn GridView>,
    backend: Arc<dyn PlaybackBackend>,
    settings: SharedConfig,
    redraw: RedrawDebouncer,
    /// A drag is in progress (only tracked for the side drawer)
    reordering: bool,
}

impl<S: QueueStore> QueueView<S> {
    /// Create a view of `store` rendered as `table`.
    pub fn new(
        store: S,
        table: TableType,
        grid: Arc<dyn GridView>,
        backend: Arc<dyn PlaybackBackend>,
        settings: SharedConfig,
        redraw: RedrawDebouncer,
    ) -> Self {
        Self {
            store,
            table,
            tracker: ActiveItemTracker,
            grid,
            backend,
            settings,
            redraw,
            reordering: false,
        }
    }

    /// Get a reference to the queue store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a mutable reference to the queue store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The table this view renders.
    pub fn table(&self) -> TableType {
        self.table
    }

    /// Whether a row drag is in progress in the side drawer.
    pub fn is_reordering(&self) -> bool {
        self.reordering
    }

    /// Whether a debounced redraw is waiting to run.
    pub fn redraw_pending(&self) -> bool {
        self.redraw.is_pending()
    }

    /// Read a value from this view's table settings.
    fn with_table<T>(&self, f: impl FnOnce(&TableConfig) -> T) -> T {
        f(self.settings.read().tables.get(self.table))
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Double-click on a row: play it.
    ///
    /// The grid is refreshed before the backend is told, so a backend
    /// failure still leaves the "now playing" rows up to date.
    pub fn play_row(&mut self, id: &UniqueId) -> Result<()> {
        let change = self
            .tracker
            .mark_current(&mut self.store, id)
            .with_context(format!("Cannot play row {id}"))?;
        self.current_changed(&change);
        self.backend.set_queue(&PlayerData::from_store(&self.store))?;
        Ok(())
    }

    /// Move playback to the next row, e.g. when a song ended.
    pub fn play_next(&mut self) -> Result<bool> {
        let Some(change) = self.tracker.step_forward(&mut self.store) else {
            return Ok(false);
        };
        self.current_changed(&change);
        self.backend.set_queue(&PlayerData::from_store(&self.store))?;
        Ok(true)
    }

    /// Move playback to the preceding row.
    pub fn play_previous(&mut self) -> Result<bool> {
        let Some(change) = self.tracker.step_back(&mut self.store) else {
            return Ok(false);
        };
        self.current_changed(&change);
        self.backend.set_queue(&PlayerData::from_store(&self.store))?;
        Ok(true)
    }

    /// Refresh the rows whose "now playing" marker changed.
    pub fn current_changed(&self, change: &CurrentChange) {
        self.grid.redraw_rows(&change.redraw);
        if self.with_table(|t| t.follow_current_song) {
            self.grid.ensure_visible(&change.visible);
        }
    }

    // ========================================================================
    // Drag and drop
    // ========================================================================

    /// A row drag started.
    pub fn drag_started(&mut self) {
        if self.table == TableType::SideDrawerQueue {
            self.reordering = true;
        }
    }

    /// Rows were dropped onto `over` (or below the last row when `None`).
    ///
    /// `nodes` are the dragged rows as reported by the grid; rows without an
    /// id are skipped. A drop without rows is ignored. A rejected reorder
    /// leaves the queue unchanged. Once a reorder is committed the redraw is
    /// always scheduled; a backend failure is returned afterwards.
    pub fn drag_ended(&mut self, nodes: &[Option<UniqueId>], over: Option<UniqueId>) -> Result<()> {
        if nodes.is_empty() {
            return Ok(());
        }
        let moved: Vec<UniqueId> = nodes.iter().flatten().copied().collect();
        let policy = self.settings.read().queue.target_in_moved;

        let result = apply_reorder(&mut self.store, &moved, over.as_ref(), policy);
        if self.table == TableType::SideDrawerQueue {
            self.reordering = false;
        }

        match result {
            Ok(_) => {}
            Err(QueueError::EmptyMove) => return Ok(()),
            Err(e) => {
                tracing::warn!(error = %e, table = %self.table, "Reorder rejected");
                return Err(Error::from(e).context(format!("Cannot drop rows in {}", self.table)));
            }
        }

        tracing::debug!(moved = moved.len(), table = %self.table, "Rows reordered");
        let grid = Arc::clone(&self.grid);
        self.redraw.schedule(move || grid.redraw_all());

        self.backend.set_queue_next(&songs_of(self.store.upcoming()))?;
        Ok(())
    }

    // ========================================================================
    // Grid lifecycle and layout
    // ========================================================================

    /// The grid finished loading: show the current row.
    pub fn grid_ready(&self) {
        if let Some(id) = self.store.current_id() {
            self.grid.ensure_visible(id);
        }
    }

    /// Columns were moved or resized; store the new layout.
    ///
    /// Returns the columns written to the settings.
    pub fn columns_changed(&self, live: &[LiveColumn]) -> Vec<ColumnConfig> {
        let mut settings = self.settings.write();
        let table = settings.tables.get_mut(self.table);
        let columns = layout::reconcile(live, &table.columns, !table.auto_fit);
        table.columns = columns.clone();
        tracing::debug!(table = %self.table, columns = columns.len(), "Column layout saved");
        columns
    }

    /// Write the current settings, including every table layout, to `path`.
    pub async fn save_layout(&self, path: &Path) -> Result<()> {
        let snapshot = self.settings.read().clone();
        config::save_async(snapshot, path.to_path_buf()).await?;
        Ok(())
    }

    /// The grid was resized.
    pub fn grid_resized(&self) {
        if self.with_table(|t| t.auto_fit) {
            self.grid.size_columns_to_fit();
        }
    }

    /// The table's column list or auto-fit flag changed in the settings.
    pub fn column_config_changed(&self) {
        if self.with_table(|t| t.auto_fit) {
            self.grid.size_columns_to_fit();
        }
    }

    /// The table's row height changed in the settings.
    pub fn row_height_changed(&self) {
        self.grid.reset_row_heights();
        self.grid.redraw_all();
    }
}
