//! Column layout persistence.
//!
//! When the user moves or resizes a grid column, the live column state is
//! merged back into the persisted per-table column list.

use crate::model::{ColumnConfig, LiveColumn};

/// Merge live grid columns into the persisted configuration.
///
/// Columns are emitted in live order. Live columns without a persisted
/// entry are dropped, as are persisted columns the grid no longer shows.
/// With `capture_widths` each width is replaced by the live width;
/// otherwise the persisted width is kept (auto-fit tables).
pub fn reconcile(
    live: &[LiveColumn],
    persisted: &[ColumnConfig],
    capture_widths: bool,
) -> Vec<ColumnConfig> {
    live.iter()
        .filter_map(|col| {
            let Some(config) = persisted.iter().find(|c| c.column == col.column) else {
                tracing::trace!(column = %col.column, "Dropping unknown column");
                return None;
            };
            let mut config = config.clone();
            if capture_widths {
                config.width = Some(col.actual_width);
            }
            Some(config)
        })
        .collect()
}
