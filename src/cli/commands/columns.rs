//! Column layout and config commands.

use anyhow::Context;
use std::path::Path;
use tracing::info;

use crate::config::{self, Config};
use crate::layout;
use crate::model::{LiveColumn, TableType};

/// Reconcile live columns with a table's configured columns
///
/// With `save`, the result is written to `config_path`, or to the default
/// config location when no path was given.
pub fn cmd_columns(
    mut config: Config,
    config_path: Option<&Path>,
    table: TableType,
    live: &[LiveColumn],
    save: bool,
) -> anyhow::Result<()> {
    let table_config = config.tables.get_mut(table);
    let capture_widths = !table_config.auto_fit;
    let columns = layout::reconcile(live, &table_config.columns, capture_widths);

    println!(
        "Table {} ({}):",
        table,
        if capture_widths { "widths captured" } else { "auto-fit" }
    );
    for column in &columns {
        let width = column
            .width
            .map(|w| format!("{w}px"))
            .unwrap_or_else(|| "auto".to_string());
        println!("  {:<16} {}", column.column, width);
    }
    let dropped = live.len() - columns.len();
    if dropped > 0 {
        println!("  ({dropped} unknown column(s) dropped)");
    }

    if save {
        table_config.columns = columns;
        let saved = match config_path {
            Some(path) => config::save_to(&config, path),
            None => config::save(&config),
        };
        saved.context("Failed to save config")?;
        info!("Saved {} layout", table);
    }
    Ok(())
}

/// Print the config location and contents
pub fn cmd_config(config: &Config, config_path: Option<&Path>) -> anyhow::Result<()> {
    match config_path.map(Path::to_path_buf).or_else(config::config_path) {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no config directory)"),
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
