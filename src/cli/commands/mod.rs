//! CLI command definitions and dispatch.
//!
//! The commands drive the engine on an in-memory queue built from the
//! command line, which is handy for checking how a gesture resolves
//! without a UI:
//! - `queue`: reordering and current-entry changes
//! - `columns`: column layout reconciliation and the config file

mod columns;
mod queue;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{self, Config};
use crate::model::{LiveColumn, TableType, UniqueId};

pub use columns::{cmd_columns, cmd_config};
pub use queue::{cmd_play, cmd_reorder};

/// Play queue engine CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "PLAY_QUEUE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Drag rows of a queue and print the resulting order
    Reorder {
        /// Song titles in queue order (ids are assigned 1..n)
        #[arg(short, long, num_args = 1.., required = true)]
        queue: Vec<String>,
        /// Ids of the dragged rows
        #[arg(short, long = "move", num_args = 1.., required = true)]
        moved: Vec<UniqueId>,
        /// Id of the row dropped onto (default: drop below the last row)
        #[arg(short, long)]
        before: Option<UniqueId>,
        /// Print the order as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play rows of a queue and print what the grid has to redraw
    Play {
        /// Song titles in queue order (ids are assigned 1..n)
        #[arg(short, long, num_args = 1.., required = true)]
        queue: Vec<String>,
        /// Ids of the rows to play, in order
        #[arg(short, long = "id", num_args = 1.., required = true)]
        ids: Vec<UniqueId>,
    },
    /// Reconcile live grid columns with a table's configured columns
    Columns {
        /// Table the columns belong to
        #[arg(short, long, default_value = "now-playing")]
        table: TableType,
        /// Live columns as <column>:<width>, in display order
        #[arg(short, long, num_args = 1.., required = true)]
        live: Vec<LiveColumn>,
        /// Write the result back to the config file
        #[arg(long)]
        save: bool,
    },
    /// Show the config file location and effective configuration
    Config,
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();
    let config = load_config(config_path);

    match &cli.command {
        Commands::Reorder {
            queue,
            moved,
            before,
            json,
        } => cmd_reorder(&config, queue, moved, *before, *json),
        Commands::Play { queue, ids } => cmd_play(queue, ids),
        Commands::Columns { table, live, save } => {
            cmd_columns(config, config_path, *table, live, *save)
        }
        Commands::Config => cmd_config(&config, config_path),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Load the config from an explicit path or the default location.
fn load_config(path: Option<&std::path::Path>) -> Config {
    match path {
        Some(p) => config::load_from(p),
        None => config::load(),
    }
}
