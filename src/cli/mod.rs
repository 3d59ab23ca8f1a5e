//! Command-line interface for play-queue.
//!
//! This module provides CLI commands for exercising the queue engine and
//! the column layout store without a UI.

mod commands;

pub use commands::{Cli, Commands, run_command};
