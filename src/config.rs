//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\play-queue\config.toml
//! - macOS: ~/Library/Application Support/play-queue/config.toml
//! - Linux: ~/.config/play-queue/config.toml
//!
//! The config file is human-readable and editable. It holds the queue
//! engine settings and the per-table grid layout that column changes are
//! written back into.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::model::{ColumnConfig, TableType};
use crate::queue::TargetPolicy;

/// Settings shared between the controller and whoever persists them.
pub type SharedConfig = Arc<RwLock<Config>>;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Queue engine settings
    pub queue: QueueConfig,

    /// Grid layout per table
    pub tables: TablesConfig,
}

impl Config {
    /// Wrap into a shared handle.
    pub fn shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}

/// Queue engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Delay before the grid is redrawn after a reorder
    pub redraw_delay_ms: u64,

    /// Handling of drops onto one of the dragged rows
    pub target_in_moved: TargetPolicy,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            redraw_delay_ms: 250,
            target_in_moved: TargetPolicy::Reject,
        }
    }
}

impl QueueConfig {
    pub fn redraw_delay(&self) -> Duration {
        Duration::from_millis(self.redraw_delay_ms)
    }
}

/// Layout of every table the queue is shown in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    pub now_playing: TableConfig,
    pub side_queue: TableConfig,
    pub side_drawer_queue: TableConfig,
}

impl TablesConfig {
    pub fn get(&self, table: TableType) -> &TableConfig {
        match table {
            TableType::NowPlaying => &self.now_playing,
            TableType::SideQueue => &self.side_queue,
            TableType::SideDrawerQueue => &self.side_drawer_queue,
        }
    }

    pub fn get_mut(&mut self, table: TableType) -> &mut TableConfig {
        match table {
            TableType::NowPlaying => &mut self.now_playing,
            TableType::SideQueue => &mut self.side_queue,
            TableType::SideDrawerQueue => &mut self.side_drawer_queue,
        }
    }
}

/// Grid layout of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Visible columns in display order
    pub columns: Vec<ColumnConfig>,

    /// Size columns to the grid width instead of keeping user widths
    pub auto_fit: bool,

    /// Row height in pixels
    pub row_height: u32,

    /// Scroll the current entry into view whenever it changes
    pub follow_current_song: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                ColumnConfig::new("row-index", Some(50)),
                ColumnConfig::new("title", Some(500)),
                ColumnConfig::new("duration", Some(100)),
            ],
            auto_fit: true,
            row_height: 40,
            follow_current_song: true,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("play-queue"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the default location
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)
}

/// Save configuration to a specific file
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

/// Save configuration to `path` without blocking the caller's runtime thread
pub async fn save_async(config: Config, path: PathBuf) -> Result<(), ConfigError> {
    tokio::task::spawn_blocking(move || save_to(&config, &path))
        .await
        .map_err(|e| ConfigError::TaskJoin(e.to_string()))?
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),

    #[error("Task join error: {0}")]
    TaskJoin(String),
}

// ============================================================================
// Tests
// ============================================================================
