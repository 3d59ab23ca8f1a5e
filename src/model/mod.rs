//! Core data models for the play queue.
//!
//! Defines the entities the engine moves around: [`QueueEntry`] (a song
//! placed in the queue under a stable [`UniqueId`]) and the column types
//! used by the grid layout: [`ColumnConfig`] and [`LiveColumn`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Stable identifier of a queue entry.
///
/// Assigned by the queue store when an entry is inserted and never reused,
/// so the same song queued twice gets two distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueId(pub u64);

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UniqueId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(UniqueId)
    }
}

/// Reference to a playable song.
///
/// The engine never modifies it; it is handed to the playback backend as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRef {
    /// Library/server identifier of the song
    pub id: String,
    /// Track title
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Duration in seconds
    pub duration: Option<u32>,
    /// Local file path, if the song is stored locally
    pub path: Option<PathBuf>,
}

impl SongRef {
    /// Create a song reference with only an id and a title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Get display artist.
    pub fn display_artist(&self) -> &str {
        self.artist.as_deref().unwrap_or("Unknown Artist")
    }
}

/// A single entry in the play queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub unique_id: UniqueId,
    pub song: SongRef,
}

/// The views the queue grid is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableType {
    /// Full-page "now playing" view
    #[default]
    NowPlaying,
    /// Queue docked in the sidebar
    SideQueue,
    /// Queue in the slide-out drawer
    SideDrawerQueue,
}

impl TableType {
    pub const ALL: [TableType; 3] = [
        TableType::NowPlaying,
        TableType::SideQueue,
        TableType::SideDrawerQueue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableType::NowPlaying => "now-playing",
            TableType::SideQueue => "side-queue",
            TableType::SideDrawerQueue => "side-drawer-queue",
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TableType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown table type: {s}"))
    }
}

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Persisted configuration of one grid column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Column id (e.g. "title", "duration")
    pub column: String,
    /// Display width in pixels; `None` lets the grid decide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Header label override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub align: ColumnAlign,
    #[serde(default)]
    pub pinned: bool,
}

impl ColumnConfig {
    /// Create a column config with default display attributes.
    pub fn new(column: impl Into<String>, width: Option<u32>) -> Self {
        Self {
            column: column.into(),
            width,
            label: None,
            align: ColumnAlign::Left,
            pinned: false,
        }
    }
}

/// A column as the grid currently shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveColumn {
    pub column: String,
    pub actual_width: u32,
}

impl LiveColumn {
    pub fn new(column: impl Into<String>, actual_width: u32) -> Self {
        Self {
            column: column.into(),
            actual_width,
        }
    }
}

impl std::str::FromStr for LiveColumn {
    type Err = String;

    /// Parse `id:width` (as accepted on the command line).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, width) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <column>:<width>, got {s:?}"))?;
        let actual_width = width
            .trim()
            .parse()
            .map_err(|e| format!("invalid width in {s:?}: {e}"))?;
        Ok(LiveColumn::new(column.trim(), actual_width))
    }
}
