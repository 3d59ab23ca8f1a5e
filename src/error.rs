//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level error enum
//! - [`QueueError`]: failures of the queue store and reorder engine
//! - Module-specific errors ([`PlayerError`], [`ConfigError`]) convert into [`Error`]
//!
//! # Example
//!
//! ```ignore
//! use play_queue::error::{Result, ResultExt};
//!
//! fn commit(view: &mut QueueView<PlayQueue>, moved: &[Option<UniqueId>]) -> Result<()> {
//!     view.drag_ended(moved, None).with_context("while dropping rows")?;
//!     Ok(())
//! }
//! ```

use crate::backend::PlayerError;
use crate::config::ConfigError;
use crate::model::UniqueId;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the queue store and the reorder engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// Referenced entry is not in the queue
    #[error("Unknown queue entry: {0}")]
    UnknownId(UniqueId),

    /// A new ordering does not contain exactly the ids already queued
    #[error("Unknown queue order: expected {expected} entries, got {actual}")]
    OrderMismatch { expected: usize, actual: usize },

    /// Drag gesture without any rows
    #[error("Nothing to move")]
    EmptyMove,

    /// Drop target is one of the rows being moved
    #[error("Drop target {0} is part of the moved rows")]
    AmbiguousTarget(UniqueId),

    /// A new ordering lists the same id twice
    #[error("Duplicate queue entry: {0}")]
    DuplicateId(UniqueId),
}

impl QueueError {
    /// True for errors that mean "the referenced id is not (exactly) in the queue".
    pub fn is_unknown_id(&self) -> bool {
        matches!(
            self,
            Self::UnknownId(_) | Self::OrderMismatch { .. } | Self::DuplicateId(_)
        )
    }
}

/// Top-level error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Queue store / reorder error
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// Playback backend error
    #[error("Playback error: {0}")]
    Playback(#[from] PlayerError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// The queue error at the root of this error, if any.
    pub fn as_queue_error(&self) -> Option<&QueueError> {
        match self {
            Self::Queue(e) => Some(e),
            Self::WithContext { source, .. } => source.as_queue_error(),
            _ => None,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, QueueError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Queue(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::from(QueueError::UnknownId(UniqueId(42)));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::from(PlayerError::ChannelClosed).context("while sending queue");
        let msg = err.to_string();
        assert!(msg.contains("while sending queue"));
        assert!(msg.contains("channel closed"));
    }

    #[test]
    fn test_queue_error_survives_context() {
        let result: std::result::Result<(), QueueError> = Err(QueueError::EmptyMove);
        let err = result.with_context("dropping rows").unwrap_err();
        assert_eq!(err.as_queue_error(), Some(&QueueError::EmptyMove));
    }

    #[test]
    fn test_order_mismatch_is_unknown_id() {
        assert!(QueueError::OrderMismatch { expected: 3, actual: 2 }.is_unknown_id());
        assert!(QueueError::UnknownId(UniqueId(1)).is_unknown_id());
        assert!(!QueueError::EmptyMove.is_unknown_id());
    }
}
