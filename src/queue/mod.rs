//! The play queue engine.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐   plan_reorder    ┌──────────────────────┐
//! │   drag gesture       │ ────────────────▶ │  new order (Vec)     │
//! └──────────────────────┘                   └──────────┬───────────┘
//!                                                       │ set_order
//!                                                       ▼
//! ┌──────────────────────┐   set_current     ┌──────────────────────┐
//! │ ActiveItemTracker    │ ────────────────▶ │  QueueStore          │
//! └──────────────────────┘                   └──────────────────────┘
//! ```
//!
//! Planning is pure; only [`QueueStore`] holds state, and only the tracker
//! moves its current pointer.

mod reorder;
mod store;
mod tracker;

pub use reorder::{TargetPolicy, apply_reorder, plan_reorder};
pub use store::{PlayQueue, QueueStore};
pub use tracker::{ActiveItemTracker, CurrentChange, RedrawSet, redraw_set};
