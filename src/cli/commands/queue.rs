//! Queue reordering and playback commands.

use anyhow::Context;
use tracing::debug;

use crate::config::Config;
use crate::model::{SongRef, UniqueId};
use crate::queue::{ActiveItemTracker, PlayQueue, QueueStore, apply_reorder};

/// Build a queue from titles; ids come out as 1..n.
fn queue_from_titles(titles: &[String]) -> PlayQueue {
    PlayQueue::with_songs(
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| SongRef::new(format!("cli-{}", i + 1), title.as_str())),
    )
}

fn print_queue(queue: &PlayQueue) {
    for entry in queue.entries() {
        let marker = if queue.current_id() == Some(&entry.unique_id) {
            "▶"
        } else {
            " "
        };
        println!("{} {:>3}  {}", marker, entry.unique_id, entry.song.title);
    }
}

/// Drag rows and print the new order
pub fn cmd_reorder(
    config: &Config,
    titles: &[String],
    moved: &[UniqueId],
    before: Option<UniqueId>,
    json: bool,
) -> anyhow::Result<()> {
    let mut queue = queue_from_titles(titles);
    let policy = config.queue.target_in_moved;
    debug!(?policy, moved = moved.len(), "Reordering from CLI");

    let order = apply_reorder(&mut queue, moved, before.as_ref(), policy)
        .context("Reorder failed")?;

    if json {
        println!("{}", serde_json::to_string(&order)?);
    } else {
        print_queue(&queue);
    }
    Ok(())
}

/// Play rows one after another and print each change
pub fn cmd_play(titles: &[String], ids: &[UniqueId]) -> anyhow::Result<()> {
    let mut queue = queue_from_titles(titles);
    let tracker = ActiveItemTracker;

    for id in ids {
        let change = tracker
            .mark_current(&mut queue, id)
            .with_context(|| format!("Cannot play {id}"))?;
        let redraw: Vec<String> = change.redraw.iter().map(|id| id.to_string()).collect();
        println!(
            "Playing {} ({}), previous: {}, redraw: [{}]",
            change.entry.song.title,
            id,
            queue
                .previous_id()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            redraw.join(", ")
        );
    }
    print_queue(&queue);
    Ok(())
}
