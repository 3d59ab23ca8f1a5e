//! Drag-and-drop reordering.
//!
//! A drag gesture is described by the rows being moved and the row they were
//! dropped on. [`plan_reorder`] turns it into a complete new ordering without
//! touching the queue, so the result can be validated before it is committed
//! with [`QueueStore::set_order`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::store::QueueStore;
use crate::error::QueueError;
use crate::model::UniqueId;

/// What to do when the drop target is itself one of the moved rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetPolicy {
    /// Fail with [`QueueError::AmbiguousTarget`]
    #[default]
    Reject,
    /// Treat the drop as "no target" and move the rows to the end
    AppendToEnd,
}

/// Compute the order that results from moving `moved` in front of `target`.
///
/// The moved rows keep their relative order from `order`, whatever order
/// they are listed in. Without a target they go to the end.
pub fn plan_reorder(
    order: &[UniqueId],
    moved: &[UniqueId],
    target: Option<&UniqueId>,
    policy: TargetPolicy,
) -> Result<Vec<UniqueId>, QueueError> {
    if moved.is_empty() {
        return Err(QueueError::EmptyMove);
    }

    let moved_set: HashSet<UniqueId> = moved.iter().copied().collect();
    let present: HashSet<UniqueId> = order.iter().copied().collect();
    if let Some(unknown) = moved.iter().find(|id| !present.contains(*id)) {
        return Err(QueueError::UnknownId(*unknown));
    }

    let target = match target {
        Some(t) if !present.contains(t) => return Err(QueueError::UnknownId(*t)),
        Some(t) if moved_set.contains(t) => match policy {
            TargetPolicy::Reject => return Err(QueueError::AmbiguousTarget(*t)),
            TargetPolicy::AppendToEnd => {
                tracing::debug!(drop_target = %t, "Drop target is moving, appending");
                None
            }
        },
        other => other,
    };

    let (block, mut result): (Vec<UniqueId>, Vec<UniqueId>) =
        order.iter().partition(|id| moved_set.contains(*id));

    let insert_at = target
        .and_then(|t| result.iter().position(|id| id == t))
        .unwrap_or(result.len());
    let tail = result.split_off(insert_at);
    result.extend(block);
    result.extend(tail);

    tracing::debug!(moved = moved_set.len(), insert_at, "Planned reorder");
    Ok(result)
}

/// Plan a reorder against `store` and commit it.
///
/// The store is only written when planning succeeds. Returns the new order.
pub fn apply_reorder<S: QueueStore + ?Sized>(
    store: &mut S,
    moved: &[UniqueId],
    target: Option<&UniqueId>,
    policy: TargetPolicy,
) -> Result<Vec<UniqueId>, QueueError> {
    let order = plan_reorder(&store.ids(), moved, target, policy)?;
    store.set_order(&order)?;
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{abcde_queue, titles};

    fn ids(raw: &[u64]) -> Vec<UniqueId> {
        raw.iter().copied().map(UniqueId).collect()
    }

    #[test]
    fn test_move_block_before_target_normalizes_order() {
        // [A, B, C, D, E], move [D, B] onto A
        let order = ids(&[1, 2, 3, 4, 5]);
        let result = plan_reorder(
            &order,
            &ids(&[4, 2]),
            Some(&UniqueId(1)),
            TargetPolicy::Reject,
        )
        .unwrap();
        assert_eq!(result, ids(&[2, 4, 1, 3, 5]));
    }

    #[test]
    fn test_move_single_to_end() {
        let order = ids(&[1, 2, 3, 4]);
        let result = plan_reorder(&order, &ids(&[2]), None, TargetPolicy::Reject).unwrap();
        assert_eq!(result, ids(&[1, 3, 4, 2]));
    }

    #[test]
    fn test_move_down_before_later_target() {
        let order = ids(&[1, 2, 3, 4]);
        let result =
            plan_reorder(&order, &ids(&[1]), Some(&UniqueId(4)), TargetPolicy::Reject).unwrap();
        assert_eq!(result, ids(&[2, 3, 1, 4]));
    }

    #[test]
    fn test_empty_move() {
        let order = ids(&[1, 2]);
        assert_eq!(
            plan_reorder(&order, &[], None, TargetPolicy::Reject),
            Err(QueueError::EmptyMove)
        );
    }

    #[test]
    fn test_unknown_ids() {
        let order = ids(&[1, 2]);
        assert_eq!(
            plan_reorder(&order, &ids(&[7]), None, TargetPolicy::Reject),
            Err(QueueError::UnknownId(UniqueId(7)))
        );
        assert_eq!(
            plan_reorder(&order, &ids(&[1]), Some(&UniqueId(9)), TargetPolicy::Reject),
            Err(QueueError::UnknownId(UniqueId(9)))
        );
    }

    #[test]
    fn test_target_inside_moved_set() {
        let order = ids(&[1, 2, 3]);
        assert_eq!(
            plan_reorder(&order, &ids(&[1, 2]), Some(&UniqueId(2)), TargetPolicy::Reject),
            Err(QueueError::AmbiguousTarget(UniqueId(2)))
        );
        let result = plan_reorder(
            &order,
            &ids(&[1, 2]),
            Some(&UniqueId(2)),
            TargetPolicy::AppendToEnd,
        )
        .unwrap();
        assert_eq!(result, ids(&[3, 1, 2]));
    }

    #[test]
    fn test_duplicate_moved_ids_collapse() {
        let order = ids(&[1, 2, 3]);
        let result = plan_reorder(&order, &ids(&[3, 3]), Some(&UniqueId(1)), TargetPolicy::Reject)
            .unwrap();
        assert_eq!(result, ids(&[3, 1, 2]));
    }

    #[test]
    fn test_apply_reorder_commits() {
        let (mut queue, q) = abcde_queue();
        apply_reorder(&mut queue, &[q[3], q[1]], Some(&q[0]), TargetPolicy::Reject).unwrap();
        assert_eq!(titles(&queue), ["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_failed_apply_leaves_store_untouched() {
        let (mut queue, q) = abcde_queue();
        let err = apply_reorder(&mut queue, &[q[0]], Some(&q[0]), TargetPolicy::Reject);
        assert!(err.is_err());
        assert_eq!(titles(&queue), ["a", "b", "c", "d", "e"]);
    }
}

/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// A queue of 1..30 ids plus a subset to move and an optional target index.
    fn gesture() -> impl Strategy<Value = (Vec<UniqueId>, Vec<UniqueId>, Option<usize>)> {
        (1usize..30).prop_flat_map(|len| {
            let order: Vec<UniqueId> = (1..=len as u64).map(UniqueId).collect();
            (
                Just(order.clone()),
                prop::sample::subsequence(order, 1..=len).prop_shuffle(),
                proptest::option::of(0..len),
            )
        })
    }

    proptest! {
        /// A reorder never invents or drops ids
        #[test]
        fn reorder_preserves_id_set((order, moved, target) in gesture()) {
            let target = target.map(|i| order[i]);
            let result = plan_reorder(&order, &moved, target.as_ref(), TargetPolicy::AppendToEnd)
                .unwrap();
            let mut sorted = result.clone();
            sorted.sort();
            prop_assert_eq!(sorted, order);
        }

        /// Moved rows end up contiguous, in their original relative order
        #[test]
        fn moved_rows_form_ordered_block((order, moved, target) in gesture()) {
            let target = target.map(|i| order[i]);
            let result = plan_reorder(&order, &moved, target.as_ref(), TargetPolicy::AppendToEnd)
                .unwrap();

            let mut expected_block = moved.clone();
            expected_block.sort();
            expected_block.dedup();

            let start = result.iter().position(|id| expected_block.contains(id)).unwrap();
            prop_assert_eq!(&result[start..start + expected_block.len()], &expected_block[..]);
        }

        /// Rows that were not moved keep their relative order
        #[test]
        fn unmoved_rows_keep_order((order, moved, target) in gesture()) {
            let target = target.map(|i| order[i]);
            let result = plan_reorder(&order, &moved, target.as_ref(), TargetPolicy::AppendToEnd)
                .unwrap();

            let rest_before: Vec<_> = order.iter().filter(|id| !moved.contains(*id)).collect();
            let rest_after: Vec<_> = result.iter().filter(|id| !moved.contains(*id)).collect();
            prop_assert_eq!(rest_before, rest_after);
        }
    }
}
