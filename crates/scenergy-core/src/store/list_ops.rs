//! Index-addressed operations on a single bubble list
//!
//! Pure functions returning new lists. Indices address insertion order;
//! out-of-range indices leave the list untouched.

use im::Vector;

use crate::bubble::BubbleValue;
use crate::registry;

/// Result of a two-tier delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Detachable content was cleared; the slot remains as a placeholder
    ContentCleared,
    /// The slot was removed
    SlotRemoved,
    OutOfRange,
}

/// Append a bubble, returning the new list and the bubble's index
#[must_use]
pub fn push(list: &Vector<BubbleValue>, bubble: BubbleValue) -> (Vector<BubbleValue>, usize) {
    let mut next = list.clone();
    next.push_back(bubble);
    let index = next.len() - 1;
    (next, index)
}

/// Replace the bubble at `index`; `None` when out of range
#[must_use]
pub fn replace(
    list: &Vector<BubbleValue>,
    index: usize,
    bubble: BubbleValue,
) -> Option<Vector<BubbleValue>> {
    (index < list.len()).then(|| list.update(index, bubble))
}

/// Two-tier delete.
///
/// A bubble whose type has detachable content that is present only loses that
/// content on the first call. Any other bubble, including an already cleared
/// one, loses its slot.
#[must_use]
pub fn remove_two_tier(
    list: &Vector<BubbleValue>,
    index: usize,
) -> (Vector<BubbleValue>, RemoveOutcome) {
    let Some(bubble) = list.get(index) else {
        return (list.clone(), RemoveOutcome::OutOfRange);
    };

    let detached = registry::definition(bubble.bubble_type())
        .detach
        .and_then(|detach| detach(bubble));

    match detached {
        Some(cleared) => (list.update(index, cleared), RemoveOutcome::ContentCleared),
        None => {
            let mut next = list.clone();
            let _ = next.remove(index);
            (next, RemoveOutcome::SlotRemoved)
        }
    }
}
