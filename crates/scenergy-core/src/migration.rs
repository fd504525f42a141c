//! Scene-type migration
//!
//! Users may configure scene-type settings before choosing a concrete scene
//! type; those live under the unselected key `""`. When the active scene type
//! changes away from `""`, the staged bucket is re-homed under the new key and
//! the `""` entry is deleted outright. A blank scene-label bubble seeded under
//! `""` is dropped on the way; the target gets its own label when seeded.
//!
//! # States
//!
//! - `NoSceneSelected` (key `""`)
//! - `SceneSelected(label)`
//!
//! Changing between two concrete scene types never moves anything implicitly.
//! Moving a single bubble between concrete buckets is [`move_bubble`].

use im::Vector;

use crate::bubble::BubbleValue;
use crate::state::{SceneTypeInspiration, SceneTypeInspirationMap, SceneTypeKey};

/// Selection state derived from a scene-type key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneSelection {
    NoSceneSelected,
    SceneSelected(SceneTypeKey),
}

impl From<&SceneTypeKey> for SceneSelection {
    fn from(key: &SceneTypeKey) -> Self {
        if key.is_unselected() {
            Self::NoSceneSelected
        } else {
            Self::SceneSelected(key.clone())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Staged bubbles moved under the new key
    Migrated { count: usize },
    /// Source key is a concrete scene type
    FromConcreteScene,
    /// Nothing staged under `""`
    NothingStaged,
    /// Target is the unselected key
    TargetUnselected,
}

impl MigrationOutcome {
    #[must_use]
    pub const fn is_migrated(self) -> bool {
        matches!(self, Self::Migrated { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { index: usize },
    IndexOutOfRange,
    MissingSource,
    /// Either key is `""`; single-bubble moves are between concrete buckets only
    UnselectedKey,
    SameKey,
}

/// True when the unselected bucket holds at least one bubble
#[must_use]
pub fn has_staged(map: &SceneTypeInspirationMap) -> bool {
    map.get(&SceneTypeKey::unselected())
        .is_some_and(|bucket| !bucket.bubbles.is_empty())
}

/// Transition on an "active scene type changed" event.
///
/// Only `"" -> label` with a non-empty staged bucket changes the map. Staged
/// bubbles are appended after any bubbles already under `to`, minus blank
/// scene-label bubbles.
#[must_use]
pub fn migrate_scene_type(
    map: &SceneTypeInspirationMap,
    from: &SceneTypeKey,
    to: &SceneTypeKey,
) -> (SceneTypeInspirationMap, MigrationOutcome) {
    match (SceneSelection::from(from), SceneSelection::from(to)) {
        (SceneSelection::SceneSelected(_), _) => {
            (map.clone(), MigrationOutcome::FromConcreteScene)
        }
        (SceneSelection::NoSceneSelected, SceneSelection::NoSceneSelected) => {
            (map.clone(), MigrationOutcome::TargetUnselected)
        }
        (SceneSelection::NoSceneSelected, SceneSelection::SceneSelected(target)) => {
            if !has_staged(map) {
                return (map.clone(), MigrationOutcome::NothingStaged);
            }
            let mut next = map.clone();
            let staged: Vector<BubbleValue> = next
                .remove(from)
                .map(|b| b.bubbles)
                .unwrap_or_default()
                .into_iter()
                .filter(|bubble| !bubble.is_blank_scene_label())
                .collect();
            let count = staged.len();
            let mut bucket = next.get(&target).cloned().unwrap_or_default();
            bucket.bubbles.append(staged);
            next.insert(target, bucket);
            (next, MigrationOutcome::Migrated { count })
        }
    }
}

/// Move one bubble between two concrete scene-type buckets.
///
/// The bubble is appended to `to`, creating the bucket if needed. The source
/// bucket is kept even when it becomes empty.
#[must_use]
pub fn move_bubble(
    map: &SceneTypeInspirationMap,
    from: &SceneTypeKey,
    to: &SceneTypeKey,
    index: usize,
) -> (SceneTypeInspirationMap, MoveOutcome) {
    if from.is_unselected() || to.is_unselected() {
        return (map.clone(), MoveOutcome::UnselectedKey);
    }
    if from == to {
        return (map.clone(), MoveOutcome::SameKey);
    }
    let Some(source) = map.get(from) else {
        return (map.clone(), MoveOutcome::MissingSource);
    };
    if index >= source.bubbles.len() {
        return (map.clone(), MoveOutcome::IndexOutOfRange);
    }

    let mut remaining = source.bubbles.clone();
    let bubble = remaining.remove(index);
    let mut target = map.get(to).cloned().unwrap_or_default();
    target.bubbles.push_back(bubble);
    let new_index = target.bubbles.len() - 1;

    let next = map
        .update(from.clone(), SceneTypeInspiration { bubbles: remaining })
        .update(to.clone(), target);
    (next, MoveOutcome::Moved { index: new_index })
}
