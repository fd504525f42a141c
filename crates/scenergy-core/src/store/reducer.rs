//! Transition table
//!
//! `reduce` is pure: it takes a snapshot and an action and returns the next
//! snapshot plus an outcome. Dirty rules:
//!
//! - `InitializeDefault`, `MarkClean`, `ResetState` never mark dirty
//! - every other action marks dirty, including when it resolves to a no-op
//!   (stale index, unknown section, identical value)

use im::Vector;

use super::action::{Action, ActionOutcome};
use super::list_ops::{self, RemoveOutcome};
use super::{StoreOptions, StoreState};
use crate::bubble::{BubbleType, BubbleValue};
use crate::migration;
use crate::state::{ConfigPanelState, InspirationSection, SceneTypeInspiration, ScopeTarget, SectionId};

/// Apply one action to a snapshot
#[must_use]
pub fn reduce(
    state: &StoreState,
    action: Action,
    options: &StoreOptions,
) -> (StoreState, ActionOutcome) {
    tracing::debug!(
        action = action.name(),
        version = state.version(),
        dirty = state.is_dirty(),
        "Reducing action"
    );

    match action {
        Action::MarkClean => (state.mark_clean(), ActionOutcome::MarkedClean),
        Action::ResetState { state: next } => {
            if let Err(e) = next.validate() {
                tracing::warn!(error = %e, "Resetting to a state that fails validation");
            }
            (state.reset(*next), ActionOutcome::Reset)
        }
        Action::InitializeDefault { target } => {
            let (panel, outcome) = seed(state.current().clone(), &target, options);
            match outcome {
                ActionOutcome::Seeded { .. } => (state.bootstrap(|_| panel), outcome),
                _ => (state.clone(), outcome),
            }
        }
        Action::AddBubble { target, bubble } => edit(state, |panel| {
            with_list(panel, &target, true, |list| {
                let (next, index) = list_ops::push(list, bubble);
                (next, ActionOutcome::Added { index })
            })
        }),
        Action::UpdateBubble {
            target,
            index,
            bubble,
        } => edit(state, |panel| {
            with_list(panel, &target, false, |list| {
                list_ops::replace(list, index, bubble).map_or_else(
                    || out_of_range(list, index),
                    |next| (next, ActionOutcome::Updated { index }),
                )
            })
        }),
        Action::RemoveBubble { target, index } => edit(state, |panel| {
            with_list(panel, &target, false, |list| {
                match list_ops::remove_two_tier(list, index) {
                    (next, RemoveOutcome::ContentCleared) => {
                        (next, ActionOutcome::ContentCleared { index })
                    }
                    (next, RemoveOutcome::SlotRemoved) => (next, ActionOutcome::Removed { index }),
                    (_, RemoveOutcome::OutOfRange) => out_of_range(list, index),
                }
            })
        }),
        Action::MigrateSceneType { from, to } => edit(state, |mut panel| {
            let (map, outcome) =
                migration::migrate_scene_type(&panel.scene_type_inspiration, &from, &to);
            if outcome.is_migrated() {
                tracing::info!(from = %from, to = %to, ?outcome, "Migrated staged scene-type settings");
            }
            panel.scene_type_inspiration = map;
            (panel, ActionOutcome::Migration(outcome))
        }),
        Action::MoveSceneTypeBubble { from, to, index } => edit(state, |mut panel| {
            let (map, outcome) =
                migration::move_bubble(&panel.scene_type_inspiration, &from, &to, index);
            panel.scene_type_inspiration = map;
            (panel, ActionOutcome::Move(outcome))
        }),
        Action::AddSection { section } => edit(state, |mut panel| {
            if panel.section(&section.id).is_some() {
                return (panel, ActionOutcome::DuplicateSection(section.id));
            }
            panel.inspiration_sections.push_back(section);
            let index = panel.inspiration_sections.len() - 1;
            (panel, ActionOutcome::SectionAdded { index })
        }),
        Action::RemoveSection { id } => edit(state, |mut panel| {
            match panel.section_index(&id) {
                Some(index) => {
                    let _ = panel.inspiration_sections.remove(index);
                    (panel, ActionOutcome::SectionRemoved)
                }
                None => (panel, ActionOutcome::SectionNotFound(id)),
            }
        }),
        Action::SetSectionCategories { id, category_ids } => edit(state, |panel| {
            update_section(panel, id, |section| section.category_ids = category_ids)
        }),
        Action::SetSectionEnabled { id, enabled } => edit(state, |panel| {
            update_section(panel, id, |section| section.enabled = enabled)
        }),
        Action::SetUserPrompt { prompt } => edit(state, |mut panel| {
            panel.user_prompt = prompt;
            (panel, ActionOutcome::Applied)
        }),
        Action::SetApplyCollectionInspiration { enabled } => edit(state, |mut panel| {
            panel.apply_collection_inspiration = enabled;
            (panel, ActionOutcome::Applied)
        }),
        Action::SetApplyCollectionPrompt { enabled } => edit(state, |mut panel| {
            panel.apply_collection_prompt = enabled;
            (panel, ActionOutcome::Applied)
        }),
        Action::SetOutputSettings { patch } => edit(state, |mut panel| {
            panel.output_settings = panel.output_settings.apply(patch);
            (panel, ActionOutcome::Applied)
        }),
        Action::SetSelectedBaseImage { image_id } => edit(state, |mut panel| {
            panel.selected_base_image_id = image_id;
            (panel, ActionOutcome::Applied)
        }),
    }
}

/// User-intent transition: always dirty, whatever the outcome
fn edit(
    state: &StoreState,
    f: impl FnOnce(ConfigPanelState) -> (ConfigPanelState, ActionOutcome),
) -> (StoreState, ActionOutcome) {
    let mut outcome = ActionOutcome::Applied;
    let next = state.mutate(|panel| {
        let (panel, result) = f(panel);
        outcome = result;
        panel
    });
    (next, outcome)
}

fn starter(types: &[BubbleType]) -> Vector<BubbleValue> {
    types.iter().copied().map(BubbleValue::placeholder).collect()
}

/// Seed an empty target with starter placeholders
fn seed(
    mut panel: ConfigPanelState,
    target: &ScopeTarget,
    options: &StoreOptions,
) -> (ConfigPanelState, ActionOutcome) {
    match target {
        ScopeTarget::General => {
            if !panel.general_inspiration.is_empty() {
                return (panel, ActionOutcome::AlreadyInitialized);
            }
            panel.general_inspiration = starter(&options.general_starter);
            let count = panel.general_inspiration.len();
            (panel, ActionOutcome::Seeded { count })
        }
        ScopeTarget::Section(id) => {
            let Some(index) = panel.section_index(id) else {
                return (panel, ActionOutcome::TargetNotFound(target.clone()));
            };
            let mut section = panel.inspiration_sections[index].clone();
            if !section.bubbles.is_empty() {
                return (panel, ActionOutcome::AlreadyInitialized);
            }
            section.bubbles = starter(&options.general_starter);
            let count = section.bubbles.len();
            panel.inspiration_sections = panel.inspiration_sections.update(index, section);
            (panel, ActionOutcome::Seeded { count })
        }
        ScopeTarget::SceneType(key) => {
            if panel.scene_type(key).is_some_and(|s| !s.bubbles.is_empty()) {
                return (panel, ActionOutcome::AlreadyInitialized);
            }
            let mut bubbles = Vector::unit(BubbleValue::scene_label(
                options.scene_label.as_str(),
                key.as_str(),
            ));
            bubbles.append(starter(&options.scene_type_starter));
            let count = bubbles.len();
            panel
                .scene_type_inspiration
                .insert(key.clone(), SceneTypeInspiration { bubbles });
            (panel, ActionOutcome::Seeded { count })
        }
    }
}

/// Run a list operation against the list a target addresses.
///
/// Scene-type buckets are created on demand only when `create` is set.
fn with_list(
    mut panel: ConfigPanelState,
    target: &ScopeTarget,
    create: bool,
    op: impl FnOnce(&Vector<BubbleValue>) -> (Vector<BubbleValue>, ActionOutcome),
) -> (ConfigPanelState, ActionOutcome) {
    match target {
        ScopeTarget::General => {
            let (list, outcome) = op(&panel.general_inspiration);
            panel.general_inspiration = list;
            (panel, outcome)
        }
        ScopeTarget::Section(id) => {
            let Some(index) = panel.section_index(id) else {
                return (panel, ActionOutcome::TargetNotFound(target.clone()));
            };
            let mut section = panel.inspiration_sections[index].clone();
            let (list, outcome) = op(&section.bubbles);
            section.bubbles = list;
            panel.inspiration_sections = panel.inspiration_sections.update(index, section);
            (panel, outcome)
        }
        ScopeTarget::SceneType(key) => {
            let bucket = match panel.scene_type(key) {
                Some(bucket) => bucket.clone(),
                None if create => SceneTypeInspiration::default(),
                None => return (panel, ActionOutcome::TargetNotFound(target.clone())),
            };
            let (bubbles, outcome) = op(&bucket.bubbles);
            panel
                .scene_type_inspiration
                .insert(key.clone(), SceneTypeInspiration { bubbles });
            (panel, outcome)
        }
    }
}

fn out_of_range(list: &Vector<BubbleValue>, index: usize) -> (Vector<BubbleValue>, ActionOutcome) {
    (
        list.clone(),
        ActionOutcome::IndexOutOfRange {
            index,
            len: list.len(),
        },
    )
}

fn update_section(
    mut panel: ConfigPanelState,
    id: SectionId,
    f: impl FnOnce(&mut InspirationSection),
) -> (ConfigPanelState, ActionOutcome) {
    let Some(index) = panel.section_index(&id) else {
        return (panel, ActionOutcome::SectionNotFound(id));
    };
    let mut section = panel.inspiration_sections[index].clone();
    f(&mut section);
    panel.inspiration_sections = panel.inspiration_sections.update(index, section);
    (panel, ActionOutcome::Applied)
}
