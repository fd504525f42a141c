//! End-to-end store behavior: scoped CRUD, dirty tracking, two-tier delete,
//! scene-type migration and the save protocol.

// Integration tests have relaxed clippy settings for test ergonomics.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::too_many_lines,
    clippy::doc_markdown
)]

use anyhow::Result;
use im::vector;
use scenergy_core::bubble::{ImageSourceType, ReferenceImage};
use scenergy_core::migration::{MigrationOutcome, MoveOutcome};
use scenergy_core::state::{CategoryIds, SceneTypeInspiration};
use scenergy_core::{
    Action, ActionOutcome, BubbleType, BubbleValue, CleanOutcome, ConfigPanelState, ConfigStore,
    InspirationSection, SceneTypeKey, ScopeTarget,
};

fn reference(url: &str) -> BubbleValue {
    BubbleValue::reference(ReferenceImage::new(url, ImageSourceType::Upload))
}

// ═══════════════════════════════════════════════════════════════════════════
// DIRTY TRACKING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn initialize_add_mark_clean_scenario() {
    let mut store = ConfigStore::default();
    assert!(store.current().general_inspiration.is_empty());

    store.initialize_default(ScopeTarget::General);
    assert_eq!(store.current().general_inspiration.len(), 3);
    assert!(!store.is_dirty());

    store.add(ScopeTarget::General, BubbleValue::custom("x"));
    assert_eq!(store.current().general_inspiration.len(), 4);
    assert!(store.is_dirty());

    store.mark_clean();
    assert!(!store.is_dirty());
    assert_eq!(store.original().general_inspiration.len(), 4);
    assert_eq!(store.original(), store.current());
}

#[test]
fn setting_identical_value_still_marks_dirty() {
    let mut store = ConfigStore::default();
    let same = store.current().apply_collection_prompt;
    store.dispatch(Action::SetApplyCollectionPrompt { enabled: same });
    assert!(store.is_dirty());
    assert_eq!(store.current(), store.original());
}

#[test]
fn reset_state_round_trips() {
    let mut store = ConfigStore::default();
    store.add(ScopeTarget::General, BubbleValue::style("Modern"));

    let loaded = ConfigPanelState {
        user_prompt: "linen sofa in a loft".into(),
        general_inspiration: vector![BubbleValue::lighting("Golden hour")],
        ..ConfigPanelState::default()
    };
    store.reset_state(loaded.clone());

    assert_eq!(store.current(), &loaded);
    assert_eq!(store.original(), &loaded);
    assert!(!store.is_dirty());
}

// ═══════════════════════════════════════════════════════════════════════════
// SCOPED CRUD
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn scopes_are_independent() -> Result<()> {
    let mut store = ConfigStore::default();
    let section = InspirationSection::new(CategoryIds::new(["sofas"])?);
    let section_target = ScopeTarget::Section(section.id.clone());
    let scene_target = ScopeTarget::SceneType(SceneTypeKey::new("Bedroom"));

    store.dispatch(Action::AddSection { section });
    store.add(ScopeTarget::General, BubbleValue::style("Modern"));
    store.add(section_target.clone(), BubbleValue::mood("Calm"));
    store.add(scene_target.clone(), BubbleValue::camera_angle("Eye level"));

    let state = store.current();
    assert_eq!(state.general_inspiration.len(), 1);
    assert_eq!(state.bubbles(&section_target).map(|b| b.len()), Some(1));
    assert_eq!(state.bubbles(&scene_target).map(|b| b.len()), Some(1));

    store.remove(section_target.clone(), 0);
    let state = store.current();
    assert_eq!(state.general_inspiration.len(), 1);
    assert_eq!(state.bubbles(&section_target).map(|b| b.len()), Some(0));
    assert_eq!(state.bubbles(&scene_target).map(|b| b.len()), Some(1));
    Ok(())
}

#[test]
fn stale_index_is_a_silent_noop() {
    let mut store = ConfigStore::default();
    store.add(ScopeTarget::General, BubbleValue::style("Modern"));
    let before = store.current().clone();

    let update = store.update(ScopeTarget::General, 7, BubbleValue::style("Rustic"));
    let remove = store.remove(ScopeTarget::General, 7);

    assert_eq!(update, ActionOutcome::IndexOutOfRange { index: 7, len: 1 });
    assert_eq!(remove, ActionOutcome::IndexOutOfRange { index: 7, len: 1 });
    assert_eq!(store.current(), &before);
}

#[test]
fn update_replaces_whole_bubble() {
    let mut store = ConfigStore::default();
    store.add(ScopeTarget::General, BubbleValue::style("Modern"));
    store.update(ScopeTarget::General, 0, BubbleValue::color_palette(["#fff", "#000"]));
    assert_eq!(
        store.current().general_inspiration,
        vector![BubbleValue::color_palette(["#fff", "#000"])]
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// TWO-TIER DELETE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn reference_needs_two_removes() {
    let mut store = ConfigStore::default();
    store.add(ScopeTarget::General, reference("https://cdn.example/chair.png"));

    let first = store.remove(ScopeTarget::General, 0);
    assert_eq!(first, ActionOutcome::ContentCleared { index: 0 });
    let list = &store.current().general_inspiration;
    assert_eq!(list.len(), 1);
    assert!(list[0].is_empty());
    assert_eq!(list[0].bubble_type(), BubbleType::Reference);

    let second = store.remove(ScopeTarget::General, 0);
    assert_eq!(second, ActionOutcome::Removed { index: 0 });
    assert!(store.current().general_inspiration.is_empty());
}

#[test]
fn style_is_removed_immediately() {
    let mut store = ConfigStore::default();
    store.add(ScopeTarget::General, BubbleValue::style("Modern"));
    assert_eq!(
        store.remove(ScopeTarget::General, 0),
        ActionOutcome::Removed { index: 0 }
    );
    assert!(store.current().general_inspiration.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// SCENE-TYPE MIGRATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn staged_bucket_moves_and_empty_key_disappears() {
    let a = BubbleValue::style("Scandinavian");
    let b = reference("https://cdn.example/room.png");
    let mut initial = ConfigPanelState::default();
    initial.scene_type_inspiration.insert(
        SceneTypeKey::unselected(),
        SceneTypeInspiration::new([a.clone(), b.clone()]),
    );
    let mut store = ConfigStore::new(initial);

    let outcome =
        store.migrate_scene_type(SceneTypeKey::unselected(), SceneTypeKey::new("Living Room"));
    assert_eq!(
        outcome,
        ActionOutcome::Migration(MigrationOutcome::Migrated { count: 2 })
    );

    let map = &store.current().scene_type_inspiration;
    assert_eq!(map.len(), 1);
    assert!(!map.contains_key(&SceneTypeKey::unselected()));
    assert_eq!(
        map.get(&SceneTypeKey::new("Living Room"))
            .map(|s| s.bubbles.clone()),
        Some(vector![a, b])
    );
    assert!(store.is_dirty());
}

#[test]
fn concrete_scene_change_never_moves_bubbles() {
    let mut initial = ConfigPanelState::default();
    initial.scene_type_inspiration.insert(
        SceneTypeKey::new("Kitchen"),
        SceneTypeInspiration::new([BubbleValue::mood("Fresh")]),
    );
    let mut store = ConfigStore::new(initial.clone());

    let outcome = store.on_scene_type_changed(&SceneTypeKey::new("Kitchen"), &SceneTypeKey::new("Bath"));
    assert!(outcome.is_none());
    assert_eq!(store.current(), &initial);

    let explicit = store.dispatch(Action::MoveSceneTypeBubble {
        from: SceneTypeKey::new("Kitchen"),
        to: SceneTypeKey::new("Bath"),
        index: 0,
    });
    assert_eq!(explicit, ActionOutcome::Move(MoveOutcome::Moved { index: 0 }));
    assert_eq!(
        store
            .current()
            .scene_type(&SceneTypeKey::new("Bath"))
            .map(|s| s.bubbles.len()),
        Some(1)
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// SAVE PROTOCOL
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn failed_save_leaves_store_dirty() {
    let mut store = ConfigStore::default();
    store.add(ScopeTarget::General, BubbleValue::style("Modern"));
    let _ticket = store.begin_save();
    // persist failed: the caller drops the ticket
    assert!(store.is_dirty());
}

#[test]
fn edit_during_save_is_not_lost() {
    let mut store = ConfigStore::default();
    store.add(ScopeTarget::General, BubbleValue::style("Modern"));
    let ticket = store.begin_save();
    store.add(ScopeTarget::General, BubbleValue::mood("Calm"));

    let outcome = store.complete_save(ticket);
    assert!(matches!(outcome, CleanOutcome::Stale { .. }));
    assert!(store.is_dirty());
    assert_eq!(store.original().general_inspiration.len(), 1);
    assert_eq!(store.current().general_inspiration.len(), 2);
}
