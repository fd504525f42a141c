//! Store actions and their outcomes
//!
//! `Action` is the only sanctioned mutation surface. Outcomes report what a
//! transition did, including the silent no-ops (stale index, unknown target).

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::bubble::BubbleValue;
use crate::migration::{MigrationOutcome, MoveOutcome};
use crate::output::OutputSettingsPatch;
use crate::state::{CategoryIds, ConfigPanelState, InspirationSection, ScopeTarget, SceneTypeKey, SectionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "action", rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Action {
    AddBubble {
        target: ScopeTarget,
        bubble: BubbleValue,
    },
    UpdateBubble {
        target: ScopeTarget,
        index: usize,
        bubble: BubbleValue,
    },
    RemoveBubble {
        target: ScopeTarget,
        index: usize,
    },
    /// Seed an empty target with its starter placeholders
    InitializeDefault {
        target: ScopeTarget,
    },
    MigrateSceneType {
        from: SceneTypeKey,
        to: SceneTypeKey,
    },
    MoveSceneTypeBubble {
        from: SceneTypeKey,
        to: SceneTypeKey,
        index: usize,
    },
    AddSection {
        section: InspirationSection,
    },
    RemoveSection {
        id: SectionId,
    },
    SetSectionCategories {
        id: SectionId,
        category_ids: CategoryIds,
    },
    SetSectionEnabled {
        id: SectionId,
        enabled: bool,
    },
    SetUserPrompt {
        prompt: String,
    },
    SetApplyCollectionInspiration {
        enabled: bool,
    },
    SetApplyCollectionPrompt {
        enabled: bool,
    },
    SetOutputSettings {
        patch: OutputSettingsPatch,
    },
    SetSelectedBaseImage {
        image_id: Option<String>,
    },
    MarkClean,
    ResetState {
        state: Box<ConfigPanelState>,
    },
}

impl Action {
    /// Actions that never mark the store dirty
    #[must_use]
    pub const fn is_non_dirtying(&self) -> bool {
        matches!(
            self,
            Self::InitializeDefault { .. } | Self::MarkClean | Self::ResetState { .. }
        )
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// What a dispatched action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Added { index: usize },
    Updated { index: usize },
    /// First tier of a delete: detachable content cleared, slot kept
    ContentCleared { index: usize },
    Removed { index: usize },
    IndexOutOfRange { index: usize, len: usize },
    TargetNotFound(ScopeTarget),
    Seeded { count: usize },
    AlreadyInitialized,
    Migration(MigrationOutcome),
    Move(MoveOutcome),
    SectionAdded { index: usize },
    DuplicateSection(SectionId),
    SectionRemoved,
    SectionNotFound(SectionId),
    Applied,
    MarkedClean,
    Reset,
}

impl ActionOutcome {
    /// Index of the bubble an add produced, for routing into an edit flow
    #[must_use]
    pub const fn added_index(&self) -> Option<usize> {
        match self {
            Self::Added { index } => Some(*index),
            _ => None,
        }
    }
}
