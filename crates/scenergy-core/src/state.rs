//! Inspiration configuration state
//!
//! `ConfigPanelState` layers three scopes of bubbles:
//! - general inspiration for the whole flow
//! - category-scoped sections (`InspirationSection`)
//! - scene-type buckets keyed by scene-type label (`""` = no scene chosen yet)
//!
//! Keys are validated newtypes (parse at boundaries). Collections are `im`
//! persistent structures so each transition produces a cheap new snapshot.

use im::{OrdMap, OrdSet, Vector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bubble::BubbleValue;
use crate::output::OutputSettings;
use crate::{Error, Result};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("section id cannot be empty")]
    EmptySectionId,

    #[error("section must cover at least one category")]
    EmptyCategories,

    #[error("category id cannot be empty")]
    EmptyCategoryId,
}

// ═══════════════════════════════════════════════════════════════════════════
// KEYS
// ═══════════════════════════════════════════════════════════════════════════

/// Unique identifier of an inspiration section
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionId(String);

impl SectionId {
    pub fn parse(id: impl Into<String>) -> std::result::Result<Self, KeyError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(KeyError::EmptySectionId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Fresh random identifier
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SectionId {
    type Error = KeyError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SectionId> for String {
    fn from(value: SectionId) -> Self {
        value.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty set of category ids a section applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CategoryIds(OrdSet<String>);

impl CategoryIds {
    pub fn new<I, S>(ids: I) -> std::result::Result<Self, KeyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids = ids
            .into_iter()
            .map(Into::into)
            .map(|id| {
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    Err(KeyError::EmptyCategoryId)
                } else {
                    Ok(trimmed.to_string())
                }
            })
            .collect::<std::result::Result<OrdSet<String>, KeyError>>()?;
        if ids.is_empty() {
            return Err(KeyError::EmptyCategories);
        }
        Ok(Self(ids))
    }

    #[must_use]
    pub fn contains(&self, category_id: &str) -> bool {
        self.0.contains(category_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with collections
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for CategoryIds {
    type Error = KeyError;

    fn try_from(value: Vec<String>) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryIds> for Vec<String> {
    fn from(value: CategoryIds) -> Self {
        value.0.into_iter().collect()
    }
}

/// Scene-type bucket key. The empty key means no scene type is chosen yet.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneTypeKey(String);

impl SceneTypeKey {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The `""` key
    #[must_use]
    pub const fn unselected() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn is_unselected(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SceneTypeKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for SceneTypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SCOPED BUNDLES
// ═══════════════════════════════════════════════════════════════════════════

/// Category-scoped settings bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspirationSection {
    pub id: SectionId,
    pub category_ids: CategoryIds,
    #[serde(default)]
    pub bubbles: Vector<BubbleValue>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

const fn enabled_by_default() -> bool {
    true
}

impl InspirationSection {
    /// Empty, enabled section with a generated id
    #[must_use]
    pub fn new(category_ids: CategoryIds) -> Self {
        Self {
            id: SectionId::generate(),
            category_ids,
            bubbles: Vector::new(),
            enabled: true,
        }
    }

    #[must_use]
    pub fn with_bubbles(mut self, bubbles: impl IntoIterator<Item = BubbleValue>) -> Self {
        self.bubbles = bubbles.into_iter().collect();
        self
    }

    #[must_use]
    pub fn covers(&self, category_id: &str) -> bool {
        self.category_ids.contains(category_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SceneTypeInspiration {
    #[serde(default)]
    pub bubbles: Vector<BubbleValue>,
}

impl SceneTypeInspiration {
    #[must_use]
    pub fn new(bubbles: impl IntoIterator<Item = BubbleValue>) -> Self {
        Self {
            bubbles: bubbles.into_iter().collect(),
        }
    }
}

pub type SceneTypeInspirationMap = OrdMap<SceneTypeKey, SceneTypeInspiration>;

/// Which bubble list an operation addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "key", rename_all = "kebab-case")]
pub enum ScopeTarget {
    General,
    Section(SectionId),
    SceneType(SceneTypeKey),
}

impl std::fmt::Display for ScopeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::General => write!(f, "general"),
            Self::Section(id) => write!(f, "section:{id}"),
            Self::SceneType(key) => write!(f, "scene-type:{key}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PANEL STATE
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPanelState {
    pub general_inspiration: Vector<BubbleValue>,
    pub inspiration_sections: Vector<InspirationSection>,
    pub scene_type_inspiration: SceneTypeInspirationMap,
    pub user_prompt: String,
    pub apply_collection_inspiration: bool,
    pub apply_collection_prompt: bool,
    pub output_settings: OutputSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_base_image_id: Option<String>,
}

impl Default for ConfigPanelState {
    fn default() -> Self {
        Self {
            general_inspiration: Vector::new(),
            inspiration_sections: Vector::new(),
            scene_type_inspiration: OrdMap::new(),
            user_prompt: String::new(),
            apply_collection_inspiration: true,
            apply_collection_prompt: true,
            output_settings: OutputSettings::default(),
            selected_base_image_id: None,
        }
    }
}

impl ConfigPanelState {
    /// Empty panel for a new flow, starting from configured output defaults
    #[must_use]
    pub fn with_output(output_settings: OutputSettings) -> Self {
        Self {
            output_settings,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn section(&self, id: &SectionId) -> Option<&InspirationSection> {
        self.inspiration_sections.iter().find(|s| &s.id == id)
    }

    #[must_use]
    pub fn section_index(&self, id: &SectionId) -> Option<usize> {
        self.inspiration_sections.iter().position(|s| &s.id == id)
    }

    /// First enabled section covering the category
    #[must_use]
    pub fn section_for_category(&self, category_id: &str) -> Option<&InspirationSection> {
        self.inspiration_sections
            .iter()
            .find(|s| s.enabled && s.covers(category_id))
    }

    #[must_use]
    pub fn scene_type(&self, key: &SceneTypeKey) -> Option<&SceneTypeInspiration> {
        self.scene_type_inspiration.get(key)
    }

    /// Bubble list addressed by a target, if the target exists
    #[must_use]
    pub fn bubbles(&self, target: &ScopeTarget) -> Option<&Vector<BubbleValue>> {
        match target {
            ScopeTarget::General => Some(&self.general_inspiration),
            ScopeTarget::Section(id) => self.section(id).map(|s| &s.bubbles),
            ScopeTarget::SceneType(key) => self.scene_type(key).map(|s| &s.bubbles),
        }
    }

    /// Check model invariants that the type system does not cover
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if two sections share an id
    pub fn validate(&self) -> Result<()> {
        let mut seen = OrdSet::new();
        self.inspiration_sections.iter().try_for_each(|section| {
            if seen.insert(section.id.clone()).is_some() {
                Err(Error::validation_error(format!(
                    "duplicate inspiration section id: {}",
                    section.id
                )))
            } else {
                Ok(())
            }
        })
    }
}
