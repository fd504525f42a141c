//! Override resolution
//!
//! Given the bubbles inherited from a broader scope and the bubbles of the
//! scope being edited, annotate each inherited bubble:
//!
//! - `single` types: overridden iff the local list holds a non-empty bubble of
//!   the same type. The first such local bubble is the authoritative one.
//! - `multiple` types: never overridden; both apply.
//!
//! Overridden bubbles are kept in the output so callers can still show them.
//!
//! Exactly one inherited source is used per view: the nearest candidate with
//! any non-empty bubble, otherwise the outermost candidate. Sources are never
//! merged into a combined list.

use std::collections::HashMap;

use im::Vector;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::bubble::{BubbleType, BubbleValue};
use crate::registry::{self, MergeStrategy};
use crate::state::{ConfigPanelState, ScopeTarget};

/// Layer in the settings hierarchy, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    Collection,
    General,
    Category,
    SceneType,
}

/// Read-only category entry supplied by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub default_bubbles: Vector<BubbleValue>,
}

/// Available categories and scene types
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
    #[serde(default)]
    pub scene_types: Vec<String>,
}

impl Catalog {
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Display name of a category, falling back to its id
    #[must_use]
    pub fn category_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.category(id).map_or(id, |c| c.name.as_str())
    }

    #[must_use]
    pub fn is_known_scene_type(&self, label: &str) -> bool {
        self.scene_types.iter().any(|s| s == label)
    }
}

/// External inputs needed to build inheritance chains
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    pub catalog: &'a Catalog,
    /// Collection-wide inspiration the flow belongs to
    pub collection_inspiration: &'a Vector<BubbleValue>,
    pub active_category: Option<&'a str>,
}

/// One candidate inherited scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritedSource {
    pub scope: Scope,
    pub label: String,
    pub bubbles: Vector<BubbleValue>,
}

impl InheritedSource {
    #[must_use]
    pub fn new(scope: Scope, label: impl Into<String>, bubbles: Vector<BubbleValue>) -> Self {
        Self {
            scope,
            label: label.into(),
            bubbles,
        }
    }

    /// True when at least one bubble is non-empty
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.bubbles.iter().any(|b| !b.is_empty())
    }
}

/// Inherited bubble annotated for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBubble {
    pub bubble: BubbleValue,
    pub overridden: bool,
    /// Index of the authoritative local bubble when overridden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overridden_by: Option<usize>,
    pub source_label: String,
}

/// Resolved inherited scope for one render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InheritedView {
    pub scope: Scope,
    pub source_label: String,
    pub bubbles: Vec<ResolvedBubble>,
}

impl InheritedView {
    /// Inherited bubbles that still apply (non-empty, not overridden)
    pub fn applied(&self) -> impl Iterator<Item = &BubbleValue> {
        self.bubbles
            .iter()
            .filter(|r| !r.overridden && !r.bubble.is_empty())
            .map(|r| &r.bubble)
    }
}

/// Index of the first non-empty local bubble per type
fn authoritative_locals(local: &Vector<BubbleValue>) -> HashMap<BubbleType, usize> {
    local
        .iter()
        .enumerate()
        .filter(|(_, bubble)| !bubble.is_empty())
        .unique_by(|(_, bubble)| bubble.bubble_type())
        .map(|(index, bubble)| (bubble.bubble_type(), index))
        .collect()
}

/// Annotate each inherited bubble with its override status
#[must_use]
pub fn resolve_overrides(
    inherited: &Vector<BubbleValue>,
    local: &Vector<BubbleValue>,
    source_label: &str,
) -> Vec<ResolvedBubble> {
    let locals = authoritative_locals(local);
    inherited
        .iter()
        .map(|bubble| {
            let overridden_by = match registry::merge_strategy(bubble.bubble_type()) {
                MergeStrategy::Single => locals.get(&bubble.bubble_type()).copied(),
                MergeStrategy::Multiple => None,
            };
            ResolvedBubble {
                bubble: bubble.clone(),
                overridden: overridden_by.is_some(),
                overridden_by,
                source_label: source_label.to_string(),
            }
        })
        .collect()
}

/// Pick the one inherited source to display.
///
/// Candidates are ordered nearest first.
#[must_use]
pub fn select_source(candidates: &[InheritedSource]) -> Option<&InheritedSource> {
    candidates
        .iter()
        .find(|c| c.has_content())
        .or_else(|| candidates.last())
}

/// Select a source and resolve it against the local bubbles
#[must_use]
pub fn resolve_view(
    candidates: &[InheritedSource],
    local: &Vector<BubbleValue>,
) -> Option<InheritedView> {
    select_source(candidates).map(|source| InheritedView {
        scope: source.scope,
        source_label: source.label.clone(),
        bubbles: resolve_overrides(&source.bubbles, local, &source.label),
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// INHERITANCE CHAINS
// ═══════════════════════════════════════════════════════════════════════════

impl ConfigPanelState {
    fn collection_source(&self, ctx: &ResolutionContext<'_>) -> Option<InheritedSource> {
        self.apply_collection_inspiration.then(|| {
            InheritedSource::new(
                Scope::Collection,
                "Collection inspiration",
                ctx.collection_inspiration.clone(),
            )
        })
    }

    fn general_source(&self) -> InheritedSource {
        InheritedSource::new(
            Scope::General,
            "General inspiration",
            self.general_inspiration.clone(),
        )
    }

    fn category_sources(&self, ctx: &ResolutionContext<'_>) -> Vec<InheritedSource> {
        let Some(category_id) = ctx.active_category else {
            return Vec::new();
        };
        let name = ctx.catalog.category_name(category_id);
        let section = self.section_for_category(category_id).map(|section| {
            InheritedSource::new(
                Scope::Category,
                format!("Category: {name}"),
                section.bubbles.clone(),
            )
        });
        let defaults = ctx.catalog.category(category_id).map(|entry| {
            InheritedSource::new(
                Scope::Category,
                format!("Category defaults: {name}"),
                entry.default_bubbles.clone(),
            )
        });
        section.into_iter().chain(defaults).collect()
    }

    /// Inherited candidates for a target, nearest first
    #[must_use]
    pub fn inherited_candidates(
        &self,
        target: &ScopeTarget,
        ctx: &ResolutionContext<'_>,
    ) -> Vec<InheritedSource> {
        let outer: Vec<InheritedSource> = match target {
            ScopeTarget::General => Vec::new(),
            ScopeTarget::Section(_) => vec![self.general_source()],
            ScopeTarget::SceneType(_) => self
                .category_sources(ctx)
                .into_iter()
                .chain(std::iter::once(self.general_source()))
                .collect(),
        };
        outer
            .into_iter()
            .chain(self.collection_source(ctx))
            .collect()
    }

    /// Inherited view for a target.
    ///
    /// `None` when the target has no inherited scope or does not exist.
    #[must_use]
    pub fn inherited_view(
        &self,
        target: &ScopeTarget,
        ctx: &ResolutionContext<'_>,
    ) -> Option<InheritedView> {
        let empty = Vector::new();
        let local = match target {
            ScopeTarget::General => Some(&self.general_inspiration),
            ScopeTarget::Section(id) => self.section(id).map(|s| &s.bubbles),
            ScopeTarget::SceneType(key) => {
                Some(self.scene_type(key).map_or(&empty, |s| &s.bubbles))
            }
        }?;
        resolve_view(&self.inherited_candidates(target, ctx), local)
    }
}

#[cfg(test)]
mod tests {
    use im::vector;

    use super::*;
    use crate::bubble::{ImageSourceType, ReferenceImage};

    #[test]
    fn test_configured_local_overrides_single_type() {
        let inherited = vector![BubbleValue::style("Modern")];
        let local = vector![BubbleValue::style("Rustic")];
        let resolved = resolve_overrides(&inherited, &local, "Collection");
        assert_eq!(resolved.len(), 1);
        assert!(resolved[0].overridden);
        assert_eq!(resolved[0].overridden_by, Some(0));
        assert_eq!(resolved[0].source_label, "Collection");
    }

    #[test]
    fn test_placeholder_local_does_not_override() {
        let inherited = vector![BubbleValue::style("Modern")];
        let local = vector![BubbleValue::placeholder(BubbleType::Style)];
        let resolved = resolve_overrides(&inherited, &local, "Collection");
        assert!(!resolved[0].overridden);
        assert_eq!(resolved[0].overridden_by, None);
    }

    #[test]
    fn test_first_non_empty_local_is_authoritative() {
        let inherited = vector![BubbleValue::lighting("Soft")];
        let local = vector![
            BubbleValue::placeholder(BubbleType::Lighting),
            BubbleValue::style("Nordic"),
            BubbleValue::lighting("Dramatic"),
            BubbleValue::lighting("Neon"),
        ];
        let resolved = resolve_overrides(&inherited, &local, "General");
        assert_eq!(resolved[0].overridden_by, Some(2));
    }

    #[test]
    fn test_multiple_types_never_overridden() {
        let image = ReferenceImage::new("https://cdn.example/a.png", ImageSourceType::Url);
        let inherited = vector![
            BubbleValue::reference(image.clone()),
            BubbleValue::custom("matte finish")
        ];
        let local = vector![BubbleValue::reference(image), BubbleValue::custom("glossy")];
        let resolved = resolve_overrides(&inherited, &local, "General");
        assert!(resolved.iter().all(|r| !r.overridden));
    }

    #[test]
    fn test_select_source_prefers_nearest_with_content() {
        let category = InheritedSource::new(
            Scope::Category,
            "Category: Sofas",
            vector![BubbleValue::mood("Cozy")],
        );
        let general = InheritedSource::new(
            Scope::General,
            "General inspiration",
            vector![BubbleValue::style("Modern")],
        );
        let candidates = [category, general];
        assert_eq!(
            select_source(&candidates).map(|s| s.scope),
            Some(Scope::Category)
        );
    }

    #[test]
    fn test_select_source_falls_back_when_nearest_only_has_placeholders() {
        let category = InheritedSource::new(
            Scope::Category,
            "Category: Sofas",
            vector![BubbleValue::placeholder(BubbleType::Style)],
        );
        let general = InheritedSource::new(
            Scope::General,
            "General inspiration",
            vector![BubbleValue::style("Modern")],
        );
        let candidates = [category, general];
        assert_eq!(
            select_source(&candidates).map(|s| s.scope),
            Some(Scope::General)
        );
    }

    #[test]
    fn test_select_source_without_content_uses_outermost() {
        let candidates = [
            InheritedSource::new(Scope::Category, "Category: Beds", Vector::new()),
            InheritedSource::new(Scope::Collection, "Collection inspiration", Vector::new()),
        ];
        assert_eq!(
            select_source(&candidates).map(|s| s.scope),
            Some(Scope::Collection)
        );
        assert!(select_source(&[]).is_none());
    }

    #[test]
    fn test_view_applied_skips_overridden_and_empty() {
        let candidates = [InheritedSource::new(
            Scope::General,
            "General inspiration",
            vector![
                BubbleValue::style("Modern"),
                BubbleValue::mood("Calm"),
                BubbleValue::placeholder(BubbleType::Lighting)
            ],
        )];
        let local = vector![BubbleValue::style("Rustic")];
        let view = resolve_view(&candidates, &local);
        let applied: Vec<&BubbleValue> = view.iter().flat_map(InheritedView::applied).collect();
        assert_eq!(applied, vec![&BubbleValue::mood("Calm")]);
    }
}
