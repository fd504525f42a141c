//! Effective settings for one generation run
//!
//! Flattens the hierarchy for a target: the inherited bubbles that still apply
//! (non-empty, not overridden) followed by the target's own non-empty bubbles.

use im::Vector;
use serde::Serialize;

use crate::bubble::BubbleValue;
use crate::output::OutputSettings;
use crate::resolution::{ResolutionContext, Scope};
use crate::state::{ConfigPanelState, ScopeTarget};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPlan {
    pub target: ScopeTarget,
    /// Scope the inherited bubbles came from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited_scope: Option<Scope>,
    pub bubbles: Vector<BubbleValue>,
    pub prompt: String,
    pub output_settings: OutputSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_image_id: Option<String>,
}

impl GenerationPlan {
    /// Compose the plan for `target`.
    ///
    /// The collection prompt is prepended to the user prompt when
    /// `applyCollectionPrompt` is set and both are non-blank.
    #[must_use]
    pub fn build(
        state: &ConfigPanelState,
        target: &ScopeTarget,
        ctx: &ResolutionContext<'_>,
        collection_prompt: Option<&str>,
    ) -> Self {
        let view = state.inherited_view(target, ctx);
        let local = state.bubbles(target).cloned().unwrap_or_default();

        let bubbles = view
            .iter()
            .flat_map(|v| v.applied().cloned())
            .chain(local.into_iter().filter(|b| !b.is_empty()))
            .collect();

        tracing::debug!(scope = %target, "Built generation plan");

        Self {
            target: target.clone(),
            inherited_scope: view.as_ref().map(|v| v.scope),
            bubbles,
            prompt: effective_prompt(state, collection_prompt),
            output_settings: state.output_settings,
            base_image_id: state.selected_base_image_id.clone(),
        }
    }
}

fn effective_prompt(state: &ConfigPanelState, collection_prompt: Option<&str>) -> String {
    let user = state.user_prompt.trim();
    let collection = collection_prompt
        .filter(|_| state.apply_collection_prompt)
        .map(str::trim)
        .filter(|p| !p.is_empty());
    match (collection, user.is_empty()) {
        (Some(collection), true) => collection.to_string(),
        (Some(collection), false) => format!("{collection}\n{user}"),
        (None, _) => user.to_string(),
    }
}
