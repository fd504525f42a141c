//! Bubble type registry
//!
//! Static per-type dispatch table: emptiness predicate, merge strategy,
//! detachable content and display metadata. [`definition`] is total over
//! [`BubbleType`]; only string lookups ([`lookup`]) can miss, and a miss is
//! logged and reported as `None`.
//!
//! Adding a bubble type means adding a variant to [`BubbleType`], a payload to
//! [`BubbleValue`] and one `BubbleDefinition` here. The `match` in
//! [`definition`] is exhaustive, so a missing entry does not compile.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::bubble::{has_text, BubbleType, BubbleValue, ReferencePayload};

/// How an inherited bubble relates to a local bubble of the same type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// A configured local instance masks the inherited one
    Single,
    /// Inherited and local instances both apply
    Multiple,
}

/// Per-type registry entry.
#[derive(Debug, Clone, Copy)]
pub struct BubbleDefinition {
    pub bubble_type: BubbleType,
    pub label: &'static str,
    pub description: &'static str,
    pub merge_strategy: MergeStrategy,
    /// True when the bubble carries no user-meaningful content
    pub is_empty: fn(&BubbleValue) -> bool,
    /// Strips detachable content, returning the downgraded bubble when there
    /// was content to strip. `None` for types without detachable content.
    pub detach: Option<fn(&BubbleValue) -> Option<BubbleValue>>,
}

impl BubbleDefinition {
    /// Whether this type carries content that a first delete only clears
    #[must_use]
    pub const fn has_detachable_content(&self) -> bool {
        self.detach.is_some()
    }
}

fn preset_is_empty(value: &BubbleValue) -> bool {
    match value {
        BubbleValue::Style(p)
        | BubbleValue::Lighting(p)
        | BubbleValue::CameraAngle(p)
        | BubbleValue::Mood(p) => {
            !has_text(p.preset.as_ref()) && !has_text(p.custom_value.as_ref())
        }
        _ => true,
    }
}

fn color_palette_is_empty(value: &BubbleValue) -> bool {
    match value {
        BubbleValue::ColorPalette(p) => p.colors.iter().all(|c| c.trim().is_empty()),
        _ => true,
    }
}

fn reference_is_empty(value: &BubbleValue) -> bool {
    match value {
        BubbleValue::Reference(p) => p.image.is_none(),
        _ => true,
    }
}

fn custom_is_empty(value: &BubbleValue) -> bool {
    match value {
        BubbleValue::Custom(p) => !has_text(p.value.as_ref()),
        _ => true,
    }
}

fn detach_reference_image(value: &BubbleValue) -> Option<BubbleValue> {
    match value {
        BubbleValue::Reference(ReferencePayload { image: Some(_) }) => {
            Some(BubbleValue::Reference(ReferencePayload { image: None }))
        }
        _ => None,
    }
}

static STYLE: BubbleDefinition = BubbleDefinition {
    bubble_type: BubbleType::Style,
    label: "Style",
    description: "Overall visual style of the scene",
    merge_strategy: MergeStrategy::Single,
    is_empty: preset_is_empty,
    detach: None,
};

static LIGHTING: BubbleDefinition = BubbleDefinition {
    bubble_type: BubbleType::Lighting,
    label: "Lighting",
    description: "Light quality, direction and time of day",
    merge_strategy: MergeStrategy::Single,
    is_empty: preset_is_empty,
    detach: None,
};

static CAMERA_ANGLE: BubbleDefinition = BubbleDefinition {
    bubble_type: BubbleType::CameraAngle,
    label: "Camera Angle",
    description: "Viewpoint and framing of the product",
    merge_strategy: MergeStrategy::Single,
    is_empty: preset_is_empty,
    detach: None,
};

static MOOD: BubbleDefinition = BubbleDefinition {
    bubble_type: BubbleType::Mood,
    label: "Mood",
    description: "Emotional tone of the scene",
    merge_strategy: MergeStrategy::Single,
    is_empty: preset_is_empty,
    detach: None,
};

static COLOR_PALETTE: BubbleDefinition = BubbleDefinition {
    bubble_type: BubbleType::ColorPalette,
    label: "Color Palette",
    description: "Dominant colors for the scene",
    merge_strategy: MergeStrategy::Single,
    is_empty: color_palette_is_empty,
    detach: None,
};

static REFERENCE: BubbleDefinition = BubbleDefinition {
    bubble_type: BubbleType::Reference,
    label: "Reference",
    description: "Reference image to draw inspiration from",
    merge_strategy: MergeStrategy::Multiple,
    is_empty: reference_is_empty,
    detach: Some(detach_reference_image),
};

static CUSTOM: BubbleDefinition = BubbleDefinition {
    bubble_type: BubbleType::Custom,
    label: "Custom",
    description: "Free-form instruction",
    merge_strategy: MergeStrategy::Multiple,
    is_empty: custom_is_empty,
    detach: None,
};

static DEFINITIONS: [&BubbleDefinition; 7] = [
    &STYLE,
    &LIGHTING,
    &CAMERA_ANGLE,
    &MOOD,
    &COLOR_PALETTE,
    &REFERENCE,
    &CUSTOM,
];

/// Registry entry for a bubble type
#[must_use]
pub fn definition(bubble_type: BubbleType) -> &'static BubbleDefinition {
    match bubble_type {
        BubbleType::Style => &STYLE,
        BubbleType::Lighting => &LIGHTING,
        BubbleType::CameraAngle => &CAMERA_ANGLE,
        BubbleType::Mood => &MOOD,
        BubbleType::ColorPalette => &COLOR_PALETTE,
        BubbleType::Reference => &REFERENCE,
        BubbleType::Custom => &CUSTOM,
    }
}

/// Look up a definition by its wire label (e.g. `"camera-angle"`).
///
/// Unknown labels are non-fatal: a warning is logged and `None` returned so
/// callers can skip the entry.
pub fn lookup(label: &str) -> Option<&'static BubbleDefinition> {
    BubbleType::from_str(label).map(definition).map_or_else(
        |_| {
            tracing::warn!(bubble_type = label, "Unknown bubble type, skipping");
            None
        },
        Some,
    )
}

/// All definitions in display order
#[must_use]
pub fn list_definitions() -> &'static [&'static BubbleDefinition] {
    &DEFINITIONS
}

/// Merge strategy for a bubble type
#[must_use]
pub fn merge_strategy(bubble_type: BubbleType) -> MergeStrategy {
    definition(bubble_type).merge_strategy
}
