//! Default configuration values

use super::types::{OutputConfig, StarterConfig, StudioConfig};
use crate::bubble::BubbleType;
use crate::output::{AspectRatio, Quality, VariantsCount, VariantsPolicy};

/// Label carried by the synthesized scene-name bubble
pub(super) const DEFAULT_SCENE_LABEL: &str = "Scene type";

pub(super) const DEFAULT_GENERAL_STARTER: [BubbleType; 3] =
    [BubbleType::Style, BubbleType::Lighting, BubbleType::Mood];

pub(super) const DEFAULT_SCENE_TYPE_STARTER: [BubbleType; 3] = [
    BubbleType::Style,
    BubbleType::Lighting,
    BubbleType::CameraAngle,
];

// ═══════════════════════════════════════════════════════════════════════════
// DEFAULT IMPLEMENTATIONS
// ═══════════════════════════════════════════════════════════════════════════

#[allow(clippy::derivable_impls)]
impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            starter: StarterConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for StarterConfig {
    fn default() -> Self {
        Self {
            general: DEFAULT_GENERAL_STARTER.to_vec(),
            scene_type: DEFAULT_SCENE_TYPE_STARTER.to_vec(),
            scene_label: DEFAULT_SCENE_LABEL.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::default(),
            quality: Quality::default(),
            variants_count: VariantsCount::ONE.get(),
            variants_policy: VariantsPolicy::default(),
        }
    }
}
