//! Configuration type definitions
//!
//! Pure data holders. Every table is `#[serde(default)]` so a partial file
//! only overrides the keys it names.

use serde::{Deserialize, Serialize};

use crate::bubble::BubbleType;
use crate::output::{AspectRatio, Quality, VariantsPolicy};

// ═══════════════════════════════════════════════════════════════════════════
// MAIN CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════

/// Root configuration structure
///
/// Loaded from defaults → global → project → env vars
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StudioConfig {
    pub starter: StarterConfig,
    pub output: OutputConfig,
}

// ═══════════════════════════════════════════════════════════════════════════
// NESTED CONFIGURATION STRUCTURES
// ═══════════════════════════════════════════════════════════════════════════

/// Placeholder sets used by `InitializeDefault`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StarterConfig {
    /// Seeded into general inspiration and into empty sections
    pub general: Vec<BubbleType>,
    /// Seeded after the scene label bubble in an empty scene-type bucket
    pub scene_type: Vec<BubbleType>,
    pub scene_label: String,
}

/// Output defaults for new flows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub aspect_ratio: AspectRatio,
    pub quality: Quality,
    /// Raw count; resolved against `variants_policy` during validation
    pub variants_count: u32,
    pub variants_policy: VariantsPolicy,
}
