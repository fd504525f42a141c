//! Configuration merging logic (Immutable functional pattern)
//!
//! Later configs override earlier ones (defaults → global → project → env).
//! A layer field equal to its built-in default is treated as "not set" and
//! keeps the lower layer's value. A higher layer therefore cannot put a field
//! back to its default once a lower layer changed it: a project file with
//! `quality = "2k"` leaves a global `quality = "4k"` in place. Use the
//! `SCENERGY_*` variables or edit the lower layer instead.

use super::defaults::{DEFAULT_GENERAL_STARTER, DEFAULT_SCENE_LABEL, DEFAULT_SCENE_TYPE_STARTER};
use super::types::{OutputConfig, StarterConfig, StudioConfig};

// ═══════════════════════════════════════════════════════════════════════════
// MERGE IMPLEMENTATIONS (Immutable pattern)
// ═══════════════════════════════════════════════════════════════════════════

impl StudioConfig {
    /// Merge another config into this one (other takes precedence)
    ///
    /// Starter lists are replaced wholesale, never appended.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            starter: self.starter.merge(other.starter),
            output: self.output.merge(other.output),
        }
    }
}

impl StarterConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            general: if other.general.as_slice() == DEFAULT_GENERAL_STARTER {
                self.general
            } else {
                other.general
            },
            scene_type: if other.scene_type.as_slice() == DEFAULT_SCENE_TYPE_STARTER {
                self.scene_type
            } else {
                other.scene_type
            },
            scene_label: if other.scene_label == DEFAULT_SCENE_LABEL {
                self.scene_label
            } else {
                other.scene_label
            },
        }
    }
}

impl OutputConfig {
    fn merge(self, other: Self) -> Self {
        let defaults = Self::default();
        Self {
            aspect_ratio: if other.aspect_ratio == defaults.aspect_ratio {
                self.aspect_ratio
            } else {
                other.aspect_ratio
            },
            quality: if other.quality == defaults.quality {
                self.quality
            } else {
                other.quality
            },
            variants_count: if other.variants_count == defaults.variants_count {
                self.variants_count
            } else {
                other.variants_count
            },
            variants_policy: if other.variants_policy == defaults.variants_policy {
                self.variants_policy
            } else {
                other.variants_policy
            },
        }
    }
}
