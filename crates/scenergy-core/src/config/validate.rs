//! Configuration validation

use itertools::Itertools;

use super::types::{OutputConfig, StudioConfig};
use crate::bubble::BubbleType;
use crate::output::{OutputSettings, VariantsCount};
use crate::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// VALIDATION LOGIC
// ═══════════════════════════════════════════════════════════════════════════

impl StudioConfig {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if a starter list is empty or repeats a type, the scene
    /// label is blank, or the variants count is rejected by its policy
    pub fn validate(&self) -> Result<()> {
        validate_starter("starter.general", &self.starter.general)?;
        validate_starter("starter.scene_type", &self.starter.scene_type)?;

        if self.starter.scene_label.trim().is_empty() {
            return Err(Error::validation_error(
                "starter.scene_label cannot be empty".to_string(),
            ));
        }

        self.output.output_settings().map(|_| ())
    }
}

impl OutputConfig {
    /// Resolve into runtime output settings, applying the variants policy
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the count is out of domain under `reject`
    pub fn output_settings(&self) -> Result<OutputSettings> {
        let variants_count = VariantsCount::with_policy(self.variants_count, self.variants_policy)?;
        if variants_count.get() != self.variants_count {
            tracing::warn!(
                requested = self.variants_count,
                resolved = variants_count.get(),
                "Clamped variants count"
            );
        }
        Ok(OutputSettings {
            aspect_ratio: self.aspect_ratio,
            quality: self.quality,
            variants_count,
        })
    }
}

fn validate_starter(name: &str, starter: &[BubbleType]) -> Result<()> {
    if starter.is_empty() {
        return Err(Error::validation_error(format!(
            "{name} must list at least one bubble type"
        )));
    }
    match starter.iter().duplicates().next() {
        Some(duplicate) => Err(Error::validation_error(format!(
            "{name} lists '{duplicate}' more than once"
        ))),
        None => Ok(()),
    }
}
