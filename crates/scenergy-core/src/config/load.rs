//! Configuration loading from files and environment (Immutable functional pattern)
//!
//! Sources, in order:
//! 1. Built-in defaults
//! 2. Global config: ~/.config/scenergy/config.toml
//! 3. Project config: .scenergy/config.toml
//! 4. Environment variables: SCENERGY_*

use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::types::StudioConfig;
use crate::bubble::BubbleType;
use crate::output::{AspectRatio, OutputError, Quality, VariantsPolicy};
use crate::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from all sources with hierarchy
///
/// # Errors
///
/// Returns error if:
/// - A config file is malformed TOML
/// - An environment override cannot be parsed
/// - Config values fail validation
pub fn load_config() -> Result<StudioConfig> {
    let config = StudioConfig::default();

    let config = match global_config_path() {
        Some(global_path) if global_path.exists() => {
            tracing::debug!(path = %global_path.display(), "Loading global config");
            config.merge(load_toml_file(&global_path)?)
        }
        _ => config,
    };

    let project_path = project_config_path()?;
    let config = if project_path.exists() {
        tracing::debug!(path = %project_path.display(), "Loading project config");
        config.merge(load_toml_file(&project_path)?)
    } else {
        config
    };

    let config = config.apply_env_vars()?;
    config.validate()?;
    Ok(config)
}

// ═══════════════════════════════════════════════════════════════════════════
// PATH HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Get path to global config file
#[must_use]
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "scenergy")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Get path to project config file
///
/// # Errors
///
/// Returns error if current directory cannot be determined
pub fn project_config_path() -> Result<PathBuf> {
    std::env::current_dir()
        .map(|dir| dir.join(".scenergy/config.toml"))
        .map_err(|e| Error::io_error(format!("Failed to get current directory: {e}")))
}

/// Load a TOML file into a partial `StudioConfig`
///
/// # Errors
///
/// Returns error if:
/// - Path is a directory instead of a file
/// - File cannot be read
/// - TOML is malformed
pub fn load_toml_file(path: &Path) -> Result<StudioConfig> {
    if path.is_dir() {
        return Err(Error::io_error(format!(
            "Config path is a directory, not a file: {}\n\
             Expected: .scenergy/config.toml (file)",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::io_error(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::parse_error(format!(
            "Failed to parse config file {}: {e}",
            path.display()
        ))
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// ENVIRONMENT VARIABLE OVERRIDES (Immutable pattern)
// ═══════════════════════════════════════════════════════════════════════════

impl StudioConfig {
    /// Apply `SCENERGY_*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns error if an environment variable value is invalid
    pub fn apply_env_vars(self) -> Result<Self> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns error if a variable value is invalid
    pub fn apply_env_with(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // SCENERGY_GENERAL_STARTER (comma separated bubble types)
        if let Some(value) = var("SCENERGY_GENERAL_STARTER") {
            self.starter.general = parse_bubble_list("SCENERGY_GENERAL_STARTER", &value)?;
        }

        // SCENERGY_SCENE_TYPE_STARTER
        if let Some(value) = var("SCENERGY_SCENE_TYPE_STARTER") {
            self.starter.scene_type = parse_bubble_list("SCENERGY_SCENE_TYPE_STARTER", &value)?;
        }

        // SCENERGY_SCENE_LABEL
        if let Some(value) = var("SCENERGY_SCENE_LABEL") {
            if value.trim().is_empty() {
                return Err(Error::invalid_config(
                    "SCENERGY_SCENE_LABEL cannot be empty - unset the variable or provide a label",
                ));
            }
            self.starter.scene_label = value;
        }

        // SCENERGY_ASPECT_RATIO
        if let Some(value) = var("SCENERGY_ASPECT_RATIO") {
            self.output.aspect_ratio = AspectRatio::from_str(value.trim())
                .map_err(|_| OutputError::UnknownAspectRatio(value.clone()))
                .map_err(|e| Error::invalid_config(format!("Invalid SCENERGY_ASPECT_RATIO: {e}")))?;
        }

        // SCENERGY_QUALITY
        if let Some(value) = var("SCENERGY_QUALITY") {
            self.output.quality = Quality::from_str(value.trim())
                .map_err(|_| OutputError::UnknownQuality(value.clone()))
                .map_err(|e| Error::invalid_config(format!("Invalid SCENERGY_QUALITY: {e}")))?;
        }

        // SCENERGY_VARIANTS_COUNT
        if let Some(value) = var("SCENERGY_VARIANTS_COUNT") {
            self.output.variants_count = value.trim().parse().map_err(|e| {
                Error::invalid_config(format!("Invalid SCENERGY_VARIANTS_COUNT value: {e}"))
            })?;
        }

        // SCENERGY_VARIANTS_POLICY
        if let Some(value) = var("SCENERGY_VARIANTS_POLICY") {
            self.output.variants_policy = VariantsPolicy::from_str(value.trim()).map_err(|e| {
                Error::invalid_config(format!("Invalid SCENERGY_VARIANTS_POLICY value: {e}"))
            })?;
        }

        Ok(self)
    }
}

fn parse_bubble_list(name: &str, value: &str) -> Result<Vec<BubbleType>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(|label| {
            BubbleType::from_str(label)
                .map_err(|_| Error::invalid_config(format!("{name}: unknown bubble type '{label}'")))
        })
        .collect()
}
