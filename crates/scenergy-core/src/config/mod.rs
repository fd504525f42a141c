//! Studio configuration loading and management
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: ~/.config/scenergy/config.toml
//! 3. Project config: .scenergy/config.toml
//! 4. Environment variables: SCENERGY_*
//!
//! # Example Config
//!
//! ```toml
//! [starter]
//! general = ["style", "lighting", "mood"]
//! scene_type = ["style", "lighting", "camera-angle"]
//! scene_label = "Scene type"
//!
//! [output]
//! aspect_ratio = "16:9"
//! quality = "4k"
//! variants_count = 3
//! variants_policy = "clamp"
//! ```
//!
//! # Module Structure
//!
//! - `types`: Configuration structure definitions
//! - `defaults`: Default value implementations
//! - `load`: Loading from files and environment
//! - `merge`: Configuration merging logic
//! - `validate`: Validation and conversion into runtime settings

mod defaults;
mod load;
mod merge;
mod types;
mod validate;

#[cfg(test)]
mod tests_defaults;
#[cfg(test)]
mod tests_loading;
#[cfg(test)]
mod tests_validation;

pub use load::{global_config_path, load_config, load_toml_file, project_config_path};
pub use types::{OutputConfig, StarterConfig, StudioConfig};
