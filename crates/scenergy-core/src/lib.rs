//! # Scenergy Core
//!
//! Hierarchical inspiration-settings engine for product image generation.
//!
//! Creative settings ("bubbles") are configured at nested scopes: collection,
//! general, category section and scene type. This crate holds the in-memory
//! state, its dirty-tracking transition table, the per-type merge strategies,
//! override resolution between scopes, and scene-type migration. It performs
//! no I/O apart from loading its own configuration.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//!
//! ## Error Handling
//!
//! Only boundary operations return `Result<T, Error>` (config loading,
//! hydration, key construction). Store transitions always succeed and report
//! what happened through [`ActionOutcome`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod bubble;
pub mod config;
mod error;
pub mod generation;
pub mod hydrate;
pub mod migration;
pub mod output;
pub mod registry;
pub mod resolution;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod tracking;

pub use bubble::{BubbleType, BubbleValue};
pub use config::{load_config, StudioConfig};
pub use error::{Error, Result};
pub use generation::GenerationPlan;
pub use output::{
    AspectRatio, OutputSettings, OutputSettingsPatch, OutputSettingsStore, Quality, VariantsCount,
    VariantsPolicy,
};
pub use registry::{BubbleDefinition, MergeStrategy};
pub use resolution::{Catalog, InheritedView, ResolutionContext, ResolvedBubble};
pub use state::{ConfigPanelState, InspirationSection, SceneTypeKey, ScopeTarget, SectionId};
pub use store::{Action, ActionOutcome, ConfigStore, StoreOptions, StoreState};
pub use tracking::{CleanOutcome, SaveTicket, Tracked};
