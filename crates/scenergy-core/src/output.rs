//! Output settings
//!
//! Flat enumerated generation settings: aspect ratio, quality and number of
//! variants. `OutputSettingsStore` tracks them with the same dirty contract as
//! the inspiration store: every `set` marks dirty, even with identical values.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

use crate::config::OutputConfig;
use crate::tracking::{CleanOutcome, SaveTicket, Tracked};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutputError {
    #[error("variants count {0} is not one of 1, 2, 4")]
    VariantsOutOfDomain(u32),

    #[error("unknown aspect ratio: {0}")]
    UnknownAspectRatio(String),

    #[error("unknown quality: {0}")]
    UnknownQuality(String),
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum AspectRatio {
    #[default]
    #[strum(serialize = "1:1")]
    #[serde(rename = "1:1")]
    Square,
    #[strum(serialize = "16:9")]
    #[serde(rename = "16:9")]
    Widescreen,
    #[strum(serialize = "9:16")]
    #[serde(rename = "9:16")]
    Vertical,
    #[strum(serialize = "4:3")]
    #[serde(rename = "4:3")]
    Standard,
    #[strum(serialize = "3:4")]
    #[serde(rename = "3:4")]
    Portrait,
    #[strum(serialize = "3:2")]
    #[serde(rename = "3:2")]
    Photo,
    #[strum(serialize = "2:3")]
    #[serde(rename = "2:3")]
    PhotoPortrait,
    #[strum(serialize = "21:9")]
    #[serde(rename = "21:9")]
    Ultrawide,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum Quality {
    #[strum(serialize = "1k")]
    #[serde(rename = "1k")]
    OneK,
    #[default]
    #[strum(serialize = "2k")]
    #[serde(rename = "2k")]
    TwoK,
    #[strum(serialize = "4k")]
    #[serde(rename = "4k")]
    FourK,
}

/// What to do with a variants count outside `{1, 2, 4}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VariantsPolicy {
    #[default]
    Reject,
    /// Snap down to the largest allowed count, never below 1
    Clamp,
}

/// Number of images per generation. Always one of `{1, 2, 4}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct VariantsCount(u32);

impl VariantsCount {
    pub const ALLOWED: [u32; 3] = [1, 2, 4];
    pub const ONE: Self = Self(1);

    pub fn new(count: u32) -> Result<Self, OutputError> {
        Self::with_policy(count, VariantsPolicy::Reject)
    }

    pub fn with_policy(count: u32, policy: VariantsPolicy) -> Result<Self, OutputError> {
        if Self::ALLOWED.contains(&count) {
            return Ok(Self(count));
        }
        match policy {
            VariantsPolicy::Reject => Err(OutputError::VariantsOutOfDomain(count)),
            VariantsPolicy::Clamp => Ok(Self(
                Self::ALLOWED
                    .iter()
                    .copied()
                    .filter(|allowed| *allowed <= count)
                    .max()
                    .unwrap_or(1),
            )),
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for VariantsCount {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for VariantsCount {
    type Error = OutputError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VariantsCount> for u32 {
    fn from(value: VariantsCount) -> Self {
        value.0
    }
}

impl std::fmt::Display for VariantsCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSettings {
    pub aspect_ratio: AspectRatio,
    pub quality: Quality,
    pub variants_count: VariantsCount,
}

/// Any subset of output fields; absent fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants_count: Option<VariantsCount>,
}

impl OutputSettingsPatch {
    #[must_use]
    pub const fn aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    #[must_use]
    pub const fn quality(mut self, quality: Quality) -> Self {
        self.quality = Some(quality);
        self
    }

    #[must_use]
    pub const fn variants_count(mut self, variants_count: VariantsCount) -> Self {
        self.variants_count = Some(variants_count);
        self
    }
}

impl OutputSettings {
    /// Merge a patch over these settings - immutable pattern
    #[must_use]
    pub fn apply(self, patch: OutputSettingsPatch) -> Self {
        Self {
            aspect_ratio: patch.aspect_ratio.unwrap_or(self.aspect_ratio),
            quality: patch.quality.unwrap_or(self.quality),
            variants_count: patch.variants_count.unwrap_or(self.variants_count),
        }
    }
}

/// Tracked output settings, usable independently of the inspiration store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputSettingsStore {
    state: Tracked<OutputSettings>,
}

impl OutputSettingsStore {
    #[must_use]
    pub fn new(initial: OutputSettings) -> Self {
        Self {
            state: Tracked::new(initial),
        }
    }

    /// Clean store starting from the configured output defaults
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the variants count is rejected by its policy
    pub fn from_config(config: &OutputConfig) -> crate::Result<Self> {
        config.output_settings().map(Self::new)
    }

    #[must_use]
    pub const fn current(&self) -> &OutputSettings {
        self.state.current()
    }

    #[must_use]
    pub const fn original(&self) -> &OutputSettings {
        self.state.original()
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    /// Merge a patch; always marks dirty
    pub fn set(&mut self, patch: OutputSettingsPatch) {
        self.state = self.state.mutate(|settings| settings.apply(patch));
    }

    pub fn mark_clean(&mut self) {
        self.state = self.state.mark_clean();
    }

    pub fn reset(&mut self, settings: OutputSettings) {
        self.state = self.state.reset(settings);
    }

    #[must_use]
    pub fn begin_save(&self) -> SaveTicket<OutputSettings> {
        self.state.save_ticket()
    }

    pub fn complete_save(&mut self, ticket: SaveTicket<OutputSettings>) -> CleanOutcome {
        let (state, outcome) = self.state.mark_saved(ticket);
        self.state = state;
        outcome
    }
}
