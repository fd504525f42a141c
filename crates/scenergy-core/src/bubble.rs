//! Bubble data model
//!
//! A bubble is one typed creative setting. The discriminant alone decides which
//! payload fields are meaningful:
//! - `style`, `lighting`, `camera-angle`, `mood`: a preset or a free-text value
//! - `color-palette`: an ordered list of colors
//! - `reference`: an optional reference image
//! - `custom`: a free-text value with an optional label
//!
//! Serialized form is internally tagged on `"type"`:
//!
//! ```json
//! { "type": "style", "preset": "Modern" }
//! { "type": "reference", "image": { "url": "https://…", "sourceType": "upload", "addedAt": "…" } }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::registry;

/// Closed set of bubble discriminants.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BubbleType {
    Style,
    Lighting,
    CameraAngle,
    Mood,
    ColorPalette,
    Reference,
    Custom,
}

/// Payload shared by the preset-or-free-text bubble types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_value: Option<String>,
}

impl PresetPayload {
    /// Payload selecting a named preset
    #[must_use]
    pub fn preset(preset: impl Into<String>) -> Self {
        Self {
            preset: Some(preset.into()),
            custom_value: None,
        }
    }

    /// Payload carrying a free-text value
    #[must_use]
    pub fn custom(value: impl Into<String>) -> Self {
        Self {
            preset: None,
            custom_value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalettePayload {
    #[serde(default)]
    pub colors: Vec<String>,
}

/// Where a reference image came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ImageSourceType {
    Upload,
    Library,
    Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceImage {
    pub url: String,
    pub source_type: ImageSourceType,
    pub added_at: DateTime<Utc>,
}

impl ReferenceImage {
    /// Create a reference image stamped with the current time
    #[must_use]
    pub fn new(url: impl Into<String>, source_type: ImageSourceType) -> Self {
        Self {
            url: url.into(),
            source_type,
            added_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ReferenceImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A single typed creative setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BubbleValue {
    Style(PresetPayload),
    Lighting(PresetPayload),
    CameraAngle(PresetPayload),
    Mood(PresetPayload),
    ColorPalette(ColorPalettePayload),
    Reference(ReferencePayload),
    Custom(CustomPayload),
}

impl BubbleValue {
    /// Discriminant of this bubble
    #[must_use]
    pub const fn bubble_type(&self) -> BubbleType {
        match self {
            Self::Style(_) => BubbleType::Style,
            Self::Lighting(_) => BubbleType::Lighting,
            Self::CameraAngle(_) => BubbleType::CameraAngle,
            Self::Mood(_) => BubbleType::Mood,
            Self::ColorPalette(_) => BubbleType::ColorPalette,
            Self::Reference(_) => BubbleType::Reference,
            Self::Custom(_) => BubbleType::Custom,
        }
    }

    /// A bubble of the given type with no configured content
    #[must_use]
    pub fn placeholder(bubble_type: BubbleType) -> Self {
        match bubble_type {
            BubbleType::Style => Self::Style(PresetPayload::default()),
            BubbleType::Lighting => Self::Lighting(PresetPayload::default()),
            BubbleType::CameraAngle => Self::CameraAngle(PresetPayload::default()),
            BubbleType::Mood => Self::Mood(PresetPayload::default()),
            BubbleType::ColorPalette => Self::ColorPalette(ColorPalettePayload::default()),
            BubbleType::Reference => Self::Reference(ReferencePayload::default()),
            BubbleType::Custom => Self::Custom(CustomPayload::default()),
        }
    }

    #[must_use]
    pub fn style(preset: impl Into<String>) -> Self {
        Self::Style(PresetPayload::preset(preset))
    }

    #[must_use]
    pub fn lighting(preset: impl Into<String>) -> Self {
        Self::Lighting(PresetPayload::preset(preset))
    }

    #[must_use]
    pub fn mood(preset: impl Into<String>) -> Self {
        Self::Mood(PresetPayload::preset(preset))
    }

    #[must_use]
    pub fn camera_angle(preset: impl Into<String>) -> Self {
        Self::CameraAngle(PresetPayload::preset(preset))
    }

    #[must_use]
    pub fn color_palette<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ColorPalette(ColorPalettePayload {
            colors: colors.into_iter().map(Into::into).collect(),
        })
    }

    #[must_use]
    pub fn reference(image: ReferenceImage) -> Self {
        Self::Reference(ReferencePayload { image: Some(image) })
    }

    #[must_use]
    pub fn custom(value: impl Into<String>) -> Self {
        Self::Custom(CustomPayload {
            value: Some(value.into()),
            label: None,
        })
    }

    /// Custom bubble carrying a scene-type name under a fixed label.
    ///
    /// An empty scene name yields a placeholder (labelled, no value).
    #[must_use]
    pub fn scene_label(label: impl Into<String>, scene_name: &str) -> Self {
        Self::Custom(CustomPayload {
            value: (!scene_name.trim().is_empty()).then(|| scene_name.to_string()),
            label: Some(label.into()),
        })
    }

    /// Labelled custom bubble with no value, as seeded for the unselected scene
    #[must_use]
    pub fn is_blank_scene_label(&self) -> bool {
        matches!(self, Self::Custom(payload) if payload.label.is_some() && !has_text(payload.value.as_ref()))
    }

    /// True when the bubble carries no user-meaningful content
    #[must_use]
    pub fn is_empty(&self) -> bool {
        (registry::definition(self.bubble_type()).is_empty)(self)
    }
}

/// True when the text is present and not blank
pub(crate) fn has_text(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}
