//! Lenient hydration of persisted panel records
//!
//! Bubble entries with an unknown `type` or a payload that does not match
//! their type are dropped with a warning; the rest of the record must be
//! well formed. Structural problems fail the whole record.

use serde::Deserialize;
use serde_json::Value;

use crate::bubble::BubbleValue;
use crate::registry;
use crate::state::ConfigPanelState;
use crate::Result;

/// A bubble entry dropped during hydration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBubble {
    /// JSON-pointer style location, e.g. `/inspirationSections/0/bubbles/2`
    pub path: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingType,
    UnknownType(String),
    MalformedPayload(String),
}

/// Hydrated state plus what was dropped on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hydrated {
    pub state: ConfigPanelState,
    pub skipped: Vec<SkippedBubble>,
}

/// Hydrate from a JSON string
///
/// # Errors
///
/// Returns `Error::Parse` for malformed JSON and `Error::Validation` when the
/// record violates a model constraint (empty section id, duplicate section ids)
pub fn from_json_str(json: &str) -> Result<Hydrated> {
    from_value(serde_json::from_str(json)?)
}

/// Hydrate from an already parsed JSON value
///
/// # Errors
///
/// Same as [`from_json_str`], minus syntax errors
pub fn from_value(mut value: Value) -> Result<Hydrated> {
    let mut skipped = Vec::new();

    if let Some(list) = value.get_mut("generalInspiration") {
        retain_known(list, "/generalInspiration", &mut skipped);
    }

    if let Some(Value::Array(sections)) = value.get_mut("inspirationSections") {
        sections.iter_mut().enumerate().for_each(|(i, section)| {
            if let Some(list) = section.get_mut("bubbles") {
                retain_known(list, &format!("/inspirationSections/{i}/bubbles"), &mut skipped);
            }
        });
    }

    if let Some(Value::Object(buckets)) = value.get_mut("sceneTypeInspiration") {
        buckets.iter_mut().for_each(|(key, bucket)| {
            if let Some(list) = bucket.get_mut("bubbles") {
                retain_known(
                    list,
                    &format!("/sceneTypeInspiration/{key}/bubbles"),
                    &mut skipped,
                );
            }
        });
    }

    let state: ConfigPanelState = serde_json::from_value(value)?;
    state.validate()?;

    if !skipped.is_empty() {
        tracing::warn!(count = skipped.len(), "Dropped unreadable bubbles while hydrating");
    }
    Ok(Hydrated { state, skipped })
}

fn retain_known(list: &mut Value, path: &str, skipped: &mut Vec<SkippedBubble>) {
    let Value::Array(items) = list else {
        return;
    };
    let taken = std::mem::take(items);
    *items = taken
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match check_bubble(&item) {
            Ok(()) => Some(item),
            Err(reason) => {
                let path = format!("{path}/{i}");
                tracing::warn!(path = %path, ?reason, "Skipping bubble");
                skipped.push(SkippedBubble { path, reason });
                None
            }
        })
        .collect();
}

fn check_bubble(item: &Value) -> std::result::Result<(), SkipReason> {
    let label = item
        .get("type")
        .and_then(Value::as_str)
        .ok_or(SkipReason::MissingType)?;
    if registry::lookup(label).is_none() {
        return Err(SkipReason::UnknownType(label.to_string()));
    }
    BubbleValue::deserialize(item)
        .map(|_| ())
        .map_err(|e| SkipReason::MalformedPayload(e.to_string()))
}
