//! Difference records
//!
//! One `Difference` describes one detected change on one named attribute.
//! Instances exist only when a change was actually found; "no change" is the
//! absence of a record, never an empty one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stringify::truncate_chars;

/// Helper function for serde skip_serializing_if
fn is_false(value: &bool) -> bool {
    !*value
}

/// A detected change on a single attribute.
///
/// The `old_value`/`new_value` fields are bounded display summaries and are
/// not guaranteed to round-trip to the original values. For multi-valued
/// attributes, `added_values`/`removed_values` carry the exact element
/// summaries (up to the configured cap).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    /// Name of the changed attribute, set when the change is attached to an
    /// owning map or object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Human label; falls back to `attribute` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form qualifier, e.g. the owning sub-object name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Whether the compared attribute is multi-valued.
    #[serde(default, skip_serializing_if = "is_false")]
    pub multi: bool,
    /// Summary of the value before the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    /// Summary of the value after the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    /// Element summaries added to a multi-valued attribute.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added_values: Vec<String>,
    /// Element summaries removed from a multi-valued attribute.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_values: Vec<String>,
}

impl Difference {
    /// Create an empty record. Comparison operations fill it in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the record to a named attribute.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Set the human label.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the owning-context qualifier.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Label for rendering: display name, else the attribute name.
    pub fn label(&self) -> Option<&str> {
        self.display_name.as_deref().or(self.attribute.as_deref())
    }

    /// True when elements were added or removed.
    pub fn has_value_changes(&self) -> bool {
        !self.added_values.is_empty() || !self.removed_values.is_empty()
    }

    /// Return a copy with every summary field re-bounded to `max_len`
    /// characters (`0` leaves the record unchanged).
    pub fn truncated(&self, max_len: usize) -> Difference {
        Difference {
            old_value: self
                .old_value
                .as_deref()
                .map(|s| truncate_chars(s, max_len)),
            new_value: self
                .new_value
                .as_deref()
                .map(|s| truncate_chars(s, max_len)),
            added_values: self
                .added_values
                .iter()
                .map(|s| truncate_chars(s, max_len))
                .collect(),
            removed_values: self
                .removed_values
                .iter()
                .map(|s| truncate_chars(s, max_len))
                .collect(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.label().unwrap_or("value");
        match (self.old_value.as_deref(), self.new_value.as_deref()) {
            (Some(old), Some(new)) => write!(f, "{label}: {old} -> {new}"),
            (Some(old), None) => write!(f, "{label}: {old} -> (none)"),
            (None, Some(new)) => write!(f, "{label}: (none) -> {new}"),
            (None, None) => write!(f, "{label}: changed"),
        }
    }
}
