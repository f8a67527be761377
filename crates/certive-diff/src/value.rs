//! Value model for the difference engine
//!
//! Raw attribute data enters the engine through the closed `Value` type,
//! so the comparison logic matches exhaustively instead of probing runtime
//! types. A value is a scalar, a reference to a named domain entity, or an
//! unordered collection of values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a named domain entity (identity, entitlement, application).
///
/// Entities render through a fallback chain: display name, then identifier,
/// then the entity kind. Systems that cannot supply a display name still get
/// a usable summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity kind, e.g. "identity" or "entitlement".
    pub kind: String,
    /// Stable identifier in the owning system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-facing display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl EntityRef {
    /// Create a reference with only a kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            display_name: None,
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Display form: display name, else identifier, else the kind.
    pub fn display(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or(&self.kind)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A value under comparison, which may be single or multi-valued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value (null).
    Null,
    /// A single boolean value.
    Boolean(bool),
    /// A single integer value.
    Integer(i64),
    /// A single floating-point value.
    Float(f64),
    /// A single string value.
    String(String),
    /// A reference to a named domain entity.
    Entity(EntityRef),
    /// Multiple values, order not significant.
    Collection(Vec<Value>),
}

impl Value {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value counts as absent for comparison purposes.
    ///
    /// Null and the empty collection are equivalent here, so an attribute
    /// moving between "absent" and "empty list" is not reported as a change.
    pub fn is_absent(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Collection(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Check if this is multi-valued.
    pub fn is_collection(&self) -> bool {
        matches!(self, Value::Collection(_))
    }

    /// Get as a string if this is a single string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the elements if this is a collection.
    pub fn as_collection(&self) -> Option<&[Value]> {
        match self {
            Value::Collection(items) => Some(items),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<EntityRef> for Value {
    fn from(entity: EntityRef) -> Self {
        Value::Entity(entity)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(vec: Vec<T>) -> Self {
        Value::Collection(vec.into_iter().map(Into::into).collect())
    }
}
