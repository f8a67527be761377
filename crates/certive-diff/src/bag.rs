//! Named attribute maps
//!
//! An `AttributeBag` is one version of an object's attributes, keyed by
//! attribute name. Two bags are the unit of comparison for the map differ.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::value::Value;

/// A map of attribute name to value, e.g. one snapshot of an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeBag {
    /// Map of attribute name to attribute value(s).
    #[serde(flatten)]
    attributes: HashMap<String, Value>,
}

impl AttributeBag {
    /// Create a new empty attribute bag.
    pub fn new() -> Self {
        Self {
            attributes: HashMap::new(),
        }
    }

    /// Set an attribute value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Set an attribute using builder pattern.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Get a single-valued string attribute.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Check if an attribute exists.
    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Remove an attribute.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    /// Get all attribute names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Get the number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate over all attributes.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.attributes.iter()
    }

    /// Convert to a `HashMap`.
    pub fn into_map(self) -> HashMap<String, Value> {
        self.attributes
    }
}

impl FromIterator<(String, Value)> for AttributeBag {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let bag = AttributeBag::new()
            .with("email", "ada@example.com")
            .with("logins", 42i64)
            .with("active", true);

        assert_eq!(bag.get_string("email"), Some("ada@example.com"));
        assert_eq!(bag.get("logins"), Some(&Value::Integer(42)));
        assert!(bag.has("active"));
        assert!(!bag.has("missing"));
        assert_eq!(bag.len(), 3);
    }

    #[test]
    fn test_remove() {
        let mut bag = AttributeBag::new().with("email", "ada@example.com");
        assert_eq!(
            bag.remove("email"),
            Some(Value::String("ada@example.com".to_string()))
        );
        assert!(bag.is_empty());
    }

    #[test]
    fn test_flattened_serialization() {
        let bag = AttributeBag::new()
            .with("email", "ada@example.com")
            .with("groups", vec!["admins", "users"]);

        let json = serde_json::to_string(&bag).unwrap();
        let parsed: AttributeBag = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.get_string("email"), Some("ada@example.com"));
        assert_eq!(
            parsed.get("groups"),
            Some(&Value::from(vec!["admins", "users"]))
        );
    }

    #[test]
    fn test_from_iterator() {
        let bag: AttributeBag = vec![
            ("a".to_string(), Value::from(1i64)),
            ("b".to_string(), Value::from(2i64)),
        ]
        .into_iter()
        .collect();

        assert_eq!(bag.len(), 2);
        assert_eq!(bag.get("b"), Some(&Value::Integer(2)));
    }
}
