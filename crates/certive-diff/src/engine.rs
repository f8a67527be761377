//! Comparison engine
//!
//! Three layers, all stateless per call:
//!
//! - [`DiffEngine::diff_values`] decides whether two arbitrary values differ,
//!   normalizing null/empty and coercing a lone scalar against a collection.
//! - [`DiffEngine::diff_collections`] reconciles two unordered collections,
//!   optionally matching strings case-insensitively.
//! - [`DiffEngine::diff_bags`] applies the value differ across two attribute
//!   bags with key exclusions and an early-exit cap.
//!
//! The engine performs no I/O and holds no shared mutable state; concurrent
//! use on disjoint inputs is safe.

use std::collections::HashSet;

use crate::bag::AttributeBag;
use crate::config::DiffConfig;
use crate::difference::Difference;
use crate::stringify::{stringify, stringify_collection};
use crate::value::Value;

const NULL: Value = Value::Null;

/// Value-comparison engine bound to one [`DiffConfig`].
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: DiffConfig,
}

impl DiffEngine {
    /// Create an engine with the given bounds.
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    /// The bounds this engine applies.
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compare two values, returning `None` when they do not differ.
    ///
    /// Null and the empty collection both count as absence, so an attribute
    /// moving between the two is not a change. When exactly one side is a
    /// collection, the scalar side is coerced to a singleton collection
    /// before reconciliation, so `"A"` against `["A"]` is not a change
    /// either.
    pub fn diff_values(
        &self,
        old: &Value,
        new: &Value,
        case_insensitive: bool,
    ) -> Option<Difference> {
        match (old.is_absent(), new.is_absent()) {
            (true, true) => None,
            (true, false) => Some(self.appeared(new)),
            (false, true) => Some(self.disappeared(old)),
            (false, false) => match (old, new) {
                (Value::Collection(old_items), Value::Collection(new_items)) => {
                    self.diff_collections(old_items, new_items, case_insensitive)
                }
                (Value::Collection(old_items), scalar) => {
                    self.diff_collections(old_items, std::slice::from_ref(scalar), case_insensitive)
                }
                (scalar, Value::Collection(new_items)) => {
                    self.diff_collections(std::slice::from_ref(scalar), new_items, case_insensitive)
                }
                (old_scalar, new_scalar) => {
                    if old_scalar == new_scalar {
                        return None;
                    }
                    Some(Difference {
                        old_value: stringify(old_scalar, self.config.max_string_len),
                        new_value: stringify(new_scalar, self.config.max_string_len),
                        ..Default::default()
                    })
                }
            },
        }
    }

    /// Reconcile two unordered collections, returning `None` when they hold
    /// the same elements.
    ///
    /// Order and duplication are reconciled by removal: each old element
    /// consumes at most one matching element from a working copy of `new`.
    /// With `case_insensitive` set, a string element that has no exact match
    /// consumes the first remaining string equal under per-character
    /// lowercase comparison; when several near-duplicate-case entries are
    /// present, which one is consumed follows the working list's scan order.
    ///
    /// The result carries both full-collection summaries (`old_value` /
    /// `new_value`) for skimming and the exact added/removed element
    /// summaries for reconciliation, the latter capped at the configured
    /// `max_value_count`. Linear removal scans make this O(n·m); attribute
    /// collections are expected to be small.
    pub fn diff_collections(
        &self,
        old: &[Value],
        new: &[Value],
        case_insensitive: bool,
    ) -> Option<Difference> {
        let max_len = self.config.max_string_len;
        let mut remaining: Vec<Value> = new.to_vec();
        let mut removed: Vec<String> = Vec::new();

        for element in old {
            if let Some(pos) = remaining.iter().position(|candidate| candidate == element) {
                remaining.remove(pos);
                continue;
            }
            if case_insensitive {
                if let Value::String(text) = element {
                    let pos = remaining.iter().position(|candidate| {
                        matches!(candidate, Value::String(other) if eq_ignore_case(other, text))
                    });
                    if let Some(pos) = pos {
                        remaining.remove(pos);
                        continue;
                    }
                }
            }
            if let Some(summary) = stringify(element, max_len) {
                removed.push(summary);
            }
        }

        let added: Vec<String> = remaining
            .iter()
            .filter_map(|value| stringify(value, max_len))
            .collect();

        if added.is_empty() && removed.is_empty() {
            return None;
        }

        Some(Difference {
            multi: true,
            old_value: Some(stringify_collection(old, max_len)),
            new_value: Some(stringify_collection(new, max_len)),
            added_values: self.cap_values(added),
            removed_values: self.cap_values(removed),
            ..Default::default()
        })
    }

    /// Compare two attribute bags key by key.
    ///
    /// Keys listed in `exclusions` are skipped in both directions. Keys
    /// present on only one side contribute appeared/disappeared records,
    /// provided their value is not absent. Returns `None` when nothing
    /// differs, never an empty list.
    ///
    /// A positive `max_diffs` stops the scan once that many records exist.
    /// This serves fast boolean checks; a capped result is not a complete
    /// inventory of the remaining differences.
    pub fn diff_bags(
        &self,
        old: Option<&AttributeBag>,
        new: Option<&AttributeBag>,
        exclusions: &[&str],
        max_diffs: usize,
    ) -> Option<Vec<Difference>> {
        let mut diffs: Vec<Difference> = Vec::new();

        match (old, new) {
            (None, None) => {}
            (None, Some(new_bag)) => {
                self.collect_one_sided(new_bag, exclusions, max_diffs, false, &mut diffs);
            }
            (Some(old_bag), None) => {
                self.collect_one_sided(old_bag, exclusions, max_diffs, true, &mut diffs);
            }
            (Some(old_bag), Some(new_bag)) => {
                let mut unseen: HashSet<&str> = new_bag.names().collect();

                for (key, old_value) in old_bag.iter() {
                    if reached_cap(max_diffs, diffs.len()) {
                        break;
                    }
                    if exclusions.contains(&key.as_str()) {
                        continue;
                    }
                    unseen.remove(key.as_str());
                    let new_value = new_bag.get(key).unwrap_or(&NULL);
                    if let Some(diff) = self.diff_values(old_value, new_value, false) {
                        diffs.push(diff.with_attribute(key.as_str()));
                    }
                }

                for (key, new_value) in new_bag.iter() {
                    if reached_cap(max_diffs, diffs.len()) {
                        break;
                    }
                    if !unseen.contains(key.as_str()) || exclusions.contains(&key.as_str()) {
                        continue;
                    }
                    if let Some(diff) = self.diff_values(&NULL, new_value, false) {
                        diffs.push(diff.with_attribute(key.as_str()));
                    }
                }
            }
        }

        if diffs.is_empty() {
            return None;
        }
        tracing::debug!(
            count = diffs.len(),
            capped = reached_cap(max_diffs, diffs.len()),
            "detected attribute differences"
        );
        Some(diffs)
    }

    /// Check whether two attribute bags hold the same values.
    ///
    /// Uses a comparison cap of one: the first difference settles the
    /// answer without scanning the rest.
    pub fn bags_equal(&self, a: Option<&AttributeBag>, b: Option<&AttributeBag>) -> bool {
        self.diff_bags(a, b, &[], 1).is_none()
    }

    /// Record every present attribute of a lone bag as appeared or
    /// disappeared.
    fn collect_one_sided(
        &self,
        bag: &AttributeBag,
        exclusions: &[&str],
        max_diffs: usize,
        disappeared: bool,
        diffs: &mut Vec<Difference>,
    ) {
        for (key, value) in bag.iter() {
            if reached_cap(max_diffs, diffs.len()) {
                break;
            }
            if exclusions.contains(&key.as_str()) {
                continue;
            }
            let diff = if disappeared {
                self.diff_values(value, &NULL, false)
            } else {
                self.diff_values(&NULL, value, false)
            };
            if let Some(diff) = diff {
                diffs.push(diff.with_attribute(key.as_str()));
            }
        }
    }

    /// Record a value that appeared (no old side).
    fn appeared(&self, new: &Value) -> Difference {
        let mut diff = Difference {
            new_value: stringify(new, self.config.max_string_len),
            ..Default::default()
        };
        if let Value::Collection(items) = new {
            diff.multi = true;
            diff.added_values = self.cap_values(self.summarize(items));
        }
        diff
    }

    /// Record a value that disappeared (no new side).
    fn disappeared(&self, old: &Value) -> Difference {
        let mut diff = Difference {
            old_value: stringify(old, self.config.max_string_len),
            ..Default::default()
        };
        if let Value::Collection(items) = old {
            diff.multi = true;
            diff.removed_values = self.cap_values(self.summarize(items));
        }
        diff
    }

    fn summarize(&self, items: &[Value]) -> Vec<String> {
        items
            .iter()
            .filter_map(|value| stringify(value, self.config.max_string_len))
            .collect()
    }

    fn cap_values(&self, mut values: Vec<String>) -> Vec<String> {
        let max = self.config.max_value_count;
        if max > 0 && values.len() > max {
            values.truncate(max);
        }
        values
    }
}

fn reached_cap(max_diffs: usize, produced: usize) -> bool {
    max_diffs > 0 && produced >= max_diffs
}

/// Per-character lowercase comparison, independent of any locale.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().flat_map(char::to_lowercase).eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::EntityRef;

    fn engine() -> DiffEngine {
        DiffEngine::default()
    }

    #[test]
    fn test_equal_scalars_are_no_difference() {
        assert!(engine()
            .diff_values(&Value::from("a"), &Value::from("a"), false)
            .is_none());
        assert!(engine()
            .diff_values(&Value::from(7i64), &Value::from(7i64), false)
            .is_none());
    }

    #[test]
    fn test_differing_scalars() {
        let diff = engine()
            .diff_values(&Value::from("Engineer"), &Value::from("Manager"), false)
            .unwrap();
        assert_eq!(diff.old_value.as_deref(), Some("Engineer"));
        assert_eq!(diff.new_value.as_deref(), Some("Manager"));
        assert!(!diff.multi);
        assert!(diff.added_values.is_empty());
    }

    #[test]
    fn test_both_absent() {
        let engine = engine();
        assert!(engine
            .diff_values(&Value::Null, &Value::Null, false)
            .is_none());
        assert!(engine
            .diff_values(&Value::Null, &Value::Collection(vec![]), false)
            .is_none());
        assert!(engine
            .diff_values(&Value::Collection(vec![]), &Value::Null, false)
            .is_none());
    }

    #[test]
    fn test_scalar_appeared() {
        let diff = engine()
            .diff_values(&Value::Null, &Value::from("Manager"), false)
            .unwrap();
        assert_eq!(diff.new_value.as_deref(), Some("Manager"));
        assert!(diff.old_value.is_none());
        assert!(!diff.multi);
    }

    #[test]
    fn test_collection_disappeared() {
        let diff = engine()
            .diff_values(&Value::from(vec!["a", "b"]), &Value::Null, false)
            .unwrap();
        assert_eq!(diff.old_value.as_deref(), Some("[a,b]"));
        assert!(diff.new_value.is_none());
        assert!(diff.multi);
        assert_eq!(diff.removed_values, vec!["a", "b"]);
        assert!(diff.added_values.is_empty());
    }

    #[test]
    fn test_scalar_coerced_to_singleton() {
        let engine = engine();
        assert!(engine
            .diff_values(&Value::from("A"), &Value::from(vec!["A"]), false)
            .is_none());
        assert!(engine
            .diff_values(&Value::from(vec!["A"]), &Value::from("A"), false)
            .is_none());

        let diff = engine
            .diff_values(&Value::from("A"), &Value::from(vec!["A", "B"]), false)
            .unwrap();
        assert!(diff.multi);
        assert_eq!(diff.added_values, vec!["B"]);
        assert!(diff.removed_values.is_empty());
    }

    #[test]
    fn test_collections_ignore_order() {
        let old = [Value::from("a"), Value::from("b"), Value::from("c")];
        let new = [Value::from("c"), Value::from("a"), Value::from("b")];
        assert!(engine().diff_collections(&old, &new, false).is_none());
    }

    #[test]
    fn test_collection_added_and_removed() {
        let old = [Value::from("a"), Value::from("b")];
        let new = [Value::from("b"), Value::from("c")];
        let diff = engine().diff_collections(&old, &new, false).unwrap();
        assert_eq!(diff.removed_values, vec!["a"]);
        assert_eq!(diff.added_values, vec!["c"]);
        assert_eq!(diff.old_value.as_deref(), Some("[a,b]"));
        assert_eq!(diff.new_value.as_deref(), Some("[b,c]"));
    }

    #[test]
    fn test_duplicates_consume_one_match_each() {
        let old = [Value::from("a"), Value::from("a")];
        let new = [Value::from("a")];
        let diff = engine().diff_collections(&old, &new, false).unwrap();
        assert_eq!(diff.removed_values, vec!["a"]);
        assert!(diff.added_values.is_empty());
    }

    #[test]
    fn test_case_insensitive_collapse() {
        let engine = engine();
        let old = [Value::from("Foo")];
        let new = [Value::from("foo")];
        assert!(engine.diff_collections(&old, &new, true).is_none());

        let diff = engine.diff_collections(&old, &new, false).unwrap();
        assert_eq!(diff.removed_values, vec!["Foo"]);
        assert_eq!(diff.added_values, vec!["foo"]);
    }

    #[test]
    fn test_case_insensitive_prefers_exact_match() {
        // "Foo" consumes the exact "Foo"; the old "foo" then matches "FOO"
        // case-insensitively, leaving nothing.
        let old = [Value::from("Foo"), Value::from("foo")];
        let new = [Value::from("FOO"), Value::from("Foo")];
        assert!(engine().diff_collections(&old, &new, true).is_none());
    }

    #[test]
    fn test_case_insensitive_applies_to_strings_only() {
        let old = [Value::from(vec!["1"])];
        let new = [Value::from(vec!["1"])];
        // Nested collections never case-fold; exact equality still matches.
        assert!(engine().diff_collections(&old, &new, true).is_none());
    }

    #[test]
    fn test_entity_elements_compared_structurally() {
        let payroll = Value::Entity(EntityRef::new("entitlement").with_id("e-1"));
        let ledger = Value::Entity(EntityRef::new("entitlement").with_id("e-2"));
        let diff = engine()
            .diff_collections(
                std::slice::from_ref(&payroll),
                std::slice::from_ref(&ledger),
                false,
            )
            .unwrap();
        assert_eq!(diff.removed_values, vec!["e-1"]);
        assert_eq!(diff.added_values, vec!["e-2"]);
    }

    #[test]
    fn test_value_count_cap() {
        let engine = DiffEngine::new(DiffConfig::default().with_max_value_count(2));
        let old: Vec<Value> = Vec::new();
        let new: Vec<Value> = (0..5).map(|i| Value::from(format!("v{i}"))).collect();
        let diff = engine.diff_collections(&old, &new, false).unwrap();
        assert_eq!(diff.added_values.len(), 2);
    }

    #[test]
    fn test_summary_truncation_uses_config() {
        let engine = DiffEngine::new(DiffConfig::default().with_max_string_len(5));
        let diff = engine
            .diff_values(
                &Value::from("abcdefgh"),
                &Value::from("zyxwvuts"),
                false,
            )
            .unwrap();
        assert_eq!(diff.old_value.as_deref(), Some("abcde..."));
        assert_eq!(diff.new_value.as_deref(), Some("zyxwv..."));
    }

    #[test]
    fn test_bags_identical() {
        let bag = AttributeBag::new()
            .with("a", "1")
            .with("groups", vec!["x", "y"]);
        assert!(engine()
            .diff_bags(Some(&bag), Some(&bag), &[], 0)
            .is_none());
        assert!(engine().bags_equal(Some(&bag), Some(&bag)));
    }

    #[test]
    fn test_bags_changed_and_added_keys() {
        let old = AttributeBag::new().with("a", "1").with("b", "2");
        let new = AttributeBag::new()
            .with("a", "1")
            .with("b", "3")
            .with("c", "4");

        let diffs = engine().diff_bags(Some(&old), Some(&new), &[], 0).unwrap();
        assert_eq!(diffs.len(), 2);

        let changed = diffs
            .iter()
            .find(|d| d.attribute.as_deref() == Some("b"))
            .unwrap();
        assert_eq!(changed.old_value.as_deref(), Some("2"));
        assert_eq!(changed.new_value.as_deref(), Some("3"));

        let added = diffs
            .iter()
            .find(|d| d.attribute.as_deref() == Some("c"))
            .unwrap();
        assert!(added.old_value.is_none());
        assert_eq!(added.new_value.as_deref(), Some("4"));
    }

    #[test]
    fn test_bags_removed_key() {
        let old = AttributeBag::new().with("a", "1").with("b", "2");
        let new = AttributeBag::new().with("a", "1");
        let diffs = engine().diff_bags(Some(&old), Some(&new), &[], 0).unwrap();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].attribute.as_deref(), Some("b"));
        assert_eq!(diffs[0].old_value.as_deref(), Some("2"));
        assert!(diffs[0].new_value.is_none());
    }

    #[test]
    fn test_bag_against_none() {
        let bag = AttributeBag::new().with("a", "1").with("empty", Value::Null);

        let added = engine().diff_bags(None, Some(&bag), &[], 0).unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].attribute.as_deref(), Some("a"));
        assert!(added[0].old_value.is_none());

        let removed = engine().diff_bags(Some(&bag), None, &[], 0).unwrap();
        assert_eq!(removed.len(), 1);
        assert!(removed[0].new_value.is_none());

        assert!(engine().diff_bags(None, None, &[], 0).is_none());
    }

    #[test]
    fn test_exclusions_skip_both_directions() {
        let old = AttributeBag::new().with("a", "1").with("secret", "x");
        let new = AttributeBag::new().with("a", "2").with("other", "y");
        let diffs = engine()
            .diff_bags(Some(&old), Some(&new), &["secret", "other"], 0)
            .unwrap();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].attribute.as_deref(), Some("a"));
    }

    #[test]
    fn test_max_diffs_caps_scan() {
        let old = AttributeBag::new().with("a", "1").with("b", "2").with("c", "3");
        let new = AttributeBag::new().with("a", "9").with("b", "9").with("c", "9");
        let diffs = engine().diff_bags(Some(&old), Some(&new), &[], 2).unwrap();
        assert_eq!(diffs.len(), 2);
    }

    #[test]
    fn test_cap_does_not_change_outcome() {
        let old = AttributeBag::new().with("a", "1");
        let new = AttributeBag::new().with("a", "1");
        assert!(engine().diff_bags(Some(&old), Some(&new), &[], 1).is_none());
        assert!(engine().bags_equal(Some(&old), Some(&new)));

        let changed = AttributeBag::new().with("a", "2");
        assert!(!engine().bags_equal(Some(&old), Some(&changed)));
    }

    #[test]
    fn test_null_values_in_bags_are_absence() {
        let old = AttributeBag::new().with("a", Value::Null);
        let new = AttributeBag::new().with("a", "1");
        let diffs = engine().diff_bags(Some(&old), Some(&new), &[], 0).unwrap();
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].old_value.is_none());

        // Null on both sides, or null against a missing key, is no change.
        let left = AttributeBag::new().with("a", Value::Null);
        let right = AttributeBag::new();
        assert!(engine().diff_bags(Some(&left), Some(&right), &[], 0).is_none());
    }
}
