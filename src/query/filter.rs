use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::condition::Condition;

/// Filter expression keyed by field path, at most one fragment per path
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterTree {
    entries: BTreeMap<String, Condition>,
}

impl FilterTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree of caller-supplied conditions from a JSON object
    pub fn from_json_object(object: Map<String, Value>) -> Self {
        let entries = object
            .into_iter()
            .map(|(path, value)| (path, Condition::Json(value)))
            .collect();
        Self { entries }
    }

    /// Add a fragment for `path`.
    ///
    /// An operator object landing on a path that already holds one is merged into it key by
    /// key, later operators winning. Any other combination replaces the existing fragment.
    pub fn merge(&mut self, path: &str, condition: Condition) {
        let condition = match (self.entries.get_mut(path), condition) {
            (Some(Condition::Operators(existing)), Condition::Operators(incoming)) => {
                existing.extend(incoming);
                return;
            }
            (_, condition) => condition,
        };
        self.entries.insert(path.to_string(), condition);
    }

    /// Set `path` to `condition`, discarding whatever was there
    pub fn set(&mut self, path: &str, condition: Condition) {
        self.entries.insert(path.to_string(), condition);
    }

    /// Overlay every entry of `other`, replacing fragments on shared paths
    pub fn overlay(&mut self, other: FilterTree) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, path: &str) -> Option<&Condition> {
        self.entries.get(path)
    }

    pub fn contains_key(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Condition)> {
        self.entries.iter()
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
