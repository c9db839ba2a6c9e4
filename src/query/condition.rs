use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::utils::format_datetime;

/// Operator name to operand, e.g. `$gte` -> `"18"`
pub type OperatorMap = BTreeMap<String, Condition>;

/// Case-insensitive pattern match, rendered as a regular expression literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub source: String,
}

impl Pattern {
    pub fn case_insensitive(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }

    pub fn options(&self) -> &'static str {
        "i"
    }
}

/// A filter fragment for a single field path
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(DateTime<Utc>),
    Pattern(Pattern),
    List(Vec<Condition>),
    Operators(OperatorMap),
    /// Caller-supplied JSON, kept as-is (logical combinators, fixed conditions)
    Json(Value),
}

impl Condition {
    /// Single-operator object `{"$<name>": operand}`
    pub fn operator(name: &str, operand: Condition) -> Self {
        let mut map = OperatorMap::new();
        map.insert(format!("${}", name), operand);
        Condition::Operators(map)
    }

    pub fn text_list<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        Condition::List(
            tokens
                .into_iter()
                .map(|t| Condition::Text(t.to_string()))
                .collect(),
        )
    }

    pub fn pattern_list<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        Condition::List(
            tokens
                .into_iter()
                .map(|t| Condition::Pattern(Pattern::case_insensitive(t)))
                .collect(),
        )
    }

    pub fn as_operators(&self) -> Option<&OperatorMap> {
        match self {
            Condition::Operators(map) => Some(map),
            _ => None,
        }
    }

    /// Operand of `$<name>` when this is an operator object
    pub fn get_operator(&self, name: &str) -> Option<&Condition> {
        self.as_operators()
            .and_then(|map| map.get(&format!("${}", name)))
    }
}

// Dates and patterns use MongoDB extended JSON so rendered filters stay unambiguous.
impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Condition::Bool(b) => serializer.serialize_bool(*b),
            Condition::Int(i) => serializer.serialize_i64(*i),
            Condition::Float(f) => serializer.serialize_f64(*f),
            Condition::Text(s) => serializer.serialize_str(s),
            Condition::Date(dt) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$date", &format_datetime(*dt))?;
                map.end()
            }
            Condition::Pattern(pattern) => {
                let mut inner = BTreeMap::new();
                inner.insert("pattern", pattern.source.as_str());
                inner.insert("options", pattern.options());
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$regularExpression", &inner)?;
                map.end()
            }
            Condition::List(items) => items.serialize(serializer),
            Condition::Operators(ops) => ops.serialize(serializer),
            Condition::Json(value) => value.serialize(serializer),
        }
    }
}
