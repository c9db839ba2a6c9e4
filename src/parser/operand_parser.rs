//! Brace-prefixed operator syntax inside parameter values
//!
//! Callers encode comparison operators in the value itself, e.g. `age={gte}18` or, for two
//! conditions on one field, `age={gte}18{lte}65`. Parsing happens in two stages: the value is
//! split into operand groups, then one `{operator}` is stripped from each group.

use lazy_static::lazy_static;
use regex::Regex;

use super::params::ParamValue;

lazy_static! {
    /// `{word}` followed by at least one character and any run of non-brace characters
    static ref OPERAND_GROUP: Regex = Regex::new(r"\{[A-Za-z0-9_]+\}(.[^{}]*)").unwrap();
    /// Greedy brace group holding the operator name
    static ref OPERATOR: Regex = Regex::new(r"\{(.*)\}").unwrap();
}

/// One `(field, operator, value)` triple taken from a raw parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOperand {
    pub field: String,
    pub operator: Option<String>,
    pub value: String,
}

impl ParsedOperand {
    /// Strip the first brace group from `chunk` and keep its contents as the operator.
    /// An empty group (`{}`) counts as no operator.
    pub fn with_operator(field: &str, chunk: &str) -> Self {
        let Some(captures) = OPERATOR.captures(chunk) else {
            return Self::verbatim(field, chunk);
        };
        let operator = captures
            .get(1)
            .map(|m| m.as_str())
            .filter(|op| !op.is_empty())
            .map(str::to_string);
        let value = OPERATOR.replace(chunk, "").into_owned();

        Self {
            field: field.to_string(),
            operator,
            value,
        }
    }

    /// Keep `chunk` untouched, as needed for JSON-valued parameters
    pub fn verbatim(field: &str, chunk: &str) -> Self {
        Self {
            field: field.to_string(),
            operator: None,
            value: chunk.to_string(),
        }
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }
}

/// Split a raw parameter value into operand chunks.
///
/// Multi-valued parameters are joined with `,` into a single chunk and never split further;
/// an empty list yields nothing. A single value yields every operand group it contains, or
/// the whole value when it has none.
pub fn split_operands(value: &ParamValue) -> Vec<String> {
    match value {
        ParamValue::Multi(values) if values.is_empty() => Vec::new(),
        ParamValue::Multi(values) => vec![values.join(",")],
        ParamValue::Single(value) => {
            let groups: Vec<String> = OPERAND_GROUP
                .find_iter(value)
                .map(|m| m.as_str().to_string())
                .collect();
            if groups.is_empty() {
                vec![value.clone()]
            } else {
                groups
            }
        }
    }
}
