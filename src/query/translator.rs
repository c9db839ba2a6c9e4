//! Raw query parameters to filter tree plus pagination, sort and projection directives
//!
//! Translation is lenient: anything it cannot make sense of (undeclared fields, values that
//! do not fit the field's kind, malformed combinator JSON, empty values) is skipped with a
//! debug log line instead of failing the whole query.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::builder::build_condition;
use super::condition::Condition;
use super::filter::FilterTree;
use crate::parser::sort_parser::comma_list_to_directive;
use crate::parser::{split_operands, ParsedOperand, RawParameters};
use crate::schema::{resolve, Schema};

/// Pagination, sort and projection settings extracted from the parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryDirectives {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    /// Space-joined fields, `-` prefix for descending
    pub sort: Option<String>,
    /// Space-joined projection
    pub select: Option<String>,
}

impl QueryDirectives {
    /// `limit`/`skip` win over `page`/`per_page` whenever either is set
    pub fn uses_offset_paging(&self) -> bool {
        self.limit.is_some() || self.skip.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TranslatedQuery {
    pub filter: FilterTree,
    #[serde(flatten)]
    pub directives: QueryDirectives,
}

/// Keys routed away from schema-typed filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReservedKey {
    Or,
    And,
    Page,
    PerPage,
    Limit,
    Skip,
    SortBy,
    Select,
}

impl ReservedKey {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "$or" => Some(ReservedKey::Or),
            "$and" => Some(ReservedKey::And),
            "page" => Some(ReservedKey::Page),
            "per_page" => Some(ReservedKey::PerPage),
            "limit" => Some(ReservedKey::Limit),
            "skip" => Some(ReservedKey::Skip),
            "sort_by" => Some(ReservedKey::SortBy),
            "select" => Some(ReservedKey::Select),
            _ => None,
        }
    }

    fn is_combinator(&self) -> bool {
        matches!(self, ReservedKey::Or | ReservedKey::And)
    }
}

/// Translates raw parameters against one schema
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    schema: &'a Schema,
}

impl<'a> Translator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    pub fn translate(&self, params: &RawParameters) -> TranslatedQuery {
        let mut query = TranslatedQuery::default();

        for (key, value) in params.iter() {
            let reserved = ReservedKey::from_key(key);
            for chunk in split_operands(value) {
                let operand = match reserved {
                    Some(r) if r.is_combinator() => ParsedOperand::verbatim(key, &chunk),
                    _ => ParsedOperand::with_operator(key, &chunk),
                };
                self.apply(&mut query, reserved, operand);
            }
        }

        query
    }

    fn apply(
        &self,
        query: &mut TranslatedQuery,
        reserved: Option<ReservedKey>,
        operand: ParsedOperand,
    ) {
        if operand.value.is_empty() {
            debug!("Skipping {}: empty value", operand.field);
            return;
        }

        let directives = &mut query.directives;
        match reserved {
            Some(ReservedKey::Or) | Some(ReservedKey::And) => {
                if let Some(value) = parse_combinator(&operand) {
                    query.filter.set(&operand.field, Condition::Json(value));
                }
            }
            Some(ReservedKey::Page) => set_count(&mut directives.page, &operand),
            Some(ReservedKey::PerPage) => set_count(&mut directives.per_page, &operand),
            Some(ReservedKey::Limit) => set_count(&mut directives.limit, &operand),
            Some(ReservedKey::Skip) => set_count(&mut directives.skip, &operand),
            Some(ReservedKey::SortBy) => {
                directives.sort = Some(comma_list_to_directive(&operand.value));
            }
            Some(ReservedKey::Select) => {
                directives.select = Some(comma_list_to_directive(&operand.value));
            }
            None => self.apply_field(&mut query.filter, &operand),
        }
    }

    fn apply_field(&self, filter: &mut FilterTree, operand: &ParsedOperand) {
        let kind = resolve(Some(self.schema), "", &operand.field, operand.operator());
        match build_condition(kind, &operand.value, operand.operator()) {
            Some(condition) => filter.merge(&operand.field, condition),
            None => debug!(
                "Skipping {}={:?}: no {} condition for operator {:?}",
                operand.field,
                operand.value,
                kind,
                operand.operator()
            ),
        }
    }
}

/// Translate `params` against `schema`
pub fn translate(schema: &Schema, params: &RawParameters) -> TranslatedQuery {
    Translator::new(schema).translate(params)
}

fn parse_combinator(operand: &ParsedOperand) -> Option<Value> {
    match serde_json::from_str::<Value>(&operand.value) {
        Ok(value) if is_truthy(&value) => Some(value),
        Ok(_) => {
            debug!("Skipping {}: value is empty", operand.field);
            None
        }
        Err(e) => {
            debug!("Skipping {}: invalid JSON ({})", operand.field, e);
            None
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn set_count(slot: &mut Option<u64>, operand: &ParsedOperand) {
    match operand.value.trim().parse::<u64>() {
        Ok(count) => *slot = Some(count),
        Err(_) => debug!("Skipping {}={:?}: not a count", operand.field, operand.value),
    }
}
