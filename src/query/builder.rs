//! Coercion of one operand into a filter fragment, driven by the field's kind

use lazy_static::lazy_static;
use regex::Regex;

use super::condition::{Condition, Pattern};
use crate::schema::FieldKind;
use crate::utils::{convert_to_boolean, convert_to_date, parse_leading_int};

/// Options flag of the default partial-match fragment. Consumers depend on this exact
/// value, so it is not the standard `i`.
pub const PARTIAL_MATCH_OPTIONS: &str = "-i";

/// Miles per degree of latitude, for converting a search radius
pub const MILES_PER_DEGREE: f64 = 69.0;

const RANGE_OPERATORS: [&str; 4] = ["gt", "gte", "lt", "lte"];
const NUMBER_COMPARISONS: [&str; 5] = ["gt", "gte", "lt", "lte", "ne"];

lazy_static! {
    static ref ALL_DIGITS: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// Build the fragment for `value` on a field of `kind`. `None` means the operand is dropped.
pub fn build_condition(
    kind: FieldKind,
    value: &str,
    operator: Option<&str>,
) -> Option<Condition> {
    match kind {
        FieldKind::Boolean => Some(Condition::Bool(convert_to_boolean(value))),
        FieldKind::Number => number_condition(value, operator),
        FieldKind::Date => date_condition(value, operator),
        FieldKind::String => Some(string_condition(value, operator)),
        FieldKind::GeoPoint => geo_condition(value),
        FieldKind::Identifier => Some(Condition::Text(value.to_string())),
        FieldKind::Unknown => None,
    }
}

fn is_one_of(operator: Option<&str>, set: &[&str]) -> bool {
    operator.is_some_and(|op| set.contains(&op))
}

fn number_condition(value: &str, operator: Option<&str>) -> Option<Condition> {
    let has_digit = value.bytes().any(|b| b.is_ascii_digit());
    if !has_digit {
        return None;
    }

    if value.contains(',') {
        let tokens: Vec<&str> = value.split(',').collect();
        let condition = match operator {
            Some("all") => Condition::operator("all", Condition::text_list(tokens)),
            Some("nin") => Condition::operator("nin", Condition::text_list(tokens)),
            Some("mod") => {
                Condition::operator("mod", Condition::text_list(tokens.into_iter().take(2)))
            }
            _ => Condition::operator("in", Condition::text_list(tokens)),
        };
        return Some(condition);
    }

    match operator {
        Some(op) if NUMBER_COMPARISONS.contains(&op) => {
            Some(Condition::operator(op, Condition::Text(value.to_string())))
        }
        _ => parse_leading_int(value).map(Condition::Int),
    }
}

fn date_condition(value: &str, operator: Option<&str>) -> Option<Condition> {
    let date = Condition::Date(convert_to_date(value)?);
    match operator {
        Some(op) if RANGE_OPERATORS.contains(&op) => Some(Condition::operator(op, date)),
        _ => Some(date),
    }
}

fn string_condition(value: &str, operator: Option<&str>) -> Condition {
    if value.contains(',') {
        let patterns = Condition::pattern_list(value.split(','));
        return match operator {
            Some("all") => Condition::operator("all", patterns),
            Some("nin") => Condition::operator("nin", patterns),
            _ => Condition::operator("in", patterns),
        };
    }

    if ALL_DIGITS.is_match(value) {
        return match operator {
            Some(op) if RANGE_OPERATORS.contains(&op) => {
                Condition::operator(op, Condition::Text(value.to_string()))
            }
            _ => Condition::Text(value.to_string()),
        };
    }

    if is_one_of(operator, &["ne", "not"]) {
        return Condition::operator("not", Condition::Pattern(Pattern::case_insensitive(value)));
    }

    if operator == Some("exact") {
        return Condition::Text(value.to_string());
    }

    let mut partial = Condition::operator("regex", Condition::Text(value.to_string()));
    if let Condition::Operators(map) = &mut partial {
        map.insert(
            "$options".to_string(),
            Condition::Text(PARTIAL_MATCH_OPTIONS.to_string()),
        );
    }
    partial
}

/// `lat,lng[,radius_miles]` to a `$near` query, with `$maxDistance` in degrees.
/// Tokens past the radius are ignored and an unreadable radius is left out.
fn geo_condition(value: &str) -> Option<Condition> {
    let mut tokens = value.split(',').map(str::trim);
    let lat = tokens.next()?.parse::<f64>().ok()?;
    let lng = tokens.next()?.parse::<f64>().ok()?;

    let point = Condition::List(vec![Condition::Float(lat), Condition::Float(lng)]);
    let mut near = Condition::operator("near", point);
    let radius = tokens.next().and_then(|token| token.parse::<f64>().ok());
    if let (Some(radius), Condition::Operators(map)) = (radius, &mut near) {
        map.insert(
            "$maxDistance".to_string(),
            Condition::Float(radius / MILES_PER_DEGREE),
        );
    }
    Some(near)
}
