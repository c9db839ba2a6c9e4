use std::fmt;
use tracing::trace;

use super::definitions::{PathType, Schema};

/// Operator that forces a geospatial lookup on any declared field
pub const NEAR_OPERATOR: &str = "near";

/// Semantic kind of a field, deciding how its query values are coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Boolean,
    Number,
    String,
    Date,
    Identifier,
    GeoPoint,
    Unknown,
}

impl From<PathType> for FieldKind {
    fn from(path_type: PathType) -> Self {
        match path_type {
            PathType::Boolean => FieldKind::Boolean,
            PathType::String | PathType::Array => FieldKind::String,
            PathType::ObjectId => FieldKind::Identifier,
            PathType::Number => FieldKind::Number,
            PathType::Date => FieldKind::Date,
            PathType::DocumentArray | PathType::Mixed | PathType::Unsupported => {
                FieldKind::Unknown
            }
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Boolean => "Boolean",
            FieldKind::Number => "Number",
            FieldKind::String => "String",
            FieldKind::Date => "Date",
            FieldKind::Identifier => "Identifier",
            FieldKind::GeoPoint => "GeoPoint",
            FieldKind::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

/// Resolve the kind of `field_key` against `schema`.
///
/// `path_prefix` is the already-resolved parent path (e.g. `"foods."`) and only affects
/// logging. A missing schema means the lookup descended into an untyped region, where
/// every key is a string.
pub fn resolve(
    schema: Option<&Schema>,
    path_prefix: &str,
    field_key: &str,
    operator: Option<&str>,
) -> FieldKind {
    let Some(schema) = schema else {
        trace!("{}{} is in an untyped region, treating as String", path_prefix, field_key);
        return FieldKind::String;
    };

    if field_key.contains('.') {
        // longest declared prefix wins, so flattened paths like `shop.items` resolve
        let split = field_key
            .rmatch_indices('.')
            .map(|(at, _)| (&field_key[..at], &field_key[at + 1..]))
            .find_map(|(sub, rest)| schema.path(sub).map(|declared| (sub, rest, declared)));

        return match split {
            Some((sub, rest, declared)) if declared.path_type.is_container() => {
                let prefix = format!("{}{}.", path_prefix, sub);
                resolve(declared.schema.as_ref(), &prefix, rest, operator)
            }
            Some((sub, _, declared)) => {
                trace!(
                    "{}{} is a {:?}, cannot descend into it",
                    path_prefix,
                    sub,
                    declared.path_type
                );
                FieldKind::Unknown
            }
            None => {
                trace!("{}{} has no declared parent", path_prefix, field_key);
                FieldKind::Unknown
            }
        };
    }

    let Some(declared) = schema.path(field_key) else {
        trace!("{}{} is not declared", path_prefix, field_key);
        return FieldKind::Unknown;
    };

    if operator == Some(NEAR_OPERATOR) {
        return FieldKind::GeoPoint;
    }

    FieldKind::from(declared.path_type)
}
