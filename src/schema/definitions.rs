//! Schema description model
//!
//! A schema declares, per field path, a primitive type tag and (for nested document arrays
//! and untyped containers) an optional child schema. It is consumed read-only by the
//! resolver; this crate never derives one from documents.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::AppResult;

/// Declared type of a schema path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathType {
    Boolean,
    String,
    /// Array of primitives
    Array,
    ObjectId,
    Number,
    Date,
    /// Array of sub-documents with their own schema
    DocumentArray,
    /// Untyped container
    Mixed,
    #[serde(other)]
    Unsupported,
}

impl PathType {
    /// Whether dotted lookups may descend into this path
    pub fn is_container(&self) -> bool {
        matches!(self, PathType::DocumentArray | PathType::Mixed)
    }
}

/// Declaration of a single path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaPath {
    #[serde(rename = "type")]
    pub path_type: PathType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl SchemaPath {
    pub fn new(path_type: PathType) -> Self {
        Self {
            path_type,
            schema: None,
        }
    }
}

/// Schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub paths: HashMap<String, SchemaPath>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a primitive path
    pub fn with_path(mut self, name: &str, path_type: PathType) -> Self {
        self.paths.insert(name.to_string(), SchemaPath::new(path_type));
        self
    }

    /// Declare a container path with a child schema
    pub fn with_nested(mut self, name: &str, path_type: PathType, schema: Schema) -> Self {
        self.paths.insert(
            name.to_string(),
            SchemaPath {
                path_type,
                schema: Some(schema),
            },
        );
        self
    }

    /// Get the declaration of a path, if any
    pub fn path(&self, name: &str) -> Option<&SchemaPath> {
        self.paths.get(name)
    }

    /// Parse a schema description from YAML
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_declares_paths() {
        let schema = Schema::new()
            .with_path("name", PathType::String)
            .with_nested(
                "foods",
                PathType::DocumentArray,
                Schema::new().with_path("calories", PathType::Number),
            );

        assert_eq!(schema.path("name").unwrap().path_type, PathType::String);
        let foods = schema.path("foods").unwrap();
        assert!(foods.path_type.is_container());
        assert_eq!(
            foods.schema.as_ref().unwrap().path("calories").unwrap().path_type,
            PathType::Number
        );
        assert!(schema.path("missing").is_none());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
paths:
  name:
    type: string
  owner:
    type: objectId
  foods:
    type: documentArray
    schema:
      paths:
        name:
          type: string
  blob:
    type: buffer
"#;
        let schema = Schema::from_yaml_str(yaml).unwrap();
        assert_eq!(schema.path("owner").unwrap().path_type, PathType::ObjectId);
        assert_eq!(schema.path("blob").unwrap().path_type, PathType::Unsupported);
        let foods = schema.path("foods").unwrap();
        assert_eq!(foods.path_type, PathType::DocumentArray);
        assert!(foods.schema.as_ref().unwrap().path("name").is_some());
    }

    #[test]
    fn test_from_yaml_rejects_missing_type() {
        assert!(Schema::from_yaml_str("paths:\n  name: {}\n").is_err());
    }

    #[test]
    fn test_container_types() {
        assert!(PathType::Mixed.is_container());
        assert!(PathType::DocumentArray.is_container());
        assert!(!PathType::Array.is_container());
        assert!(!PathType::String.is_container());
    }
}
