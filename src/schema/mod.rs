pub mod definitions;
pub mod resolver;

// Re-export commonly used items
pub use definitions::{PathType, Schema, SchemaPath};
pub use resolver::{resolve, FieldKind};
