pub mod config;
pub mod error;
pub mod logging;
pub mod parser;
pub mod query;
pub mod schema;
pub mod utils;

// Re-export commonly used types for easier access
pub use parser::{ParamValue, RawParameters};
pub use query::{translate, Condition, FilterTree, QueryPlan, TranslatedQuery};
pub use schema::{FieldKind, PathType, Schema};
