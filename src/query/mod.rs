pub mod builder;
pub mod condition;
pub mod filter;
pub mod plan;
pub mod translator;

pub use condition::{Condition, OperatorMap, Pattern};
pub use filter::FilterTree;
pub use plan::{Combine, PagingDefaults, PlanOptions, QueryPlan};
pub use translator::{translate, QueryDirectives, TranslatedQuery, Translator};
