pub mod operand_parser;
pub mod params;
pub mod sort_parser;

pub use operand_parser::{split_operands, ParsedOperand};
pub use params::{ParamValue, RawParameters};
pub use sort_parser::{SortOrder, SortSpec};
