//! The vocabulary shared by the analyzers, the layout engine and the
//! assembler: closed enumerations over data types and calculations, the
//! column/group/highlight specifications, and the `TreeNode` abstraction
//! over the input document.

pub mod column;
pub mod path;
pub mod tree;
pub mod types;

pub use column::{ColumnSpec, ColumnWidth, GroupSpec, HighlightRule};
pub use path::{field_name, resolve_path};
pub use tree::{Scalar, TreeNode};
pub use types::{Calculation, ChartType, ComparisonOperator, DataType};

#[cfg(test)]
mod tree_test;
