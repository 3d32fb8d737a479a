//! Structure inference over arbitrary input trees.
//!
//! [`StructureAnalyzer`] classifies a generic document into headers,
//! key/value pairs, tables and charts; [`BudgetAnalyzer`] recognises coded
//! planned/actual hierarchies and rolls them up.

pub mod budget;
pub mod chart;
pub mod element;
pub mod error;
pub mod schema;
pub mod structure;

pub use budget::{BudgetAnalyzer, BudgetNode, BudgetNodeType};
pub use chart::detect_chart;
pub use element::{ChartSpec, ElementContent, ElementKind, ReportElement};
pub use error::AnalyzeError;
pub use schema::{humanize, infer_columns};
pub use structure::{flatten, Elements, ScalarArrayPolicy, StructureAnalyzer};

#[cfg(test)]
mod schema_test;
#[cfg(test)]
mod structure_test;
