//! The output contract of the layout pipeline: typed fill values,
//! expressions and accumulators, and the declarative band/field design
//! consumed by a `ReportRenderer`.

pub mod accumulator;
pub mod builder;
pub mod design;
pub mod expression;
pub mod fill;
pub mod format;
pub mod render;
pub mod value;

pub use accumulator::Accumulator;
pub use builder::DesignBuilder;
pub use design::{
    Band, ChartElement, ConditionalStyle, Element, EvaluationTime, FieldDecl, GroupDecl,
    PageSetup, ParameterDecl, RectangleElement, ReportDesign, ResetScope, StaticTextElement,
    SubDocument, SubreportElement, SubreportSource, TextElement, VariableDecl,
};
pub use expression::{
    ArithmeticOp, CompareMode, CompareOp, Expression, ExpressionError, Reference, Scope,
};
pub use fill::FillData;
pub use format::{format_value, NumberPattern};
pub use render::{RenderError, ReportRenderer};
pub use value::{infer_data_type, parse_number, Row, Value};

/// Built-in variable: the current page, starting at 1.
pub const PAGE_NUMBER: &str = "PAGE_NUMBER";
/// Built-in variable: the 1-based index of the current detail row.
pub const REPORT_COUNT: &str = "REPORT_COUNT";

/// Built-in variable holding the row count of the current `group`.
pub fn group_count_variable(group: &str) -> String {
    format!("{}_COUNT", group)
}

#[cfg(test)]
mod value_test;
