//! The budget path: the flattened hierarchy as an indented table.
//!
//! The summary sums level-1 rows only, since every parent already carries
//! the rolled-up amounts of its children.

use crate::context::AssemblyContext;
use folio_analyzer::BudgetNodeType;
use folio_document::{
    ArithmeticOp, Band, CompareMode, CompareOp, ConditionalStyle, DesignBuilder, Element, EvaluationTime,
    Expression, Row, StaticTextElement, TextElement, Value, VariableDecl,
};
use folio_layout::{ColumnLayout, ResolvedColumn, TableModel, SHOW_SUMMARY};
use folio_model::{Calculation, ColumnSpec, DataType};
use folio_style::BuiltinStyle;
use folio_types::{Bounds, Color};

const AMOUNT_PATTERN: &str = "#,##0.00";
const PERCENT_PATTERN: &str = "0.00";
pub const TOTAL_PLANNED: &str = "TOTAL_planned";
pub const TOTAL_ACTUAL: &str = "TOTAL_actual";

pub fn budget_model() -> TableModel {
    let amount = |field: &str, title: &str| {
        ColumnSpec::new(field, title)
            .with_width(80)
            .with_data_type(DataType::Decimal)
            .with_format(AMOUNT_PATTERN)
    };
    TableModel::new(vec![
        ColumnSpec::new("code", "Code").with_width(60),
        ColumnSpec::new("name", "Name"),
        amount("planned", "Planned"),
        amount("actual", "Actual"),
        amount("difference", "Difference"),
        ColumnSpec::new("executionPercent", "Execution %")
            .with_width(70)
            .with_data_type(DataType::Decimal)
            .with_format(PERCENT_PATTERN),
        ColumnSpec::new("type", "Type").hidden(),
        ColumnSpec::new("level", "Level").hidden().with_data_type(DataType::Integer),
        ColumnSpec::new("indent", "Indent").hidden().with_data_type(DataType::Integer),
    ])
}

fn is_type(node_type: BudgetNodeType) -> Expression {
    Expression::text_equals(Expression::field("type"), node_type.name())
}

/// Sections are shaded and bold, chapters bold.
pub fn emphasis_styles(section_background: Color) -> Vec<ConditionalStyle> {
    vec![
        ConditionalStyle::background(is_type(BudgetNodeType::Section), section_background),
        ConditionalStyle::bold(is_type(BudgetNodeType::Section)),
        ConditionalStyle::bold(is_type(BudgetNodeType::Chapter)),
    ]
}

fn top_level_total(name: &str, field: &str) -> VariableDecl {
    VariableDecl::new(
        name,
        Calculation::Sum,
        Expression::conditional(
            Expression::compare(
                CompareOp::Eq,
                CompareMode::Numeric,
                Expression::field("level"),
                Expression::literal(Value::Integer(1)),
            ),
            Expression::field(field),
            Expression::literal(Value::Null),
        ),
    )
}

fn column<'a>(layout: &'a ColumnLayout, field: &str) -> Option<&'a ResolvedColumn> {
    layout.columns.iter().find(|c| c.spec.field_path == field)
}

/// Totals of the level-1 rows and the grand execution percent.
fn summary(layout: &ColumnLayout, height: i32) -> Band {
    let cell = |field: &str, expression: Expression, pattern: &str| {
        column(layout, field).map(|c| {
            Element::Text(
                TextElement::new(
                    Bounds::new(c.x, 0, c.width, height),
                    expression,
                    BuiltinStyle::Summary.name(),
                )
                .with_pattern(Some(pattern.to_string()))
                .evaluated_at(EvaluationTime::Report),
            )
        })
    };
    let planned = Expression::variable(TOTAL_PLANNED);
    let actual = Expression::variable(TOTAL_ACTUAL);
    let label_end = column(layout, "planned").map_or(0, |c| c.x);
    let mut band = Band::new(height)
        .unsplittable()
        .with_print_when(Expression::parameter(SHOW_SUMMARY));
    if label_end > 0 {
        band = band.with_element(Element::StaticText(StaticTextElement {
            bounds: Bounds::span(0, label_end, height),
            text: "Total".to_string(),
            style: BuiltinStyle::KeyLabel.name().to_string(),
        }));
    }
    band.with_elements(
        [
            cell("planned", planned.clone(), AMOUNT_PATTERN),
            cell("actual", actual.clone(), AMOUNT_PATTERN),
            cell(
                "difference",
                Expression::arithmetic(ArithmeticOp::Subtract, planned.clone(), actual.clone()),
                AMOUNT_PATTERN,
            ),
            cell("executionPercent", Expression::percent(actual, planned), PERCENT_PATTERN),
        ]
        .into_iter()
        .flatten(),
    )
}

/// Lays out the budget rows and returns the builder and the fill rows.
pub fn budget_detail(
    context: &AssemblyContext,
    rows: &[Row],
    mut builder: DesignBuilder,
) -> (DesignBuilder, Vec<Row>) {
    let section_background = context
        .styles
        .builtin(BuiltinStyle::BudgetSection)
        .and_then(|s| s.background_color)
        .unwrap_or(Color::gray(210));
    let layout = context
        .engine
        .layout(&budget_model(), context.page.content_width(), &context.styles)
        .map_cell("name", |text| text.with_left_indent(Expression::field("indent")))
        .with_row_styles(&emphasis_styles(section_background));
    log::debug!("Budget table with {} rows", rows.len());

    let rows = layout.prepare_rows(rows);
    let summary = summary(&layout, context.engine.config().summary_height);
    builder.add_variable(top_level_total(TOTAL_PLANNED, "planned"));
    builder.add_variable(top_level_total(TOTAL_ACTUAL, "actual"));
    builder.add_parameter(SHOW_SUMMARY, DataType::Boolean, true);
    let builder = layout.apply(builder).with_summary(summary);
    (builder, rows)
}
