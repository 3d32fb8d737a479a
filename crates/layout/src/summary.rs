use crate::config::LayoutConfig;
use crate::groups::aggregate_pattern;
use crate::widths::ResolvedColumn;
use folio_document::{
    Band, Element, EvaluationTime, Expression, StaticTextElement, TextElement, VariableDecl,
};
use folio_model::{Calculation, ColumnSpec};
use folio_style::BuiltinStyle;
use folio_types::Bounds;

/// Parameter that suppresses the summary band when false.
pub const SHOW_SUMMARY: &str = "SHOW_SUMMARY";

/// `REPORT_<field>_<calculation>`.
pub fn report_variable_name(column: &ColumnSpec, calculation: Calculation) -> String {
    format!("REPORT_{}_{}", column.field_name(), calculation)
}

/// The report-level summary: one accumulator per aggregating column,
/// reset only at the start of the document and read after the last row.
/// `None` when no column aggregates.
pub fn summary_band(columns: &[ResolvedColumn], config: &LayoutConfig) -> Option<(Band, Vec<VariableDecl>)> {
    let aggregating: Vec<&ResolvedColumn> = columns
        .iter()
        .filter(|c| c.spec.report_aggregate.is_active())
        .collect();
    let first = aggregating.first()?;

    let height = config.summary_height;
    let style = BuiltinStyle::Summary.name();
    let mut band = Band::new(height)
        .unsplittable()
        .with_print_when(Expression::parameter(SHOW_SUMMARY));
    if first.x > 0 {
        band = band.with_element(Element::StaticText(StaticTextElement {
            bounds: Bounds::span(0, first.x, height),
            text: "Total".to_string(),
            style: BuiltinStyle::KeyLabel.name().to_string(),
        }));
    }

    let mut variables = Vec::new();
    for column in aggregating {
        let calculation = column.spec.report_aggregate;
        let variable = VariableDecl::new(
            report_variable_name(&column.spec, calculation),
            calculation,
            Expression::field(column.spec.field_name()),
        )
        .with_data_type(calculation.result_type(column.spec.data_type));
        band = band.with_element(Element::Text(
            TextElement::new(
                Bounds::new(column.x, 0, column.width, height),
                Expression::variable(&variable.name),
                style,
            )
            .with_pattern(aggregate_pattern(&column.spec, calculation))
            .evaluated_at(EvaluationTime::Report),
        ));
        variables.push(variable);
    }
    Some((band, variables))
}
