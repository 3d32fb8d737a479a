//! Group header bands and group-scoped accumulators.
//!
//! Group `i` is indented by `i * indentation_step`. When it requests
//! aggregates, its header is split into a background strip, a label that
//! runs up to the first aggregating column, and one value per aggregating
//! column bound to a variable reset at every break of the group.

use crate::bands::resolve_style;
use crate::config::LayoutConfig;
use crate::widths::ResolvedColumn;
use folio_document::{
    Band, Element, EvaluationTime, Expression, GroupDecl, RectangleElement, TextElement,
    VariableDecl,
};
use folio_model::{field_name, Calculation, ColumnSpec, GroupSpec};
use folio_style::{BuiltinStyle, StyleRegistry};
use folio_types::{Bounds, Color};

/// `<group>_<field>_<calculation>`.
pub fn group_variable_name(group: &GroupSpec, column: &ColumnSpec, calculation: Calculation) -> String {
    format!("{}_{}_{}", group.name(), column.field_name(), calculation)
}

/// The display pattern for an aggregate; counts are never decimal-formatted.
pub fn aggregate_pattern(column: &ColumnSpec, calculation: Calculation) -> Option<String> {
    match calculation {
        Calculation::Count | Calculation::DistinctCount => None,
        _ => column.format.clone(),
    }
}

/// Expands a `{value}` template around the group key.
pub fn header_label(group: &GroupSpec) -> Expression {
    let key = Expression::field(field_name(&group.field_path));
    let Some(template) = &group.header_expression else {
        return key;
    };
    let mut parts = Vec::new();
    for (i, text) in template.split("{value}").enumerate() {
        if i > 0 {
            parts.push(key.clone());
        }
        if !text.is_empty() {
            parts.push(Expression::text(text));
        }
    }
    Expression::concat(parts)
}

pub struct GroupLayout {
    pub decl: GroupDecl,
    pub variables: Vec<VariableDecl>,
}

pub fn group_layout(
    rank: usize,
    group: &GroupSpec,
    columns: &[ResolvedColumn],
    row_width: i32,
    config: &LayoutConfig,
    styles: &StyleRegistry,
) -> GroupLayout {
    let name = group.name();
    let indent = rank as i32 * config.indentation_step;
    let decl = GroupDecl::new(&name, Expression::field(field_name(&group.field_path))).with_indent(indent);
    if !group.show_header {
        return GroupLayout { decl, variables: Vec::new() };
    }

    let height = config.group_header_height;
    let style = resolve_style(&group.style_ref, BuiltinStyle::GroupHeader, styles);
    let aggregating: Vec<&ResolvedColumn> = columns
        .iter()
        .filter(|c| c.spec.group_aggregate.is_active())
        .collect();

    if !group.show_footer_aggregates || aggregating.is_empty() {
        let label = TextElement::new(Bounds::span(indent, row_width, height), header_label(group), style);
        let band = Band::new(height).unsplittable().with_element(Element::Text(label));
        return GroupLayout { decl: decl.with_header(band), variables: Vec::new() };
    }

    let strip_color = styles
        .get(&style)
        .and_then(|s| s.background_color)
        .unwrap_or(Color::gray(235));
    let label_end = aggregating[0].x.max(indent);
    let mut band = Band::new(height)
        .unsplittable()
        .with_element(Element::Rectangle(RectangleElement {
            bounds: Bounds::span(indent, row_width, height),
            color: strip_color,
            print_when: None,
        }))
        .with_element(Element::Text(TextElement::new(
            Bounds::span(indent, label_end, height),
            header_label(group),
            style.as_str(),
        )));

    let mut variables = Vec::new();
    for column in aggregating {
        let calculation = column.spec.group_aggregate;
        let variable = VariableDecl::new(
            group_variable_name(group, &column.spec, calculation),
            calculation,
            Expression::field(column.spec.field_name()),
        )
        .with_data_type(calculation.result_type(column.spec.data_type))
        .per_group(&name);
        band = band.with_element(Element::Text(
            TextElement::new(
                Bounds::new(column.x, 0, column.width, height),
                Expression::variable(&variable.name),
                style.as_str(),
            )
            .with_pattern(aggregate_pattern(&column.spec, calculation))
            .evaluated_at(EvaluationTime::Group(name.clone())),
        ));
        variables.push(variable);
    }
    GroupLayout { decl: decl.with_header(band), variables }
}
