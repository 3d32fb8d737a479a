//! The generic path: one detail row per report element.
//!
//! The detail band carries every kind of field at once; each is printed
//! only when the row's `kind` matches. Tables and charts travel inside the
//! row as `Value::Document`, so a subreport needs no positional slot.

use crate::context::AssemblyContext;
use folio_analyzer::{ElementContent, ElementKind, ReportElement};
use folio_document::{
    ArithmeticOp, Band, DesignBuilder, Element, Expression, Row, SubreportElement,
    SubreportSource, TextElement, Value,
};
use folio_model::DataType;
use folio_style::BuiltinStyle;
use folio_types::Bounds;

pub const KIND: &str = "kind";
pub const LABEL: &str = "label";
pub const VALUE: &str = "value";
pub const DEPTH: &str = "depth";
pub const ANCHOR: &str = "anchor";
pub const CONTENT: &str = "content";

/// Indentation prefix repeated `depth - 1` times before a heading.
const HEADING_INDENT: &str = "    ";

fn is_kind(kind: ElementKind) -> Expression {
    Expression::text_equals(Expression::field(KIND), kind.name())
}

/// `(depth - 1) * indent_unit` evaluated per row.
fn depth_indent(indent_unit: i32) -> Expression {
    Expression::arithmetic(
        ArithmeticOp::Multiply,
        Expression::arithmetic(
            ArithmeticOp::Subtract,
            Expression::field(DEPTH),
            Expression::literal(Value::Integer(1)),
        ),
        Expression::literal(Value::Integer(indent_unit.into())),
    )
}

/// Declares the element fields and installs the detail band.
pub fn element_detail(context: &AssemblyContext, mut builder: DesignBuilder) -> DesignBuilder {
    builder.add_field(KIND, DataType::Text);
    builder.add_field(LABEL, DataType::Text);
    builder.add_field(VALUE, DataType::Text);
    builder.add_field(DEPTH, DataType::Integer);
    builder.add_field(ANCHOR, DataType::Text);
    builder.add_field(CONTENT, DataType::Table);

    let config = &context.config;
    let width = context.page.content_width();
    let height = config.key_value_height.max(config.heading_height);
    let label_width = width * config.label_width_percent / 100;

    let heading = TextElement::new(
        Bounds::new(0, 0, width, config.heading_height),
        Expression::concat(vec![
            Expression::repeat(
                HEADING_INDENT,
                Expression::arithmetic(
                    ArithmeticOp::Subtract,
                    Expression::field(DEPTH),
                    Expression::literal(Value::Integer(1)),
                ),
            ),
            Expression::field(LABEL),
        ]),
        BuiltinStyle::Heading.name(),
    )
    .with_print_when(is_kind(ElementKind::Header))
    .with_bookmark(Expression::field(DEPTH), Expression::field(ANCHOR));

    let key = TextElement::new(
        Bounds::new(0, 0, label_width, config.key_value_height),
        Expression::field(LABEL),
        BuiltinStyle::KeyLabel.name(),
    )
    .with_print_when(is_kind(ElementKind::KeyValue))
    .with_left_indent(depth_indent(config.indent_unit));

    let value = TextElement::new(
        Bounds::span(label_width, width, config.key_value_height),
        Expression::field(VALUE),
        BuiltinStyle::KeyValue.name(),
    )
    .with_print_when(is_kind(ElementKind::KeyValue));

    let embedded = |kind: ElementKind| {
        Element::Subreport(SubreportElement {
            bounds: Bounds::new(0, 0, width, config.key_value_height),
            source: SubreportSource::Field(CONTENT.to_string()),
            print_when: Some(is_kind(kind)),
            left_indent: Some(depth_indent(config.indent_unit)),
        })
    };

    let detail = Band::new(height)
        .with_element(Element::Text(heading))
        .with_element(Element::Text(key))
        .with_element(Element::Text(value))
        .with_element(embedded(ElementKind::Table))
        .with_element(embedded(ElementKind::Chart));
    builder.with_detail(detail)
}

/// Converts one element into its detail row. Tables and charts are laid
/// out here at the content width minus the element's indentation.
pub fn element_row(context: &mut AssemblyContext, element: ReportElement) -> Row {
    let mut row = Row::new();
    let kind = element.kind();
    row.insert(KIND.into(), Value::from(kind.name()));
    row.insert(LABEL.into(), Value::from(element.label.as_str()));
    row.insert(DEPTH.into(), Value::Integer(element.depth as i64));

    let indent = context.config.indent_for(element.depth);
    let width = context.page.content_width() - indent;
    let (value, anchor, content) = match &element.content {
        ElementContent::Header => {
            let anchor = context.next_anchor(&element.label);
            (Value::Null, Value::from(anchor.as_str()), Value::Null)
        }
        ElementContent::KeyValue(text) => (Value::from(text.as_str()), Value::Null, Value::Null),
        ElementContent::Table(rows) => {
            log::debug!("Embedding table '{}' with {} rows at {}px", element.label, rows.len(), width);
            let document = context.table_document(&element.label, rows, width);
            (Value::Null, Value::Null, Value::from(document))
        }
        ElementContent::Chart(spec) => {
            let document = context.chart_document(&element.label, spec, width);
            (Value::Null, Value::Null, Value::from(document))
        }
    };
    row.insert(VALUE.into(), value);
    row.insert(ANCHOR.into(), anchor);
    row.insert(CONTENT.into(), content);
    row
}
