//! Column header and detail bands.

use crate::config::LayoutConfig;
use crate::widths::ResolvedColumn;
use folio_document::{
    Band, ConditionalStyle, Element, Expression, StaticTextElement, SubreportElement,
    SubreportSource, TextElement,
};
use folio_model::{ColumnSpec, DataType};
use folio_style::{BuiltinStyle, StyleRegistry};
use folio_types::Bounds;

/// The style of a detail cell. An empty or unregistered `styleRef` falls
/// back to the built-in detail style for the column's type.
pub fn cell_style(column: &ColumnSpec, styles: &StyleRegistry) -> String {
    let fallback = if column.data_type.is_numeric() {
        BuiltinStyle::DetailNumeric
    } else {
        BuiltinStyle::Detail
    };
    resolve_style(&column.style_ref, fallback, styles)
}

/// `style_ref` when it names a registered style, `fallback` otherwise.
pub fn resolve_style(style_ref: &str, fallback: BuiltinStyle, styles: &StyleRegistry) -> String {
    if style_ref.is_empty() || styles.resolve(style_ref).is_none() {
        return fallback.name().to_string();
    }
    style_ref.to_string()
}

pub fn column_header_band(columns: &[ResolvedColumn], config: &LayoutConfig) -> Band {
    let height = config.header_height;
    Band::new(height).unsplittable().with_elements(columns.iter().map(|column| {
        Element::StaticText(StaticTextElement {
            bounds: Bounds::new(column.x, 0, column.width, height),
            text: column.spec.title.clone(),
            style: BuiltinStyle::ColumnHeader.name().to_string(),
        })
    }))
}

/// One cell per visible column. Nested-table columns embed their
/// sub-document; every other cell is a text field carrying the row styles.
pub fn detail_band(
    columns: &[ResolvedColumn],
    config: &LayoutConfig,
    row_styles: &[ConditionalStyle],
    styles: &StyleRegistry,
) -> Band {
    let height = config.row_height;
    Band::new(height).with_elements(columns.iter().map(|column| {
        let bounds = Bounds::new(column.x, 0, column.width, height);
        let name = column.spec.field_name();
        if column.spec.data_type == DataType::Table {
            return Element::Subreport(SubreportElement {
                bounds,
                source: SubreportSource::Field(name),
                print_when: None,
                left_indent: None,
            });
        }
        Element::Text(
            TextElement::new(bounds, Expression::field(name), cell_style(&column.spec, styles))
                .with_pattern(column.spec.format.clone())
                .with_conditional_styles(row_styles.to_vec()),
        )
    }))
}
