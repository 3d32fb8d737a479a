//! Title band and table of contents.
//!
//! The entries are handed in by the caller; nothing here computes them.

use crate::config::AssemblerConfig;
use folio_document::{
    Band, DesignBuilder, Element, Expression, PageSetup, Row, StaticTextElement, SubDocument,
    SubreportElement, SubreportSource, TextElement, Value,
};
use folio_model::DataType;
use folio_style::{BuiltinStyle, StyleRegistry};
use folio_types::{Bounds, TocEntry};

/// Parameter holding the table-of-contents sub-document.
pub const TOC_PARAMETER: &str = "TOC";

pub fn toc_document(
    entries: &[TocEntry],
    width: i32,
    config: &AssemblerConfig,
    styles: &StyleRegistry,
) -> SubDocument {
    let height = config.toc_entry_height;
    let mut builder = DesignBuilder::new("toc", PageSetup::embedded(width, height), styles.clone());
    builder.add_field("text", DataType::Text);
    builder.add_field("level", DataType::Integer);
    builder.add_field("indent", DataType::Integer);
    let detail = Band::new(height).with_element(Element::Text(
        TextElement::new(
            Bounds::new(0, 0, width, height),
            Expression::field("text"),
            BuiltinStyle::TocEntry.name(),
        )
        .with_left_indent(Expression::field("indent")),
    ));
    let title = Band::new(height).with_element(Element::StaticText(StaticTextElement {
        bounds: Bounds::new(0, 0, width, height),
        text: "Contents".to_string(),
        style: BuiltinStyle::Heading.name().to_string(),
    }));
    let rows = entries
        .iter()
        .map(|entry| {
            let mut row = Row::new();
            row.insert("text".into(), Value::from(entry.text.as_str()));
            row.insert("level".into(), Value::Integer(entry.level.into()));
            row.insert(
                "indent".into(),
                Value::Integer(config.indent_for(entry.level as usize).into()),
            );
            row
        })
        .collect();
    SubDocument::new(builder.with_title(title).with_detail(detail).build(), rows)
}

/// The report title, followed by the table of contents and a page break
/// when a TOC is present.
pub fn title_band(title: &str, with_toc: bool, width: i32, config: &AssemblerConfig) -> Band {
    let height = config.title_height;
    let band = Band::new(height).with_element(Element::StaticText(StaticTextElement {
        bounds: Bounds::new(0, 0, width, height),
        text: title.to_string(),
        style: BuiltinStyle::Title.name().to_string(),
    }));
    if !with_toc {
        return band;
    }
    Band { height: height + config.toc_entry_height, ..band }
        .with_element(Element::Subreport(SubreportElement {
            bounds: Bounds::new(0, height, width, config.toc_entry_height),
            source: SubreportSource::Parameter(TOC_PARAMETER.to_string()),
            print_when: None,
            left_indent: None,
        }))
        .with_element(Element::PageBreak)
}
