//! The page footer: free text on the left, the page counter on the right.
//! It is hidden on page 1 when that page holds the table of contents.

use crate::config::AssemblerConfig;
use folio_document::{
    Band, CompareMode, CompareOp, Element, Expression, StaticTextElement, TextElement, Value,
    PAGE_NUMBER,
};
use folio_style::{BuiltinStyle, Style, TextAlign};
use folio_types::Bounds;

/// Boolean parameter: page 1 is a table-of-contents page.
pub const TOC_FIRST_PAGE: &str = "TOC_FIRST_PAGE";
pub const PAGE_NUMBER_STYLE: &str = "page-number";

pub fn page_number_style() -> Style {
    BuiltinStyle::PageFooter
        .default_style()
        .renamed(PAGE_NUMBER_STYLE)
        .with_text_align(TextAlign::Right)
}

/// `NOT(PAGE_NUMBER == 1 AND TOC_FIRST_PAGE)`.
pub fn footer_condition() -> Expression {
    Expression::not(Expression::and(vec![
        Expression::compare(
            CompareOp::Eq,
            CompareMode::Numeric,
            Expression::variable(PAGE_NUMBER),
            Expression::literal(Value::Integer(1)),
        ),
        Expression::parameter(TOC_FIRST_PAGE),
    ]))
}

pub fn page_footer_band(text: &str, width: i32, config: &AssemblerConfig) -> Band {
    let height = config.footer_height;
    let counter_width = (width / 4).max(0);
    Band::new(height)
        .unsplittable()
        .with_print_when(footer_condition())
        .with_element(Element::StaticText(StaticTextElement {
            bounds: Bounds::new(0, 0, width - counter_width, height),
            text: text.to_string(),
            style: BuiltinStyle::PageFooter.name().to_string(),
        }))
        .with_element(Element::Text(TextElement::new(
            Bounds::new(width - counter_width, 0, counter_width, height),
            Expression::concat(vec![Expression::text("Page "), Expression::variable(PAGE_NUMBER)]),
            PAGE_NUMBER_STYLE,
        )))
}
