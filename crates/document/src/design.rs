//! The declarative band/field model handed to the rendering collaborator.
//!
//! A `ReportDesign` describes what a page looks like and how data flows
//! through it; it never performs layout arithmetic of its own beyond the
//! positions already resolved by the layout engine.

use crate::expression::Expression;
use crate::value::{Row, Value};
use folio_model::{Calculation, ChartType, DataType};
use folio_style::{FontWeight, Insets, StyleRegistry};
use folio_types::{Bounds, Color};
use serde::{Deserialize, Serialize};

/// Page geometry in pixels (1px = 1pt).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSetup {
    pub width: i32,
    pub height: i32,
    pub margins: Insets,
}

impl Default for PageSetup {
    /// A4 portrait with 20px margins.
    fn default() -> Self {
        Self { width: 595, height: 842, margins: Insets::all(20) }
    }
}

impl PageSetup {
    pub fn content_width(&self) -> i32 {
        self.width - self.margins.horizontal()
    }

    pub fn content_height(&self) -> i32 {
        self.height - self.margins.top - self.margins.bottom
    }

    /// The same page narrowed to `width` with no margins, as used by
    /// embedded sub-documents.
    pub fn embedded(width: i32, height: i32) -> Self {
        Self { width, height, margins: Insets::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDecl {
    pub name: String,
    pub data_type: DataType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDecl {
    pub name: String,
    pub data_type: DataType,
    pub default: Value,
}

/// When a variable's running value is reset to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResetScope {
    Report,
    Group(String),
    None,
}

/// When an element or variable is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EvaluationTime {
    /// As the band is filled.
    #[default]
    Now,
    /// When the named group breaks.
    Group(String),
    /// After the last row.
    Report,
}

/// A named accumulator updated once per detail row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDecl {
    pub name: String,
    pub data_type: DataType,
    pub calculation: Calculation,
    pub expression: Expression,
    pub reset: ResetScope,
    pub evaluation: EvaluationTime,
}

impl VariableDecl {
    pub fn new(name: impl Into<String>, calculation: Calculation, expression: Expression) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::Decimal,
            calculation,
            expression,
            reset: ResetScope::Report,
            evaluation: EvaluationTime::Report,
        }
    }

    pub fn with_data_type(self, data_type: DataType) -> Self {
        Self { data_type, ..self }
    }

    /// Resets at every break of `group` and is evaluated at that break.
    pub fn per_group(self, group: impl Into<String>) -> Self {
        let group = group.into();
        Self {
            reset: ResetScope::Group(group.clone()),
            evaluation: EvaluationTime::Group(group),
            ..self
        }
    }
}

/// Attributes overriding a text element's style while `condition` holds.
/// Matching overrides are applied in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalStyle {
    pub condition: Expression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
}

impl ConditionalStyle {
    pub fn background(condition: Expression, color: Color) -> Self {
        Self { condition, background: Some(color), font_weight: None }
    }

    pub fn bold(condition: Expression) -> Self {
        Self { condition, background: None, font_weight: Some(FontWeight::Bold) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub bounds: Bounds,
    pub expression: Expression,
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_when: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark_level: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Expression>,
    /// Extra left padding in pixels, evaluated per row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_indent: Option<Expression>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditional_styles: Vec<ConditionalStyle>,
    pub evaluation: EvaluationTime,
}

impl TextElement {
    pub fn new(bounds: Bounds, expression: Expression, style: impl Into<String>) -> Self {
        Self {
            bounds,
            expression,
            style: style.into(),
            pattern: None,
            print_when: None,
            bookmark_level: None,
            anchor: None,
            left_indent: None,
            conditional_styles: Vec::new(),
            evaluation: EvaluationTime::Now,
        }
    }

    pub fn with_pattern(self, pattern: Option<String>) -> Self {
        Self { pattern, ..self }
    }

    pub fn with_print_when(self, condition: Expression) -> Self {
        Self { print_when: Some(condition), ..self }
    }

    pub fn with_bookmark(self, level: Expression, anchor: Expression) -> Self {
        Self { bookmark_level: Some(level), anchor: Some(anchor), ..self }
    }

    pub fn with_left_indent(self, indent: Expression) -> Self {
        Self { left_indent: Some(indent), ..self }
    }

    pub fn with_conditional_styles(self, conditional_styles: Vec<ConditionalStyle>) -> Self {
        Self { conditional_styles, ..self }
    }

    pub fn evaluated_at(self, evaluation: EvaluationTime) -> Self {
        Self { evaluation, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticTextElement {
    pub bounds: Bounds,
    pub text: String,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleElement {
    pub bounds: Bounds,
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_when: Option<Expression>,
}

/// Where an embedded sub-document finds its rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubreportSource {
    /// A row field holding a `Value::Document`.
    Field(String),
    /// A parameter holding a `Value::Document`, for bands filled outside
    /// any row such as the title.
    Parameter(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubreportElement {
    pub bounds: Bounds,
    pub source: SubreportSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_when: Option<Expression>,
    /// Pixels the sub-document is shifted right and narrowed by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_indent: Option<Expression>,
}

/// A chart drawn from every row of the document it is placed in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartElement {
    pub bounds: Bounds,
    pub chart_type: ChartType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub category_field: String,
    pub series: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    Text(TextElement),
    StaticText(StaticTextElement),
    Rectangle(RectangleElement),
    Subreport(SubreportElement),
    Chart(ChartElement),
    PageBreak,
}

impl Element {
    /// Every expression the element evaluates.
    pub fn expressions(&self) -> Vec<&Expression> {
        match self {
            Element::Text(text) => {
                let mut out = vec![&text.expression];
                out.extend(text.print_when.iter());
                out.extend(text.bookmark_level.iter());
                out.extend(text.anchor.iter());
                out.extend(text.left_indent.iter());
                out.extend(text.conditional_styles.iter().map(|c| &c.condition));
                out
            }
            Element::Rectangle(rect) => rect.print_when.iter().collect(),
            Element::Subreport(sub) => sub.print_when.iter().chain(sub.left_indent.iter()).collect(),
            Element::StaticText(_) | Element::Chart(_) | Element::PageBreak => Vec::new(),
        }
    }

    /// The style name the element references, if any.
    pub fn style(&self) -> Option<&str> {
        match self {
            Element::Text(text) => Some(&text.style),
            Element::StaticText(text) => Some(&text.style),
            _ => None,
        }
    }
}

/// A horizontal region of the page filled as a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub height: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_when: Option<Expression>,
    pub split_allowed: bool,
    pub elements: Vec<Element>,
}

impl Band {
    pub fn new(height: i32) -> Self {
        Self { height, print_when: None, split_allowed: true, elements: Vec::new() }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_elements(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.elements.extend(elements);
        self
    }

    pub fn with_print_when(self, condition: Expression) -> Self {
        Self { print_when: Some(condition), ..self }
    }

    pub fn unsplittable(self) -> Self {
        Self { split_allowed: false, ..self }
    }

    pub fn expressions(&self) -> Vec<&Expression> {
        self.print_when
            .iter()
            .chain(self.elements.iter().flat_map(Element::expressions))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDecl {
    pub name: String,
    /// The group key; a break happens whenever its value changes.
    pub expression: Expression,
    pub indent: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Band>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Band>,
}

impl GroupDecl {
    pub fn new(name: impl Into<String>, expression: Expression) -> Self {
        Self { name: name.into(), expression, indent: 0, header: None, footer: None }
    }

    pub fn with_indent(self, indent: i32) -> Self {
        Self { indent, ..self }
    }

    pub fn with_header(self, header: Band) -> Self {
        Self { header: Some(header), ..self }
    }

    pub fn with_footer(self, footer: Band) -> Self {
        Self { footer: Some(footer), ..self }
    }
}

/// A complete declarative document ready for compilation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDesign {
    pub name: String,
    pub page: PageSetup,
    pub fields: Vec<FieldDecl>,
    pub parameters: Vec<ParameterDecl>,
    pub variables: Vec<VariableDecl>,
    pub styles: StyleRegistry,
    pub groups: Vec<GroupDecl>,
    pub title: Option<Band>,
    pub page_header: Option<Band>,
    pub column_header: Option<Band>,
    pub detail: Option<Band>,
    pub page_footer: Option<Band>,
    pub summary: Option<Band>,
    pub no_data: Option<Band>,
}

impl ReportDesign {
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDecl> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn variable(&self, name: &str) -> Option<&VariableDecl> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn group(&self, name: &str) -> Option<&GroupDecl> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Every band in fill order, labelled by section.
    pub fn bands(&self) -> Vec<(String, &Band)> {
        let mut sections: Vec<(String, &Option<Band>)> = vec![
            ("title".to_string(), &self.title),
            ("pageHeader".to_string(), &self.page_header),
            ("columnHeader".to_string(), &self.column_header),
        ];
        sections.extend(self.groups.iter().map(|g| (format!("{}.header", g.name), &g.header)));
        sections.push(("detail".to_string(), &self.detail));
        sections.extend(self.groups.iter().rev().map(|g| (format!("{}.footer", g.name), &g.footer)));
        sections.push(("pageFooter".to_string(), &self.page_footer));
        sections.push(("summary".to_string(), &self.summary));
        sections.push(("noData".to_string(), &self.no_data));
        sections
            .into_iter()
            .filter_map(|(label, band)| band.as_ref().map(|band| (label, band)))
            .collect()
    }
}

/// A design together with the rows that fill it, embedded as a row value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubDocument {
    pub design: ReportDesign,
    pub rows: Vec<Row>,
}

impl SubDocument {
    pub fn new(design: ReportDesign, rows: Vec<Row>) -> Self {
        Self { design, rows }
    }
}

impl From<SubDocument> for Value {
    fn from(doc: SubDocument) -> Self {
        Value::Document(Box::new(doc))
    }
}
