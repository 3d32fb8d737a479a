use crate::config::AssemblerConfig;
use folio_document::{Band, Element, StaticTextElement};
use folio_style::BuiltinStyle;
use folio_types::Bounds;
use serde::Deserialize;

/// Issuer details printed at the top of every page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyHeader {
    pub name: String,
    pub address_lines: Vec<String>,
    pub tax_id: Option<String>,
}

impl CompanyHeader {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_address_line(mut self, line: impl Into<String>) -> Self {
        self.address_lines.push(line.into());
        self
    }

    pub fn with_tax_id(self, tax_id: impl Into<String>) -> Self {
        Self { tax_id: Some(tax_id.into()), ..self }
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.name.clone()];
        lines.extend(self.address_lines.iter().cloned());
        if let Some(tax_id) = &self.tax_id {
            lines.push(format!("Tax ID: {}", tax_id));
        }
        lines
    }
}

pub fn page_header_band(header: &CompanyHeader, width: i32, config: &AssemblerConfig) -> Band {
    let line_height = config.page_header_line_height;
    let lines = header.lines();
    let style = BuiltinStyle::CompanyHeader.name();
    Band::new(line_height * lines.len() as i32)
        .unsplittable()
        .with_elements(lines.into_iter().enumerate().map(|(i, text)| {
            Element::StaticText(StaticTextElement {
                bounds: Bounds::new(0, i as i32 * line_height, width, line_height),
                text,
                style: style.to_string(),
            })
        }))
}
