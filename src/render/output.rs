//! The filled, paginated document produced by the preview renderer.

use folio_document::Value;
use folio_model::ChartType;
use folio_style::FontWeight;
use folio_types::{Bounds, Color};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledDocument {
    pub name: String,
    pub pages: Vec<FilledPage>,
    pub bookmarks: Vec<Bookmark>,
}

impl FilledDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every filled band across all pages, in order.
    pub fn bands(&self) -> impl Iterator<Item = &FilledBand> {
        self.pages.iter().flat_map(|p| p.bands.iter())
    }

    /// Bands of one section (`detail`, `summary`, `<group>.header`, …).
    pub fn section<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a FilledBand> + 'a {
        self.bands().filter(move |b| b.section == section)
    }

    /// All printed text in fill order, including embedded documents.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for band in self.bands() {
            band.collect_texts(&mut out);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledPage {
    pub number: i64,
    pub bands: Vec<FilledBand>,
}

/// One placed band. `y` is relative to the top of the page content area,
/// or to the top of the enclosing subreport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledBand {
    pub section: String,
    pub y: i32,
    pub height: i32,
    pub elements: Vec<FilledElement>,
}

impl FilledBand {
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        for element in &self.elements {
            match element {
                FilledElement::Text(text) => out.push(&text.text),
                FilledElement::Subreport { bands, .. } => {
                    for band in bands {
                        band.collect_texts(out);
                    }
                }
                FilledElement::Rectangle { .. } | FilledElement::Chart(_) => {}
            }
        }
    }

    pub fn text_elements(&self) -> impl Iterator<Item = &FilledText> {
        self.elements.iter().filter_map(|e| match e {
            FilledElement::Text(text) => Some(text),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilledElement {
    Text(FilledText),
    Rectangle { bounds: Bounds, color: Color },
    Subreport { bounds: Bounds, bands: Vec<FilledBand> },
    Chart(FilledChart),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledText {
    pub bounds: Bounds,
    pub text: String,
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    pub font_weight: FontWeight,
    #[serde(skip_serializing_if = "is_zero")]
    pub indent: i32,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledChart {
    pub bounds: Bounds,
    pub chart_type: ChartType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub categories: Vec<String>,
    pub series: Vec<FilledSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledSeries {
    pub name: String,
    pub values: Vec<Value>,
}

/// An outline entry recorded when a bookmarked element is printed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub level: i64,
    pub label: String,
    pub anchor: String,
    pub page: i64,
}
