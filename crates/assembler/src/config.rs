use folio_analyzer::ScalarArrayPolicy;
use serde::Deserialize;

/// Geometry of the generic and budget documents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssemblerConfig {
    /// Pixels of indentation per nesting level.
    pub indent_unit: i32,
    pub title_height: i32,
    pub heading_height: i32,
    pub key_value_height: i32,
    /// Share of the row given to a key/value label, in percent.
    pub label_width_percent: i32,
    pub toc_entry_height: i32,
    pub page_header_line_height: i32,
    pub footer_height: i32,
    pub chart_height: i32,
    pub scalar_arrays: ScalarArrayPolicy,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            indent_unit: 10,
            title_height: 40,
            heading_height: 24,
            key_value_height: 18,
            label_width_percent: 35,
            toc_entry_height: 16,
            page_header_line_height: 12,
            footer_height: 20,
            chart_height: 220,
            scalar_arrays: ScalarArrayPolicy::default(),
        }
    }
}

impl AssemblerConfig {
    /// Left indentation for content at `depth` (top level is depth 1).
    pub fn indent_for(&self, depth: usize) -> i32 {
        depth.saturating_sub(1) as i32 * self.indent_unit
    }
}
