//! Report configuration loaded from JSON.
//!
//! Every field is optional; an empty object `{}` yields the defaults.
//!
//! ```json
//! {
//!   "title": "Orders",
//!   "page": { "width": 842, "height": 595 },
//!   "styles": { "amount": { "textAlign": "right", "pattern": "#,##0.00" } },
//!   "columns": [ { "fieldPath": "total", "title": "Total", "dataType": "decimal" } ],
//!   "groups": [ { "fieldPath": "region", "showFooterAggregates": true } ],
//!   "highlightRules": [ { "field": "total", "operator": "GREATER_THAN", "value": "1000", "background": "#FFCCCC" } ]
//! }
//! ```

use crate::error::PipelineError;
use folio_assembler::{AssemblerConfig, CompanyHeader};
use folio_document::PageSetup;
use folio_layout::{LayoutConfig, TableModel};
use folio_model::{ColumnSpec, GroupSpec, HighlightRule};
use folio_style::{StyleDef, StyleRegistry};
use folio_types::TocEntry;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    pub title: String,
    pub page: PageSetup,
    pub layout: LayoutConfig,
    pub assembler: AssemblerConfig,
    /// User styles, registered ahead of the built-ins.
    pub styles: IndexMap<String, StyleDef>,
    pub columns: Vec<ColumnSpec>,
    pub groups: Vec<GroupSpec>,
    pub highlight_rules: Vec<HighlightRule>,
    pub company: Option<CompanyHeader>,
    pub footer_text: String,
    pub toc: Vec<TocEntry>,
}

impl ReportConfig {
    pub fn from_json_str(source: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config from '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&source)
    }

    /// Resolves the declared styles in declaration order.
    pub fn style_registry(&self) -> Result<StyleRegistry, PipelineError> {
        let mut registry = StyleRegistry::new();
        for (name, def) in &self.styles {
            registry.register(def.clone().into_style(name)?);
        }
        Ok(registry)
    }

    /// The column model used when the input is an array of records.
    pub fn table_model(&self) -> TableModel {
        TableModel::new(self.columns.clone())
            .with_groups(self.groups.clone())
            .with_highlight_rules(self.highlight_rules.clone())
    }
}
