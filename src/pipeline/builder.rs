// src/pipeline/builder.rs
use super::Pipeline;
use crate::config::ReportConfig;
use crate::error::PipelineError;
use folio_assembler::{CompanyHeader, DocumentAssembler};
use folio_types::TocEntry;
use std::path::Path;

/// A builder for creating a `Pipeline`.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    config: ReportConfig,
}

impl PipelineBuilder {
    /// Creates a new `PipelineBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PipelineError> {
        Ok(self.with_config(ReportConfig::from_file(path)?))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn with_company_header(mut self, company: CompanyHeader) -> Self {
        self.config.company = Some(company);
        self
    }

    pub fn with_footer_text(mut self, text: impl Into<String>) -> Self {
        self.config.footer_text = text.into();
        self
    }

    /// Supplies table of contents entries. An empty list disables the TOC.
    pub fn with_toc(mut self, toc: Vec<TocEntry>) -> Self {
        self.config.toc = toc;
        self
    }

    /// Consumes the builder and creates the `Pipeline`. Fails when a
    /// declared style cannot be parsed.
    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let config = self.config;
        let styles = config.style_registry()?;
        let mut assembler = DocumentAssembler::new()
            .with_config(config.assembler.clone())
            .with_layout_config(config.layout.clone())
            .with_page(config.page)
            .with_styles(styles)
            .with_table_model(config.table_model())
            .with_title(config.title.clone())
            .with_footer_text(config.footer_text.clone())
            .with_toc(config.toc.clone());
        if let Some(company) = config.company.clone() {
            assembler = assembler.with_company_header(company);
        }
        log::debug!(
            "Built pipeline '{}' with {} styles, {} columns, {} groups",
            config.title,
            config.styles.len(),
            config.columns.len(),
            config.groups.len()
        );
        Ok(Pipeline::new(assembler, config.assembler.indent_unit))
    }
}
