//! Folio infers a paginated band/field report document from arbitrary JSON.
//!
//! ```no_run
//! use folio::{PipelineBuilder, PreviewRenderer};
//!
//! # fn main() -> Result<(), folio::PipelineError> {
//! let input: serde_json::Value = serde_json::from_str(r#"{"customer": {"name": "ACME"}}"#)?;
//! let pipeline = PipelineBuilder::new().with_title("Customer").build()?;
//! pipeline.generate(&input, &PreviewRenderer::new(), std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;

pub use config::ReportConfig;
pub use error::PipelineError;
pub use pipeline::{DocumentKind, Pipeline, PipelineBuilder};
pub use render::{FilledDocument, PreviewRenderer};

pub use folio_assembler::{AssembledDocument, CompanyHeader};
pub use folio_document::{FillData, ReportDesign, ReportRenderer};
pub use folio_types::TocEntry;

#[cfg(test)]
mod config_test;
