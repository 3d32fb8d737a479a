//! Defines the unified error type for all pipeline operations.

use folio_assembler::AssembleError;
use folio_document::RenderError;
use folio_style::StyleParseError;
use thiserror::Error;

/// The main error enum for all high-level operations.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Style declaration error: {0}")]
    Style(#[from] StyleParseError),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Assembly error: {0}")]
    Assemble(#[from] AssembleError),
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
}
