use folio_analyzer::AnalyzeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssembleError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Analysis failed: {0}")]
    Analyze(#[from] AnalyzeError),
}
