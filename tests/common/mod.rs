#![allow(dead_code)]

pub mod fixtures;

use folio::{
    AssembledDocument, FilledDocument, Pipeline, PipelineBuilder, PipelineError, PreviewRenderer,
    ReportConfig, ReportRenderer,
};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a pipeline from a JSON configuration string.
pub fn pipeline_from_config(config: &str) -> Result<Pipeline, PipelineError> {
    PipelineBuilder::new().with_config(ReportConfig::from_json_str(config)?).build()
}

/// Compiles and fills an assembled document with the preview renderer.
pub fn fill(document: &AssembledDocument) -> Result<FilledDocument, PipelineError> {
    let renderer = PreviewRenderer::new();
    let compiled = renderer.compile(&document.design)?;
    Ok(renderer.fill(&compiled, &document.data)?)
}

/// Assembles `input` with `pipeline` and fills the result.
pub fn preview(pipeline: &Pipeline, input: &Value) -> Result<FilledDocument, PipelineError> {
    fill(&pipeline.assemble(input)?)
}

/// Runs the whole pipeline and parses the exported preview back.
pub fn generate_json(pipeline: &Pipeline, input: &Value) -> Result<Value, Box<dyn std::error::Error>> {
    let mut out = Vec::new();
    pipeline.generate(input, &PreviewRenderer::new().compact(), &mut out)?;
    Ok(serde_json::from_slice(&out)?)
}
