use folio::{PipelineBuilder, PipelineError, PreviewRenderer, ReportConfig};
use std::env;
use std::fs;
use std::io;

/// Prints the paginated preview of a JSON input as JSON.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Infers a paginated report from a JSON document and prints its preview.");
        eprintln!();
        eprintln!("Usage: {} <path/to/data.json> [path/to/config.json]", args[0]);
        std::process::exit(1);
    }

    let data_path = &args[1];
    log::info!("Loading data from {}", data_path);
    let source = fs::read_to_string(data_path)?;
    let input: serde_json::Value = serde_json::from_str(&source)?;

    let config = match args.get(2) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            ReportConfig::from_file(path)?
        }
        None => ReportConfig::default(),
    };

    let pipeline = PipelineBuilder::new().with_config(config).build()?;
    let stdout = io::stdout();
    pipeline.generate(&input, &PreviewRenderer::new(), stdout.lock())?;
    Ok(())
}
