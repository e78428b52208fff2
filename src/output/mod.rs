// Output generation module

pub mod diagrams;
pub mod markdown;

pub use diagrams::*;
pub use markdown::*;

use crate::analysis::AnalysisResult;
use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use std::path::Path;

/// Render an analysis result in the configured format
pub fn render(analysis: &AnalysisResult, config: &OutputConfig) -> Result<String> {
    match config.format {
        OutputFormat::Markdown => {
            MarkdownGenerator::new(&config.title, &config.direction)?.render(analysis)
        }
        OutputFormat::Mermaid => {
            let diagram = DiagramGenerator::new()
                .with_direction(&config.direction)
                .generate_class_diagram(&analysis.graph);
            Ok(diagram + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&analysis.graph)? + "\n"),
    }
}

/// Write rendered output, creating parent directories as needed
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)?;
    Ok(())
}
