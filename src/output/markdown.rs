// Markdown page generation
//
// Wraps the Mermaid diagram in a documentation page with a summary table of
// every discovered type.

use crate::analysis::AnalysisResult;
use crate::error::Result;
use crate::output::diagrams::DiagramGenerator;
use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "class_diagram.md";

/// One row of the summary table
#[derive(Debug, Serialize)]
struct TypeRow<'a> {
    name: &'a str,
    kind: &'static str,
    header: String,
}

/// Renders the class relationship page
pub struct MarkdownGenerator {
    tera: Tera,
    title: String,
    diagrams: DiagramGenerator,
}

impl MarkdownGenerator {
    /// Create a generator using the embedded template
    pub fn new(title: &str, direction: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(
            TEMPLATE_NAME,
            include_str!("../../templates/class_diagram.md.tera"),
        )?;

        Ok(Self {
            tera,
            title: title.to_string(),
            diagrams: DiagramGenerator::new().with_direction(direction),
        })
    }

    /// Render the full page for an analysis result
    pub fn render(&self, analysis: &AnalysisResult) -> Result<String> {
        let graph = &analysis.graph;
        let rows: Vec<TypeRow> = graph
            .nodes
            .iter()
            .map(|node| TypeRow {
                name: &node.name,
                kind: node.kind.as_str(),
                header: to_posix(&node.origin),
            })
            .collect();

        let source = analysis
            .source_root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| analysis.source_root.display().to_string());

        let mut context = Context::new();
        context.insert("title", &self.title);
        context.insert("source", &source);
        context.insert("diagram", &self.diagrams.generate_class_diagram(graph));
        context.insert("rows", &rows);

        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

/// Join path components with `/` regardless of platform
fn to_posix(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
