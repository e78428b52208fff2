// Diagram generation for Classmap
//
// Renders the type graph as a Mermaid class diagram.

use crate::analysis::TypeGraph;

/// Diagram generator for creating Mermaid diagrams
pub struct DiagramGenerator {
    /// Layout direction (TB, LR, BT, RL)
    direction: String,
}

impl DiagramGenerator {
    /// Create a new diagram generator
    pub fn new() -> Self {
        Self {
            direction: "LR".to_string(),
        }
    }

    /// Set layout direction
    pub fn with_direction(mut self, dir: &str) -> Self {
        self.direction = dir.to_string();
        self
    }

    /// Generate the class relationship diagram
    pub fn generate_class_diagram(&self, graph: &TypeGraph) -> String {
        let mut lines = Vec::new();
        lines.push("classDiagram".to_string());
        lines.push(format!("  direction {}", self.direction));

        for node in &graph.nodes {
            lines.push(format!("  class {}", node.name));
        }

        for edge in &graph.inheritance {
            lines.push(format!("  {} <|-- {}", edge.base, edge.derived));
        }

        for edge in &graph.usage {
            lines.push(format!("  {} --> {} : uses", edge.from, edge.to));
        }

        lines.join("\n")
    }
}

impl Default for DiagramGenerator {
    fn default() -> Self {
        Self::new()
    }
}
