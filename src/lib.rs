//! Classmap - Generate class relationship diagrams from C/C++ headers
//!
//! Scans a header tree for `class`/`struct` definitions, extracts their
//! direct bases and references to other discovered types, and renders the
//! result as a Mermaid class diagram.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;

// Re-export main types
pub use analysis::{
    build_relationships, AnalysisResult, Analyzer, ExtractedType, GraphStats, InheritanceEdge,
    TypeGraph, TypeNode, UsageEdge, UsageDetector,
};
pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use output::{DiagramGenerator, MarkdownGenerator};
pub use parser::{BaseListParser, DeclarationScanner, DeclarationSite, SourceUnit, TypeKind};
