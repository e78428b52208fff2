//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate class relationship diagrams from C/C++ headers
#[derive(Parser, Debug)]
#[command(name = "classmap")]
#[command(about = "Generate class relationship diagrams from C/C++ headers")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan headers and write the class relationship document
    Generate {
        /// Root directory to scan for C/C++ headers [default: src]
        #[arg(long)]
        source_root: Option<PathBuf>,

        /// Output file [default: docs/generated/class-relationships.md]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Glob patterns to exclude, relative to the source root (can be repeated)
        #[arg(long)]
        exclude: Vec<String>,

        /// Config file path [default: classmap.toml]
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (markdown, mermaid, json)
        #[arg(long)]
        format: Option<String>,

        /// Diagram direction (TB, BT, LR, RL)
        #[arg(long)]
        direction: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}

impl Command {
    /// Whether verbose logging was requested
    pub fn verbose(&self) -> bool {
        matches!(self, Command::Generate { verbose: true, .. })
    }
}
