//! CLI module for Classmap

mod args;

pub use args::{Args, Command};

use crate::analysis::Analyzer;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::{render, write_output};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "classmap.toml";

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_tracing(args.command.verbose());

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the log subscriber; `RUST_LOG` overrides the verbosity flag
fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,classmap=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Generate {
            source_root,
            output,
            exclude,
            config,
            format,
            direction,
            verbose,
        } => {
            // An explicit config file must exist; the default one is optional
            let mut cfg = match &config {
                Some(path) => Config::load(path)?,
                None => Config::load_or_default(Path::new(DEFAULT_CONFIG))?,
            };

            let format = format.as_deref().map(OutputFormat::parse).transpose()?;
            cfg.merge_cli(source_root, output, exclude, format, direction);
            cfg.validate()?;

            debug!("Source root: {}", cfg.scan.source_root.display());
            debug!("Output: {}", cfg.output.path.display());
            debug!("Format: {:?}", cfg.output.format);
            debug!("Extensions: {:?}", cfg.scan.extensions);
            debug!("Exclude: {:?}", cfg.scan.exclude);

            let analyzer = Analyzer::new(cfg.clone())?.with_verbose(verbose);
            let analysis = analyzer.analyze(&cfg.scan.source_root)?;

            let rendered = render(&analysis, &cfg.output)?;
            write_output(&cfg.output.path, &rendered)?;

            let written = cfg
                .output
                .path
                .canonicalize()
                .unwrap_or_else(|_| cfg.output.path.clone());
            println!("Generated diagram doc: {}", written.display());
            println!("Discovered classes: {}", analysis.declarations);

            Ok(())
        }

        Command::Version => {
            println!("classmap {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
