use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// Header discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub source_root: PathBuf,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub direction: String,
    pub title: String,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Mermaid,
    Json,
}

/// Layout directions understood by Mermaid
pub const DIRECTIONS: [&str; 4] = ["TB", "BT", "LR", "RL"];

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("src"),
            extensions: vec![
                "h".to_string(),
                "hpp".to_string(),
                "hh".to_string(),
                "hxx".to_string(),
            ],
            exclude: vec![],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("docs/generated/class-relationships.md"),
            format: OutputFormat::default(),
            direction: "LR".to_string(),
            title: "Class Relationship Diagram".to_string(),
        }
    }
}

impl OutputFormat {
    /// Parse a format name as given on the command line
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::config_validation(format!("Unknown format: {}", other))),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        source_root: Option<PathBuf>,
        output: Option<PathBuf>,
        exclude: Vec<String>,
        format: Option<OutputFormat>,
        direction: Option<String>,
    ) {
        if let Some(root) = source_root {
            self.scan.source_root = root;
        }

        if let Some(out) = output {
            self.output.path = out;
        }

        if !exclude.is_empty() {
            self.scan.exclude.extend(exclude);
        }

        if let Some(fmt) = format {
            self.output.format = fmt;
        }

        if let Some(dir) = direction {
            self.output.direction = dir.to_uppercase();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.scan.extensions.is_empty() {
            return Err(Error::config_validation("at least one header extension required"));
        }

        if !DIRECTIONS.contains(&self.output.direction.as_str()) {
            return Err(Error::config_validation(format!(
                "direction must be one of {}, got {}",
                DIRECTIONS.join(", "),
                self.output.direction
            )));
        }

        for pattern in &self.scan.exclude {
            glob::Pattern::new(pattern)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.source_root, PathBuf::from("src"));
        assert_eq!(config.scan.extensions, vec!["h", "hpp", "hh", "hxx"]);
        assert_eq!(
            config.output.path,
            PathBuf::from("docs/generated/class-relationships.md")
        );
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert_eq!(config.output.direction, "LR");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[scan]
source_root = "include"
exclude = ["third_party/**"]

[output]
format = "json"
direction = "TB"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.scan.source_root, PathBuf::from("include"));
        assert_eq!(config.scan.exclude, vec!["third_party/**"]);
        // Unset keys keep their defaults
        assert_eq!(config.scan.extensions.len(), 4);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.direction, "TB");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/classmap.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/classmap.toml")).unwrap();
        assert_eq!(config.output.direction, "LR");
    }

    #[test]
    fn test_load_or_default_reports_bad_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\ndirection = \"DIAGONAL\"").unwrap();
        assert!(Config::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_validation_empty_extensions() {
        let mut config = Config::default();
        config.scan.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_direction() {
        let mut config = Config::default();
        config.output.direction = "UP".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_exclude_glob() {
        let mut config = Config::default();
        config.scan.exclude = vec!["[unclosed".to_string()];
        assert!(matches!(config.validate(), Err(Error::GlobPattern(_))));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = Config::default();
        config.merge_cli(
            Some(PathBuf::from("engine")),
            Some(PathBuf::from("/tmp/out.md")),
            vec!["vendor/**".to_string()],
            Some(OutputFormat::Mermaid),
            Some("tb".to_string()),
        );
        assert_eq!(config.scan.source_root, PathBuf::from("engine"));
        assert_eq!(config.output.path, PathBuf::from("/tmp/out.md"));
        assert_eq!(config.scan.exclude, vec!["vendor/**"]);
        assert_eq!(config.output.format, OutputFormat::Mermaid);
        assert_eq!(config.output.direction, "TB");
    }

    #[test]
    fn test_merge_cli_keeps_file_values() {
        let mut config = Config::default();
        config.scan.exclude = vec!["gen/**".to_string()];
        config.merge_cli(None, None, vec![], None, None);
        assert_eq!(config.scan.source_root, PathBuf::from("src"));
        assert_eq!(config.scan.exclude, vec!["gen/**"]);
    }

    #[test]
    fn test_output_format_parsing() {
        let toml_str = r#"format = "mermaid""#;
        let output: OutputConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(output.format, OutputFormat::Mermaid);
    }

    #[test]
    fn test_output_format_parse_names() {
        assert_eq!(OutputFormat::parse("md").unwrap(), OutputFormat::Markdown);
        assert_eq!(OutputFormat::parse("mmd").unwrap(), OutputFormat::Mermaid);
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::parse("html").is_err());
    }
}
