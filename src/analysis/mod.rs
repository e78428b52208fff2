// Analysis module: header discovery and the two-phase extraction pipeline
//
// Phase 1 scans every header for declarations. Phase 2 starts only once all
// declarations are known, because usage detection needs the global set of
// type names rather than the names of the current file.

pub mod graph;
pub mod usage;

pub use graph::*;
pub use usage::UsageDetector;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::{BaseListParser, DeclarationScanner, DeclarationSite, SourceUnit};
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Result of analyzing a header tree
#[derive(Debug)]
pub struct AnalysisResult {
    /// Nodes and relationship edges
    pub graph: TypeGraph,
    /// Root that was scanned
    pub source_root: PathBuf,
    /// Number of header files read
    pub files_scanned: usize,
    /// Number of declaration sites found, duplicates included
    pub declarations: usize,
}

/// Main analyzer that orchestrates the analysis pipeline
pub struct Analyzer {
    config: Config,
    exclude: Vec<Pattern>,
    scanner: DeclarationScanner,
    bases: BaseListParser,
    usage: UsageDetector,
    verbose: bool,
}

impl Analyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let exclude = config
            .scan
            .exclude
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            exclude,
            scanner: DeclarationScanner::new()?,
            bases: BaseListParser::new()?,
            usage: UsageDetector::new()?,
            verbose: false,
        })
    }

    /// Create analyzer with verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Analyze the header tree under `root`
    pub fn analyze(&self, root: &Path) -> Result<AnalysisResult> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }
        let root = root.canonicalize()?;

        let files = self.discover_files(&root)?;
        info!("Scanning {} headers under {}", files.len(), root.display());

        let units = self.read_units(&files, &root)?;
        let sites = self.scan_units(&units);
        if sites.is_empty() {
            return Err(Error::NoClassesFound(root));
        }

        let extracted = self.extract(&sites);
        let graph = build_relationships(&extracted)?;

        let stats = graph.stats();
        info!(
            "Built graph: {} types ({} classes, {} structs), {} inheritance edges, {} usage edges",
            stats.nodes, stats.classes, stats.structs, stats.inheritance_edges, stats.usage_edges
        );

        Ok(AnalysisResult {
            graph,
            source_root: root,
            files_scanned: units.len(),
            declarations: sites.len(),
        })
    }

    /// Build the graph for headers that were already loaded
    pub fn analyze_units(&self, units: &[SourceUnit]) -> Result<TypeGraph> {
        let sites = self.scan_units(units);
        build_relationships(&self.extract(&sites))
    }

    /// Phase 1: find declarations in every unit, keeping unit order
    pub fn scan_units(&self, units: &[SourceUnit]) -> Vec<DeclarationSite> {
        units
            .par_iter()
            .map(|unit| self.scanner.scan(unit))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }

    /// Phase 2: resolve bases and usages against the complete name set
    pub fn extract(&self, sites: &[DeclarationSite]) -> Vec<ExtractedType> {
        let known: BTreeSet<String> = sites.iter().map(|s| s.name.clone()).collect();

        sites
            .par_iter()
            .map(|site| ExtractedType {
                name: site.name.clone(),
                kind: site.kind,
                origin: site.origin.clone(),
                bases: self.bases.parse(&site.base_clause),
                uses: self.usage.detect(&site.body, &site.name, &known),
            })
            .collect()
    }

    /// Discover all header files under the root, sorted by path
    fn discover_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_header(path) {
                continue;
            }

            if self.should_exclude(path, root) {
                debug!("Excluded {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn is_header(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.config.scan.extensions.iter().any(|x| x == ext))
    }

    /// Check if a path matches any exclude pattern (relative to root)
    fn should_exclude(&self, path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.exclude.iter().any(|p| p.matches_path(relative))
    }

    /// Read headers, naming each unit by its path relative to the root's parent
    fn read_units(&self, files: &[PathBuf], root: &Path) -> Result<Vec<SourceUnit>> {
        let base = root.parent().unwrap_or(root);

        let progress = if self.verbose {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut units = Vec::with_capacity(files.len());
        for path in files {
            if let Some(ref pb) = progress {
                let msg = path.file_name().unwrap_or_default().to_string_lossy().to_string();
                pb.set_message(msg);
                pb.inc(1);
            }

            let bytes = std::fs::read(path)?;
            let relative = path.strip_prefix(base).unwrap_or(path);
            units.push(SourceUnit::from_bytes(relative, &bytes));
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Reading complete");
        }

        Ok(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("ecs")).unwrap();

        fs::write(
            src.join("ecs/system.hpp"),
            "#pragma once\nclass System {\npublic:\n  virtual void update(float dt) = 0;\n};\n",
        )
        .unwrap();
        fs::write(
            src.join("ecs/entity.h"),
            "struct Entity { unsigned id; };\n",
        )
        .unwrap();
        fs::write(
            src.join("movement.hxx"),
            "#include \"ecs/system.hpp\"\nclass MovementSystem : public System {\n  Entity target;\n  System* parent;\n};\n",
        )
        .unwrap();
        fs::write(src.join("main.cpp"), "class NotAHeader {};\n").unwrap();
        fs::write(src.join("notes.txt"), "class AlsoNot {};\n").unwrap();

        dir
    }

    fn analyzer() -> Analyzer {
        Analyzer::new(Config::default()).unwrap()
    }

    #[test]
    fn test_analyzer_new() {
        assert!(Analyzer::new(Config::default()).is_ok());
    }

    #[test]
    fn test_analyzer_rejects_bad_exclude_pattern() {
        let mut config = Config::default();
        config.scan.exclude = vec!["[".to_string()];
        assert!(matches!(Analyzer::new(config), Err(Error::GlobPattern(_))));
    }

    #[test]
    fn test_discover_files_filters_by_extension() {
        let dir = create_test_project();
        let root = dir.path().join("src");
        let files = analyzer().discover_files(&root).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["entity.h", "system.hpp", "movement.hxx"]);
    }

    #[test]
    fn test_discover_files_honours_excludes() {
        let dir = create_test_project();
        let mut config = Config::default();
        config.scan.exclude = vec!["ecs/**".to_string()];
        let analyzer = Analyzer::new(config).unwrap();

        let files = analyzer.discover_files(&dir.path().join("src")).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("movement.hxx"));
    }

    #[test]
    fn test_analyze_project() {
        let dir = create_test_project();
        let result = analyzer().analyze(&dir.path().join("src")).unwrap();

        assert_eq!(result.files_scanned, 3);
        assert_eq!(result.declarations, 3);

        let graph = &result.graph;
        let names: Vec<&str> = graph.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Entity", "MovementSystem", "System"]);
        assert!(graph
            .inheritance
            .contains(&InheritanceEdge::new("System", "MovementSystem")));
        assert_eq!(
            graph.usage.iter().cloned().collect::<Vec<_>>(),
            vec![UsageEdge::new("MovementSystem", "Entity")]
        );
    }

    #[test]
    fn test_analyze_origin_is_relative_to_root_parent() {
        let dir = create_test_project();
        let result = analyzer().analyze(&dir.path().join("src")).unwrap();
        let node = result.graph.get_node("Entity").unwrap();
        assert_eq!(node.origin, PathBuf::from("src/ecs/entity.h"));
    }

    #[test]
    fn test_analyze_missing_root() {
        let result = analyzer().analyze(Path::new("/nonexistent/headers"));
        assert!(matches!(result, Err(Error::PathNotFound(_))));
    }

    #[test]
    fn test_analyze_without_declarations() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("empty.h"), "#pragma once\nclass Forward;\n").unwrap();

        let result = analyzer().analyze(dir.path());
        assert!(matches!(result, Err(Error::NoClassesFound(_))));
    }

    #[test]
    fn test_analyze_units_is_deterministic() {
        let units = vec![
            SourceUnit::new("a.h", "struct A {};"),
            SourceUnit::new("b.h", "struct B : public A { A* ptr; C c; };"),
            SourceUnit::new("c.h", "class C { B* back; };"),
        ];
        let analyzer = analyzer();
        let first = analyzer.analyze_units(&units).unwrap();
        let second = analyzer.analyze_units(&units).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_usage_sees_names_from_later_files() {
        let units = vec![
            SourceUnit::new("a.h", "class Early { Late* late; };"),
            SourceUnit::new("b.h", "class Late {};"),
        ];
        let graph = analyzer().analyze_units(&units).unwrap();
        assert!(graph.usage.contains(&UsageEdge::new("Early", "Late")));
    }

    #[test]
    fn test_scan_units_keeps_unit_order() {
        let units: Vec<SourceUnit> = (0..20)
            .map(|i| SourceUnit::new(format!("h{}.h", i), format!("struct T{} {{}};", i)))
            .collect();
        let sites = analyzer().scan_units(&units);
        let names: Vec<String> = sites.into_iter().map(|s| s.name).collect();
        let expected: Vec<String> = (0..20).map(|i| format!("T{}", i)).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_with_verbose() {
        let analyzer = analyzer().with_verbose(true);
        assert!(analyzer.verbose);
    }
}
