// Declaration scanner for C/C++ headers
//
// Finds `class`/`struct` definitions with a brace body. Forward declarations
// (`class Foo;`) never match because the header may not contain `;` before
// the opening brace.

use crate::error::Result;
use crate::parser::ast::{DeclarationSite, SourceUnit, TypeKind};
use crate::parser::lexer::find_matching_brace;
use regex::Regex;
use tracing::debug;

/// `(class|struct) <identifier> <anything without ; or {> {`
const DECLARATION_PATTERN: &str = r"\b(class|struct)\s+([A-Za-z_][A-Za-z0-9_]*)\b([^;{]*)\{";

/// Scans header text for brace-bodied type declarations
pub struct DeclarationScanner {
    pattern: Regex,
}

impl DeclarationScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(DECLARATION_PATTERN)?,
        })
    }

    /// Scan one header and return its declarations in source order.
    ///
    /// Declarations whose braces never balance are dropped.
    pub fn scan(&self, unit: &SourceUnit) -> Vec<DeclarationSite> {
        let text = unit.content.as_str();
        let mut sites = Vec::new();

        for caps in self.pattern.captures_iter(text) {
            let (Some(whole), Some(keyword), Some(name), Some(clause)) =
                (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };
            let Some(kind) = TypeKind::from_keyword(keyword.as_str()) else {
                continue;
            };

            let open = whole.end() - 1;
            let Some(close) = find_matching_brace(text, open) else {
                debug!(
                    "{}: dropping {} {} at byte {}, braces never close",
                    unit.path.display(),
                    kind,
                    name.as_str(),
                    open
                );
                continue;
            };

            sites.push(DeclarationSite {
                name: name.as_str().to_string(),
                kind,
                origin: unit.path.clone(),
                base_clause: clause.as_str().to_string(),
                body: text[open + 1..close].to_string(),
                body_start: open,
            });
        }

        debug!("{}: {} declarations", unit.path.display(), sites.len());
        sites
    }
}
